//! Design-option trees.
//!
//! The geometric/material knobs of a device, shaped the way the downstream
//! geometry renderer and simulator read them. Component-level trees
//! ([`QubitOptions`], [`CavityClawOptions`]) come straight from the catalog;
//! [`DesignOptions`] is the unified coupled-device structure
//! (`qubit_options`, `cavity_claw_options.coupler_options`,
//! `cavity_claw_options.cpw_options.left_options`).
//!
//! All types are value objects: updates go through `with_*` builders that
//! return a new tree, and the unified assembly is a pure merge. Geometry knobs
//! the engine does not interpret ride along in `extra` maps so collaborators
//! see every field the catalog carried.

use crate::quantity::PhysicalQuantity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn zero_um() -> PhysicalQuantity {
    PhysicalQuantity::um(0.0)
}

/// The readout connection pad of a qubit: the claw coupling capacitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadoutPad {
    /// Claw length, the primary coupling-capacitor knob.
    pub claw_length: PhysicalQuantity,
    /// Claw trace width.
    pub claw_width: PhysicalQuantity,
    /// Claw gap to ground.
    pub claw_gap: PhysicalQuantity,
    /// Stub CPW length between claw and route; zeroed in unified designs.
    #[serde(default = "zero_um")]
    pub claw_cpw_length: PhysicalQuantity,
    /// Stub CPW width; zeroed in unified designs.
    #[serde(default = "zero_um")]
    pub claw_cpw_width: PhysicalQuantity,
    /// Spacing between claw and ground plane cutout.
    pub ground_spacing: PhysicalQuantity,
    /// Josephson inductance of the junction shunting this pad.
    #[serde(rename = "Lj")]
    pub lj: PhysicalQuantity,
    /// Pass-through knobs the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ReadoutPad {
    fn default() -> Self {
        Self {
            claw_length: zero_um(),
            claw_width: zero_um(),
            claw_gap: zero_um(),
            claw_cpw_length: zero_um(),
            claw_cpw_width: zero_um(),
            ground_spacing: zero_um(),
            lj: PhysicalQuantity::nh(0.0),
            extra: Map::new(),
        }
    }
}

/// Connection pads of a component, keyed by port role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPads {
    /// The readout port.
    pub readout: ReadoutPad,
}

/// Geometry of a cross-shaped transmon plus its readout claw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QubitOptions {
    /// Arm length of the cross, the anharmonicity knob.
    pub cross_length: PhysicalQuantity,
    /// Arm width of the cross.
    pub cross_width: PhysicalQuantity,
    /// Gap between cross and ground plane.
    pub cross_gap: PhysicalQuantity,
    /// Junction inductance in henries, as the HFSS driver reads it.
    #[serde(default)]
    pub aedt_hfss_inductance: f64,
    /// Junction inductance in henries, as the Q3D driver reads it.
    #[serde(default)]
    pub aedt_q3d_inductance: f64,
    /// Junction inductance in henries, legacy HFSS field.
    #[serde(default)]
    pub hfss_inductance: f64,
    /// Junction inductance in henries, legacy Q3D field.
    #[serde(default)]
    pub q3d_inductance: f64,
    /// Connection pads, including the readout claw.
    pub connection_pads: ConnectionPads,
    /// Pass-through knobs the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QubitOptions {
    /// Replace the cross length.
    #[must_use]
    pub fn with_cross_length(mut self, length: PhysicalQuantity) -> Self {
        self.cross_length = length;
        self
    }

    /// Replace the readout claw length.
    #[must_use]
    pub fn with_claw_length(mut self, length: PhysicalQuantity) -> Self {
        self.connection_pads.readout.claw_length = length;
        self
    }

    /// Write a junction inductance into every field variant the simulators
    /// read: the four inductance fields in henries and the pad `Lj` in nH.
    #[must_use]
    pub fn with_josephson_inductance(mut self, lj_nh: f64) -> Self {
        let henries = lj_nh * 1e-9;
        self.aedt_hfss_inductance = henries;
        self.aedt_q3d_inductance = henries;
        self.hfss_inductance = henries;
        self.q3d_inductance = henries;
        self.connection_pads.readout.lj = PhysicalQuantity::nh(lj_nh);
        self
    }

    /// Zero the `claw_cpw_*` stub dimensions, as unified designs require.
    #[must_use]
    pub fn with_zeroed_claw_stubs(mut self) -> Self {
        self.connection_pads.readout.claw_cpw_length = zero_um();
        self.connection_pads.readout.claw_cpw_width = zero_um();
        self
    }
}

/// Claw sub-tree of a cavity, mirroring the qubit's pad geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClawOptions {
    /// Connection pads, mirroring the coupled qubit's readout claw.
    pub connection_pads: ConnectionPads,
    /// Pass-through knobs the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Meandered CPW resonator geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpwOptions {
    /// Total electrical length of the resonator, the frequency knob.
    pub total_length: PhysicalQuantity,
    /// Pass-through knobs the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Feedline coupler geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplerOptions {
    /// Characteristic coupling dimension, the linewidth knob. Absent for
    /// coupler families that do not expose a single length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_length: Option<PhysicalQuantity>,
    /// Pass-through knobs the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Component-level cavity-plus-claw geometry as a catalog row carries it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CavityClawOptions {
    /// Claw geometry on the cavity side.
    pub claw_opts: ClawOptions,
    /// CPW resonator geometry.
    pub cpw_opts: CpwOptions,
    /// Feedline coupler geometry.
    pub cplr_opts: CouplerOptions,
    /// Pass-through knobs the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CavityClawOptions {
    /// Replace the resonator total length.
    #[must_use]
    pub fn with_total_length(mut self, length: PhysicalQuantity) -> Self {
        self.cpw_opts.total_length = length;
        self
    }

    /// Replace the coupler's coupling length.
    #[must_use]
    pub fn with_coupling_length(mut self, length: PhysicalQuantity) -> Self {
        self.cplr_opts.coupling_length = Some(length);
        self
    }

    /// Align the cavity claw with the coupled qubit's pad: copy the qubit's
    /// ground spacing and zero the `claw_cpw_*` stubs.
    #[must_use]
    pub fn with_pads_from(mut self, qubit: &QubitOptions) -> Self {
        let pad = &mut self.claw_opts.connection_pads.readout;
        pad.ground_spacing = qubit.connection_pads.readout.ground_spacing;
        pad.claw_cpw_length = zero_um();
        pad.claw_cpw_width = zero_um();
        self
    }
}

/// Inner CPW split of the unified structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpwStack {
    /// The (single) resonator arm.
    pub left_options: CpwOptions,
}

/// Cavity/coupler half of the unified structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CavityClawAssembly {
    /// Coupler component tag, e.g. `"CLT"`.
    pub coupler_type: String,
    /// Feedline coupler geometry.
    pub coupler_options: CouplerOptions,
    /// Resonator geometry.
    pub cpw_options: CpwStack,
}

/// Unified coupled-device design options in the collaborator shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignOptions {
    /// Qubit half of the device.
    pub qubit_options: QubitOptions,
    /// Cavity/coupler half of the device.
    pub cavity_claw_options: CavityClawAssembly,
}

impl DesignOptions {
    /// Merge component-level trees into the unified coupled-device structure.
    ///
    /// Pure: the inputs are untouched. The qubit's `claw_cpw_*` stubs are
    /// zeroed and the cavity claw inherits the qubit pad's ground spacing
    /// before the cavity sub-trees are lifted into the assembly.
    pub fn unify(
        qubit: &QubitOptions,
        cavity: &CavityClawOptions,
        coupler_type: &str,
    ) -> Self {
        let qubit_options = qubit.clone().with_zeroed_claw_stubs();
        let cavity = cavity.clone().with_pads_from(&qubit_options);

        Self {
            qubit_options,
            cavity_claw_options: CavityClawAssembly {
                coupler_type: coupler_type.to_string(),
                coupler_options: cavity.cplr_opts,
                cpw_options: CpwStack {
                    left_options: cavity.cpw_opts,
                },
            },
        }
    }
}
