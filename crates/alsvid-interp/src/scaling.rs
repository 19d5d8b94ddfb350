//! Scaling-based design interpolation.
//!
//! Produces a synthetic design for targets that match no catalog entry
//! exactly. The derivation is a fixed sequence of closed-form rescalings,
//! not a statistical fit: scaling a linear geometric dimension is the
//! first-order approximation for scaling the lumped capacitance or
//! inductance it realizes.
//!
//! Stages:
//! 1. nearest qubit+coupling design on {qubit frequency, anharmonicity, g};
//! 2. anharmonicity ratio and combined coupling ratio from the matched
//!    simulated values;
//! 3. cross length scaled by the anharmonicity ratio, claw length by the
//!    combined ratio;
//! 4. catalog restricted to a relative band around the matched design's
//!    coupling capacitance, to keep the cavity search in the same coupling
//!    regime;
//! 5. nearest cavity/coupler design in the band on {cavity frequency,
//!    linewidth, resonator topology};
//! 6. resonator length scaled by the frequency ratio, coupler length by the
//!    square root of the linewidth ratio (linewidth goes as the square of
//!    the coupling dimension in the weak-coupling limit);
//! 7. if the coupling capacitance exceeds the breakdown threshold of the
//!    resonator's self-capacitance, the bare target frequency is corrected
//!    for capacitive loading and stage 6 re-runs against it;
//! 8. the rescaled halves are merged into unified design options, with the
//!    required Josephson inductance propagated into every simulator field
//!    variant.

use crate::config::ScalingConfig;
use crate::error::{InterpError, InterpResult};
use alsvid_match::{DesignMatcher, Metric};
use alsvid_types::physics;
use alsvid_types::{
    columns, CatalogRecord, CavityClawOptions, DesignOptions, QubitOptions, TargetSpec,
    TargetValue, WorkingTable,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A synthetic coupled design produced by interpolation.
///
/// Not guaranteed to exist in, or to have been validated against, the
/// catalog — it is an extrapolation handed to the geometry renderer and
/// simulator for realization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolatedDesign {
    /// Rescaled qubit-side options.
    pub qubit_options: QubitOptions,
    /// Rescaled cavity-side options.
    pub cavity_claw_options: CavityClawOptions,
    /// Unified design options in the collaborator shape.
    pub design_options: DesignOptions,
    /// Feedline coupler of the source cavity design.
    pub coupler_type: String,
    /// Whether the matched cavity satisfied the categorical constraints; the
    /// categorical filter degrades to advisory when the band has no row with
    /// the requested topology.
    pub constraint_satisfied: bool,
}

/// The scaling interpolator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalingInterpolator {
    config: ScalingConfig,
}

impl ScalingInterpolator {
    /// Create an interpolator with the given configuration.
    pub fn new(config: ScalingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    /// Derive a synthetic design for the target from the working table.
    ///
    /// The table must be the coupled qubit+cavity table; the target must
    /// name the qubit frequency, anharmonicity, coupling strength, cavity
    /// frequency, linewidth, and resonator topology.
    pub fn interpolate(
        &self,
        table: &WorkingTable,
        target: &TargetSpec,
    ) -> InterpResult<InterpolatedDesign> {
        let f_q_target = required_target(target, columns::QUBIT_FREQUENCY_GHZ)?;
        let alpha_target = required_target(target, columns::ANHARMONICITY_MHZ)?;
        let g_target = required_target(target, columns::G_MHZ)?;
        let f_res_target = required_target(target, columns::CAVITY_FREQUENCY_GHZ)?;
        let kappa_target = required_target(target, columns::KAPPA_KHZ)?;
        let resonator_type = required_tag(target, columns::RESONATOR_TYPE)?;

        let matcher = DesignMatcher::new(table);

        // Stage 1: nearest qubit+coupling design, ignoring the cavity terms.
        let qubit_target = TargetSpec::new()
            .with(columns::QUBIT_FREQUENCY_GHZ, f_q_target)
            .with(columns::ANHARMONICITY_MHZ, alpha_target)
            .with(columns::G_MHZ, g_target);
        let qubit_outcome = matcher.find_closest(&qubit_target, 1, &Metric::Euclidean)?;
        let qubit_match = qubit_outcome
            .best()
            .expect("find_closest returned an empty top-1");

        // Stage 2: scale ratios from simulated vs. target values.
        let sim_alpha = nonzero_sim(&qubit_match.record, columns::ANHARMONICITY_MHZ)?;
        let sim_g = nonzero_sim(&qubit_match.record, columns::G_MHZ)?;
        let alpha_ratio = sim_alpha / alpha_target;
        let coupling_ratio = alpha_ratio * (g_target / sim_g);

        // Stage 3: rescale the qubit geometry.
        let qubit_source = qubit_match
            .record
            .qubit_options()
            .ok_or_else(|| InterpError::MissingDesignField("qubit_options".to_string()))?
            .clone();
        let cross_length = qubit_source.cross_length.scale(alpha_ratio);
        let claw_length = qubit_source
            .connection_pads
            .readout
            .claw_length
            .scale(coupling_ratio);

        // Stage 4: restrict to the same coupling regime.
        let coupling_cap = required_sim(&qubit_match.record, columns::CROSS_TO_CLAW)?;
        let band = table.filter_numeric_band(
            columns::CROSS_TO_CLAW,
            coupling_cap,
            self.config.coupling_cap_tolerance,
        );

        // Stage 5: nearest cavity/coupler design within the band.
        let cavity_target = TargetSpec::new()
            .with(columns::CAVITY_FREQUENCY_GHZ, f_res_target)
            .with(columns::KAPPA_KHZ, kappa_target)
            .with_tag(columns::RESONATOR_TYPE, resonator_type);
        let cavity_outcome =
            DesignMatcher::new(&band).find_closest(&cavity_target, 1, &Metric::Euclidean)?;
        let cavity_match = cavity_outcome
            .best()
            .expect("find_closest returned an empty top-1");

        let sim_f_cavity = nonzero_sim(&cavity_match.record, columns::CAVITY_FREQUENCY_GHZ)?;
        let sim_kappa = nonzero_sim(&cavity_match.record, columns::KAPPA_KHZ)?;
        let cavity_source = cavity_match
            .record
            .cavity_options()
            .ok_or_else(|| InterpError::MissingDesignField("cavity_claw_options".to_string()))?
            .clone();

        // Stage 7 feeds stage 6: correct the bare target frequency first if
        // the coupling capacitance loads the resonator appreciably.
        let f_res_bare = self.corrected_cavity_frequency(f_res_target, coupling_cap);
        let frequency_ratio = sim_f_cavity / f_res_bare;
        let kappa_ratio = (kappa_target / sim_kappa).sqrt();

        // Stage 6: rescale the cavity geometry.
        let total_length = cavity_source.cpw_opts.total_length.scale(frequency_ratio);
        let coupling_length = cavity_source
            .cplr_opts
            .coupling_length
            .ok_or_else(|| {
                InterpError::MissingDesignField("cplr_opts.coupling_length".to_string())
            })?
            .scale(kappa_ratio)
            .round();

        info!(
            "scaling ratios: alpha {alpha_ratio:.4}, coupling {coupling_ratio:.4}, \
             frequency {frequency_ratio:.4}, linewidth {kappa_ratio:.4}"
        );

        // Stage 8: assemble and propagate derived quantities.
        let ej = required_sim(&qubit_match.record, columns::EJ)?;
        if ej == 0.0 {
            return Err(InterpError::ZeroQuantity(columns::EJ.to_string()));
        }
        let lj_nh = physics::josephson_inductance_nh(ej);

        let qubit_options = qubit_source
            .with_cross_length(cross_length)
            .with_claw_length(claw_length)
            .with_josephson_inductance(lj_nh)
            .with_zeroed_claw_stubs();
        let cavity_options = cavity_source
            .with_total_length(total_length)
            .with_coupling_length(coupling_length)
            .with_pads_from(&qubit_options);

        let coupler_type = coupler_type_of(&cavity_match.record, resonator_type);
        let design_options = DesignOptions::unify(&qubit_options, &cavity_options, &coupler_type);

        Ok(InterpolatedDesign {
            qubit_options,
            cavity_claw_options: cavity_options,
            design_options,
            coupler_type,
            constraint_satisfied: cavity_match.constraint_satisfied,
        })
    }

    /// The bare cavity frequency that realizes the target once capacitive
    /// loading is accounted for.
    ///
    /// At or below the breakdown threshold the weak-coupling approximation
    /// holds and the target is returned unchanged, so re-applying the
    /// correction is a no-op.
    pub fn corrected_cavity_frequency(
        &self,
        target_frequency_ghz: f64,
        coupling_capacitance_ff: f64,
    ) -> f64 {
        let c_c = coupling_capacitance_ff.abs();
        let c_res = physics::resonator_self_capacitance_ff(
            target_frequency_ghz,
            self.config.line_impedance_ohms,
        );
        if c_c / c_res > self.config.loading_breakdown_threshold {
            target_frequency_ghz / physics::loading_factor(c_res, c_c)
        } else {
            target_frequency_ghz
        }
    }
}

fn required_target(target: &TargetSpec, key: &str) -> InterpResult<f64> {
    target
        .numeric(key)
        .ok_or_else(|| InterpError::MissingTarget(key.to_string()))
}

fn required_tag<'a>(target: &'a TargetSpec, key: &str) -> InterpResult<&'a str> {
    match target.get(key) {
        Some(TargetValue::Tag(tag)) => Ok(tag.as_str()),
        _ => Err(InterpError::MissingTarget(key.to_string())),
    }
}

fn required_sim(record: &CatalogRecord, quantity: &str) -> InterpResult<f64> {
    record
        .numeric(quantity)
        .ok_or_else(|| InterpError::MissingQuantity(quantity.to_string()))
}

fn nonzero_sim(record: &CatalogRecord, quantity: &str) -> InterpResult<f64> {
    let value = required_sim(record, quantity)?;
    if value == 0.0 {
        return Err(InterpError::ZeroQuantity(quantity.to_string()));
    }
    Ok(value)
}

fn coupler_type_of(record: &CatalogRecord, resonator_type: &str) -> String {
    if let Some(tag) = record.text(columns::COUPLER_TYPE) {
        return tag.to_string();
    }
    if let Some(unified) = record.unified_options() {
        if !unified.cavity_claw_options.coupler_type.is_empty() {
            return unified.cavity_claw_options.coupler_type.clone();
        }
    }
    if resonator_type == "half" { "NCap" } else { "CLT" }.to_string()
}
