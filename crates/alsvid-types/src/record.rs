//! Catalog records: one simulated device geometry per row.

use crate::options::{CavityClawOptions, CouplerOptions, DesignOptions, QubitOptions};
use crate::params::{ParamMap, ParamValue};
use serde::{Deserialize, Serialize};

/// The design-option payload of a record, by sub-system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum DesignSlot {
    /// No geometry attached (derived or partially populated rows).
    #[default]
    None,
    /// A bare qubit geometry.
    Qubit(QubitOptions),
    /// A bare cavity-plus-claw geometry.
    CavityClaw(CavityClawOptions),
    /// A bare feedline-coupler geometry.
    Coupler(CouplerOptions),
    /// A joined qubit+cavity device with its unified design options.
    Coupled(Box<CoupledDesign>),
}

/// Geometry of a joined qubit+cavity device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoupledDesign {
    /// Qubit-side component options.
    pub qubit: QubitOptions,
    /// Cavity-side component options.
    pub cavity_claw: CavityClawOptions,
    /// Unified design options in the collaborator shape.
    pub unified: DesignOptions,
}

/// One row of a catalog table: simulated Hamiltonian parameters, categorical
/// tags, and the geometry that produced them.
///
/// Records are read-only snapshots once fetched; derived tables are built by
/// constructing new records, never by mutating fetched ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Flat parameter columns: Hamiltonian values and categorical tags.
    pub params: ParamMap,
    /// The geometry payload.
    pub design: DesignSlot,
}

impl CatalogRecord {
    /// Create a record with empty parameters and no geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter column.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Attach a geometry payload.
    #[must_use]
    pub fn with_design(mut self, design: DesignSlot) -> Self {
        self.design = design;
        self
    }

    /// Numeric value of a parameter column, if present and numeric.
    pub fn numeric(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(ParamValue::as_number)
    }

    /// Tag value of a parameter column, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(ParamValue::as_text)
    }

    /// The qubit-side options, from either a bare or a coupled record.
    pub fn qubit_options(&self) -> Option<&QubitOptions> {
        match &self.design {
            DesignSlot::Qubit(q) => Some(q),
            DesignSlot::Coupled(c) => Some(&c.qubit),
            _ => None,
        }
    }

    /// The cavity-side options, from either a bare or a coupled record.
    pub fn cavity_options(&self) -> Option<&CavityClawOptions> {
        match &self.design {
            DesignSlot::CavityClaw(c) => Some(c),
            DesignSlot::Coupled(c) => Some(&c.cavity_claw),
            _ => None,
        }
    }

    /// The unified design options of a coupled record.
    pub fn unified_options(&self) -> Option<&DesignOptions> {
        match &self.design {
            DesignSlot::Coupled(c) => Some(&c.unified),
            _ => None,
        }
    }
}
