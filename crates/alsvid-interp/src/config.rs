//! Interpolator configuration.

use serde::{Deserialize, Serialize};

/// Relative width of the coupling-capacitance band used when selecting the
/// cavity design (stage 4).
pub const DEFAULT_COUPLING_CAP_TOLERANCE: f64 = 0.30;

/// Coupling-to-self-capacitance ratio above which the weak-coupling
/// approximation breaks down and the loaded-frequency correction applies
/// (stage 7).
pub const DEFAULT_LOADING_BREAKDOWN_THRESHOLD: f64 = 0.01;

/// Knobs of the scaling derivation.
///
/// The defaults are the values the catalog was characterized with. Both
/// thresholds are overridable per interpolator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Relative tolerance of the coupling-capacitance band.
    pub coupling_cap_tolerance: f64,
    /// Coupling-to-self-capacitance ratio that triggers the loading
    /// correction.
    pub loading_breakdown_threshold: f64,
    /// Characteristic impedance of the feedline, Ω.
    pub line_impedance_ohms: f64,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            coupling_cap_tolerance: DEFAULT_COUPLING_CAP_TOLERANCE,
            loading_breakdown_threshold: DEFAULT_LOADING_BREAKDOWN_THRESHOLD,
            line_impedance_ohms: alsvid_types::physics::DEFAULT_LINE_IMPEDANCE,
        }
    }
}
