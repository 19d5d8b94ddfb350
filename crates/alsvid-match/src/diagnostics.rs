//! Advisory diagnostics.
//!
//! Conditions worth telling the user about that do not invalidate a search:
//! targets outside the library's observed bounds, categorical constraints the
//! library cannot satisfy, and defaulted metric weights. They are logged and
//! returned alongside the matches; execution always continues.

use serde::Serialize;
use std::fmt;
use tracing::info;

/// An advisory condition observed during a match call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// A numeric target lies outside the `[min, max]` observed in its column.
    /// The catalog may simply not contain a geometry that good (or bad); the
    /// rows stay in the ranking.
    OutOfBounds {
        /// Target parameter name.
        param: String,
        /// Requested value.
        value: f64,
        /// Smallest observed value.
        min: f64,
        /// Largest observed value.
        max: f64,
    },

    /// No row satisfies the categorical constraints; the constraints degrade
    /// to advisory and the ranking runs over the unfiltered table. Matches
    /// produced this way carry `constraint_satisfied: false`.
    NoCategoricalMatch {
        /// The constraints that filtered every row out.
        constraints: Vec<(String, String)>,
    },

    /// A weighted metric ran without weights; every parameter used weight 1.
    DefaultWeights,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OutOfBounds {
                param,
                value,
                min,
                max,
            } => write!(
                f,
                "the value {value} for {param} is outside the library bounds [{min}, {max}]; \
                 if you find a geometry with these values, please consider contributing it"
            ),
            Diagnostic::NoCategoricalMatch { constraints } => write!(
                f,
                "no geometries match the categorical parameters {constraints:?}; \
                 ranking continues over the unfiltered table"
            ),
            Diagnostic::DefaultWeights => {
                write!(f, "no metric weights provided; using default weight 1 for all parameters")
            }
        }
    }
}

impl Diagnostic {
    /// Log this diagnostic at info level.
    pub(crate) fn emit(&self) {
        info!("{self}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_parameter() {
        let diag = Diagnostic::OutOfBounds {
            param: "qubit_frequency_GHz".to_string(),
            value: 15.0,
            min: 1.0,
            max: 10.0,
        };
        let text = diag.to_string();
        assert!(text.contains("qubit_frequency_GHz"));
        assert!(text.contains("15"));
        assert!(text.contains("[1, 10]"));
    }
}
