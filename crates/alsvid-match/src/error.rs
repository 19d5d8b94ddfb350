//! Matcher error types.

use thiserror::Error;

/// Result type for matcher operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors that can occur during metric construction and nearest-design search.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The metric name is not one of the supported kinds.
    #[error("unsupported metric `{name}`; supported metrics: {supported:?}")]
    UnsupportedMetric {
        /// The rejected name.
        name: String,
        /// The closed set of valid names.
        supported: &'static [&'static str],
    },

    /// More results requested than the working table holds.
    #[error("`num_top` ({requested}) cannot be bigger than the size of the working table ({available})")]
    TopCountTooLarge {
        /// Requested result count.
        requested: usize,
        /// Rows available.
        available: usize,
    },

    /// A target parameter has no corresponding column in the working table.
    #[error("target parameter `{0}` is not a column of the working table")]
    MissingColumn(String),

    /// A relative metric was asked to divide by a zero target value.
    #[error("relative distance is undefined for zero target value `{0}`")]
    ZeroTargetValue(String),

    /// A custom metric was requested without a distance function.
    #[error("must provide a custom metric function")]
    MissingCustomFunction,

    /// The working table has no rows to match against.
    #[error("working table is empty; nothing to match against")]
    EmptyTable,

    /// A target entry cannot drive the requested derivation.
    #[error("invalid target for `{param}`: {reason}")]
    InvalidTarget {
        /// The offending target parameter.
        param: String,
        /// Why it was rejected.
        reason: String,
    },
}
