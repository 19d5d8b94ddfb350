//! Interpolator error types.

use alsvid_match::MatchError;
use thiserror::Error;

/// Result type for interpolation operations.
pub type InterpResult<T> = Result<T, InterpError>;

/// Errors that can occur during scaling interpolation.
///
/// Every scaling ratio is a physical derivation; when one cannot be formed,
/// the interpolator aborts and names the quantity instead of substituting a
/// default physical value.
#[derive(Debug, Error)]
pub enum InterpError {
    /// The target specification lacks a parameter the derivation needs.
    #[error("target parameter `{0}` is required for scaling interpolation")]
    MissingTarget(String),

    /// The matched design lacks a simulated value a ratio needs.
    #[error("simulated value `{0}` is missing from the matched design")]
    MissingQuantity(String),

    /// A simulated value is zero, so the ratio it should scale is undefined.
    #[error("simulated value `{0}` is zero; cannot form a scaling ratio")]
    ZeroQuantity(String),

    /// The matched design's geometry lacks a field the rescale targets.
    #[error("matched design is missing geometry field `{0}`")]
    MissingDesignField(String),

    /// A nearest-match search inside the interpolation failed.
    #[error(transparent)]
    Match(#[from] MatchError),
}
