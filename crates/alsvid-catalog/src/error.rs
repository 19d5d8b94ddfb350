//! Catalog error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while selecting and assembling catalog tables.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A selection required for the requested table is not set.
    #[error("selection incomplete: {0}")]
    MissingSelection(String),

    /// The provider has no dataset under the given configuration key.
    #[error("dataset `{0}` not found in catalog")]
    DatasetNotFound(String),

    /// The provider failed to produce a table.
    #[error("catalog provider error: {0}")]
    Provider(String),

    /// A catalog row carried a malformed unit-suffixed value.
    #[error("invalid quantity in catalog row: {0}")]
    Quantity(#[from] alsvid_types::QuantityError),
}
