//! The catalog provider contract.

use crate::error::CatalogResult;
use crate::key::{DatasetKey, Subsystem};
use alsvid_types::WorkingTable;

/// Supplier of tabular device datasets, addressed by [`DatasetKey`].
///
/// Implementations are synchronous: the engine is a single-session,
/// CPU-bound tool and providers are expected to serve from local snapshots.
/// Where the data actually lives (remote dataset hubs, parquet caches) is the
/// provider's concern.
pub trait CatalogProvider {
    /// Fetch the dataset under the given configuration key.
    ///
    /// Rows must carry the Hamiltonian-parameter columns of the dataset plus
    /// the design-options payload for the sub-system.
    fn fetch(&self, key: &DatasetKey) -> CatalogResult<WorkingTable>;

    /// Component names available for a sub-system, used to validate
    /// selections and to guide the user after a failed one.
    fn component_names(&self, subsystem: Subsystem) -> Vec<String>;

    /// Whether a component name is available for a sub-system.
    fn supports(&self, subsystem: Subsystem, component: &str) -> bool {
        self.component_names(subsystem)
            .iter()
            .any(|n| n == component)
    }
}
