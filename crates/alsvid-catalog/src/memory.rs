//! In-memory catalog provider.
//!
//! Serves datasets registered by the embedding application. This is the
//! provider used by the test suites; production embeddings register tables
//! loaded from whatever snapshot format their hosting layer produces.

use crate::error::{CatalogError, CatalogResult};
use crate::key::{DatasetKey, Subsystem};
use crate::provider::CatalogProvider;
use alsvid_types::WorkingTable;
use rustc_hash::FxHashMap;

/// A provider backed by registered in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    datasets: FxHashMap<DatasetKey, WorkingTable>,
}

impl InMemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset, replacing any previous table under the same key.
    pub fn register(&mut self, key: DatasetKey, table: WorkingTable) {
        self.datasets.insert(key, table);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_dataset(mut self, key: DatasetKey, table: WorkingTable) -> Self {
        self.register(key, table);
        self
    }

    /// Number of registered datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether no datasets are registered.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl CatalogProvider for InMemoryProvider {
    fn fetch(&self, key: &DatasetKey) -> CatalogResult<WorkingTable> {
        self.datasets
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::DatasetNotFound(key.to_string()))
    }

    fn component_names(&self, subsystem: Subsystem) -> Vec<String> {
        let mut names: Vec<String> = self
            .datasets
            .keys()
            .filter(|k| k.subsystem == subsystem)
            .map(|k| k.component.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
