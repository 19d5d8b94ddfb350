//! The working table: an immutable snapshot of catalog rows.

use crate::record::CatalogRecord;
use serde::{Deserialize, Serialize};

/// A read-only table of catalog records.
///
/// Produced by the catalog selector and consumed by the matcher and the
/// interpolator. Filters return new tables; the snapshot itself never mutates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingTable {
    rows: Vec<CatalogRecord>,
}

impl WorkingTable {
    /// Build a table from rows.
    pub fn new(rows: Vec<CatalogRecord>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in table order.
    pub fn rows(&self) -> &[CatalogRecord] {
        &self.rows
    }

    /// A single row by index.
    pub fn row(&self, index: usize) -> Option<&CatalogRecord> {
        self.rows.get(index)
    }

    /// Whether every row carries the named parameter column.
    ///
    /// An empty table has no columns.
    pub fn has_column(&self, name: &str) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| r.params.contains_key(name))
    }

    /// Observed `[min, max]` of a numeric column, ignoring non-numeric cells.
    pub fn numeric_range(&self, name: &str) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for value in self.rows.iter().filter_map(|r| r.numeric(name)) {
            range = Some(match range {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
        range
    }

    /// Rows passing a predicate, as a new table. Row order is preserved.
    pub fn filter<F>(&self, mut pred: F) -> WorkingTable
    where
        F: FnMut(&CatalogRecord) -> bool,
    {
        WorkingTable::new(self.rows.iter().filter(|r| pred(r)).cloned().collect())
    }

    /// Rows whose numeric `column` lies within `±tolerance` (relative) of
    /// `center`, as a new table. Rows without the column are dropped.
    pub fn filter_numeric_band(&self, column: &str, center: f64, tolerance: f64) -> WorkingTable {
        let lo = (1.0 - tolerance) * center;
        let hi = (1.0 + tolerance) * center;
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.filter(|r| r.numeric(column).is_some_and(|v| v >= lo && v <= hi))
    }

    /// Rows whose tag `column` equals `value` exactly, as a new table.
    pub fn filter_tag(&self, column: &str, value: &str) -> WorkingTable {
        self.filter(|r| r.text(column) == Some(value))
    }

    /// Apply a row transform, producing a new table of the same length.
    pub fn map_rows<F>(&self, f: F) -> WorkingTable
    where
        F: FnMut(&CatalogRecord) -> CatalogRecord,
    {
        WorkingTable::new(self.rows.iter().map(f).collect())
    }
}

impl FromIterator<CatalogRecord> for WorkingTable {
    fn from_iter<I: IntoIterator<Item = CatalogRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
