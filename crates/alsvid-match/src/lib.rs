//! Alsvid Matcher: nearest-design search
//!
//! Ranks catalog rows against a target Hamiltonian-parameter vector under a
//! pluggable distance metric and returns the top matches with advisory
//! diagnostics.
//!
//! # Overview
//!
//! - [`Metric`]: a closed set of distance kinds: relative Euclidean (the
//!   default), Manhattan, Chebyshev, weighted Euclidean, and caller-supplied
//!   custom functions.
//! - [`DesignMatcher`]: precondition-checked top-k search with stable
//!   tie-breaking and a rayon-partitioned variant for large tables.
//! - [`Diagnostic`]: advisory conditions (out-of-bounds targets, empty
//!   categorical filters, defaulted weights) that never abort a search.
//! - [`hamiltonian`]: derivation of transmon Hamiltonian columns from
//!   capacitance-matrix simulation results.
//!
//! # Example
//!
//! ```rust
//! use alsvid_match::{DesignMatcher, Metric};
//! use alsvid_types::{columns, CatalogRecord, TargetSpec, WorkingTable};
//!
//! let table: WorkingTable = [3.0, 4.0, 5.0, 6.0, 7.0]
//!     .iter()
//!     .map(|&f| CatalogRecord::new().with_param(columns::QUBIT_FREQUENCY_GHZ, f))
//!     .collect();
//! let target = TargetSpec::new().with(columns::QUBIT_FREQUENCY_GHZ, 5.1);
//!
//! let outcome = DesignMatcher::new(&table)
//!     .find_closest(&target, 2, &Metric::Euclidean)
//!     .unwrap();
//! assert_eq!(
//!     outcome.best().unwrap().record.numeric(columns::QUBIT_FREQUENCY_GHZ),
//!     Some(5.0)
//! );
//! ```

pub mod diagnostics;
pub mod error;
pub mod hamiltonian;
pub mod matcher;
pub mod metric;
pub mod parallel;

pub use diagnostics::Diagnostic;
pub use error::{MatchError, MatchResult};
pub use matcher::{DesignMatcher, MatchOutcome, RankedMatch};
pub use metric::{CustomMetricFn, Metric, SUPPORTED_METRICS};
