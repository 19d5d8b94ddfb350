//! Distance metrics between a target and a catalog row.
//!
//! A closed set of metric kinds, dispatched by a single `match`. Metrics are
//! defined only over the numeric entries of the target; categorical entries
//! are hard filters handled upstream by the matcher.
//!
//! The default is the *relative* Euclidean distance
//! `sqrt(Σ (row[k] − target[k])² / target[k]²)`: Hamiltonian parameters span
//! kHz linewidths to GHz frequencies, so unnormalized distances would be
//! dominated by whichever parameter carries the largest unit. Manhattan and
//! Chebyshev are offered unnormalized for callers who pre-normalize.

use crate::error::{MatchError, MatchResult};
use alsvid_types::{CatalogRecord, TargetSpec};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a caller-supplied metric function.
pub type CustomMetricFn = dyn Fn(&TargetSpec, &CatalogRecord) -> f64 + Send + Sync;

/// Names accepted by [`Metric::from_name`].
pub const SUPPORTED_METRICS: &[&str] = &[
    "Euclidean",
    "Manhattan",
    "Chebyshev",
    "Weighted Euclidean",
    "Custom",
];

/// A distance metric kind, with its parameters.
#[derive(Clone, Default)]
pub enum Metric {
    /// Relative (normalized) Euclidean distance.
    #[default]
    Euclidean,
    /// Unnormalized L1 distance.
    Manhattan,
    /// Unnormalized L∞ distance.
    Chebyshev,
    /// Relative Euclidean with per-parameter weights. Missing weights default
    /// to 1, in which case the matcher surfaces an advisory diagnostic.
    WeightedEuclidean {
        /// Per-parameter weights; `None` means all-ones.
        weights: Option<FxHashMap<String, f64>>,
    },
    /// Caller-supplied distance function.
    Custom(Arc<CustomMetricFn>),
}

impl Metric {
    /// Resolve a metric by its display name.
    ///
    /// `"Custom"` cannot be resolved by name: a custom metric needs its
    /// function, so construct it with [`Metric::custom`] instead.
    pub fn from_name(name: &str) -> MatchResult<Self> {
        match name {
            "Euclidean" => Ok(Metric::Euclidean),
            "Manhattan" => Ok(Metric::Manhattan),
            "Chebyshev" => Ok(Metric::Chebyshev),
            "Weighted Euclidean" => Ok(Metric::WeightedEuclidean { weights: None }),
            "Custom" => Err(MatchError::MissingCustomFunction),
            other => Err(MatchError::UnsupportedMetric {
                name: other.to_string(),
                supported: SUPPORTED_METRICS,
            }),
        }
    }

    /// A weighted Euclidean metric with explicit weights.
    pub fn weighted(weights: FxHashMap<String, f64>) -> Self {
        Metric::WeightedEuclidean {
            weights: Some(weights),
        }
    }

    /// A custom metric from a caller-supplied function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&TargetSpec, &CatalogRecord) -> f64 + Send + Sync + 'static,
    {
        Metric::Custom(Arc::new(f))
    }

    /// Display name of this metric kind.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "Euclidean",
            Metric::Manhattan => "Manhattan",
            Metric::Chebyshev => "Chebyshev",
            Metric::WeightedEuclidean { .. } => "Weighted Euclidean",
            Metric::Custom(_) => "Custom",
        }
    }

    /// Whether this metric divides by target values.
    pub fn is_relative(&self) -> bool {
        matches!(
            self,
            Metric::Euclidean | Metric::WeightedEuclidean { .. }
        )
    }

    /// Whether this metric would fall back to all-ones weights.
    pub fn uses_default_weights(&self) -> bool {
        matches!(self, Metric::WeightedEuclidean { weights: None })
    }

    /// Reject target vectors this metric is undefined over: a relative metric
    /// cannot divide by a zero target value.
    pub fn validate_target(&self, target: &TargetSpec) -> MatchResult<()> {
        if self.is_relative() {
            for (key, value) in target.numeric_entries() {
                if value == 0.0 {
                    return Err(MatchError::ZeroTargetValue(key.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Distance between the target's numeric entries and a row.
    pub fn calculate(&self, target: &TargetSpec, row: &CatalogRecord) -> f64 {
        match self {
            Metric::Euclidean => relative_euclidean(target, row, None),
            Metric::WeightedEuclidean { weights } => {
                relative_euclidean(target, row, weights.as_ref())
            }
            Metric::Manhattan => target
                .numeric_entries()
                .map(|(key, t)| (row.numeric(key).unwrap_or(0.0) - t).abs())
                .sum(),
            Metric::Chebyshev => target
                .numeric_entries()
                .map(|(key, t)| (row.numeric(key).unwrap_or(0.0) - t).abs())
                .fold(0.0, f64::max),
            Metric::Custom(f) => f(target, row),
        }
    }
}

fn relative_euclidean(
    target: &TargetSpec,
    row: &CatalogRecord,
    weights: Option<&FxHashMap<String, f64>>,
) -> f64 {
    let mut sum = 0.0;
    for (key, t) in target.numeric_entries() {
        let sim = row.numeric(key).unwrap_or(0.0);
        let weight = weights
            .and_then(|w| w.get(key))
            .copied()
            .unwrap_or(1.0);
        let diff = sim - t;
        sum += weight * diff * diff / (t * t);
    }
    sum.sqrt()
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_types::columns;

    fn row(freq: f64, alpha: f64) -> CatalogRecord {
        CatalogRecord::new()
            .with_param(columns::QUBIT_FREQUENCY_GHZ, freq)
            .with_param(columns::ANHARMONICITY_MHZ, alpha)
    }

    fn target(freq: f64, alpha: f64) -> TargetSpec {
        TargetSpec::new()
            .with(columns::QUBIT_FREQUENCY_GHZ, freq)
            .with(columns::ANHARMONICITY_MHZ, alpha)
    }

    #[test]
    fn test_from_name_resolves_supported_kinds() {
        for name in ["Euclidean", "Manhattan", "Chebyshev", "Weighted Euclidean"] {
            assert_eq!(Metric::from_name(name).unwrap().name(), name);
        }
        assert!(matches!(
            Metric::from_name("Custom"),
            Err(MatchError::MissingCustomFunction)
        ));
        assert!(matches!(
            Metric::from_name("Cosine"),
            Err(MatchError::UnsupportedMetric { .. })
        ));
    }

    #[test]
    fn test_exact_row_has_zero_distance() {
        let t = target(5.0, -200.0);
        let r = row(5.0, -200.0);
        for metric in [Metric::Euclidean, Metric::Manhattan, Metric::Chebyshev] {
            assert_eq!(metric.calculate(&t, &r), 0.0, "{}", metric.name());
        }
    }

    #[test]
    fn test_relative_euclidean_normalizes_by_target() {
        let t = target(5.0, -200.0);
        // 1% off in frequency, exact anharmonicity.
        let d = Metric::Euclidean.calculate(&t, &row(5.05, -200.0));
        assert!((d - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_manhattan_and_chebyshev_are_unnormalized() {
        let t = target(5.0, -200.0);
        let r = row(5.5, -210.0);
        assert!((Metric::Manhattan.calculate(&t, &r) - 10.5).abs() < 1e-12);
        assert!((Metric::Chebyshev.calculate(&t, &r) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_without_weights_matches_euclidean() {
        let t = target(5.0, -200.0);
        let r = row(4.6, -190.0);
        let plain = Metric::Euclidean.calculate(&t, &r);
        let weighted = Metric::WeightedEuclidean { weights: None }.calculate(&t, &r);
        assert_eq!(plain, weighted);
    }

    #[test]
    fn test_weighted_weights_change_ordering() {
        let t = target(5.0, -200.0);
        let off_freq = row(4.5, -200.0);
        let off_alpha = row(5.0, -180.0);

        let mut weights = FxHashMap::default();
        weights.insert(columns::QUBIT_FREQUENCY_GHZ.to_string(), 0.0);
        weights.insert(columns::ANHARMONICITY_MHZ.to_string(), 1.0);
        let metric = Metric::weighted(weights);

        // Frequency error is weighted out entirely.
        assert_eq!(metric.calculate(&t, &off_freq), 0.0);
        assert!(metric.calculate(&t, &off_alpha) > 0.0);
    }

    #[test]
    fn test_zero_target_rejected_for_relative_metrics() {
        let t = target(0.0, -200.0);
        assert!(matches!(
            Metric::Euclidean.validate_target(&t),
            Err(MatchError::ZeroTargetValue(k)) if k == columns::QUBIT_FREQUENCY_GHZ
        ));
        assert!(Metric::Manhattan.validate_target(&t).is_ok());
        assert!(Metric::Chebyshev.validate_target(&t).is_ok());
    }

    #[test]
    fn test_custom_metric_delegates() {
        let metric = Metric::custom(|target, row| {
            let t = target.numeric(columns::QUBIT_FREQUENCY_GHZ).unwrap_or(0.0);
            let s = row.numeric(columns::QUBIT_FREQUENCY_GHZ).unwrap_or(0.0);
            (t - s).abs()
        });
        let d = metric.calculate(&target(5.0, -200.0), &row(4.0, -100.0));
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_categorical_entries_ignored_by_metrics() {
        let t = target(5.0, -200.0).with_tag(columns::RESONATOR_TYPE, "quarter");
        let r = row(5.0, -200.0).with_param(columns::RESONATOR_TYPE, "half");
        assert_eq!(Metric::Euclidean.calculate(&t, &r), 0.0);
        assert_eq!(Metric::Manhattan.calculate(&t, &r), 0.0);
    }
}
