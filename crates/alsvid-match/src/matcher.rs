//! Nearest-design search over a working table.

use crate::diagnostics::Diagnostic;
use crate::error::{MatchError, MatchResult};
use crate::metric::Metric;
use alsvid_types::{CatalogRecord, TargetSpec, WorkingTable};
use serde::Serialize;

/// A catalog record annotated with its distance to the target.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    /// The full catalog record, all columns.
    pub record: CatalogRecord,
    /// Distance under the metric of the call.
    pub distance: f64,
    /// Whether the record satisfies every categorical constraint of the
    /// target. `false` only when the categorical filter degraded to advisory.
    pub constraint_satisfied: bool,
}

/// Ranked matches plus the advisory diagnostics of the call.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// Matches in ascending distance order; ties keep table order.
    pub matches: Vec<RankedMatch>,
    /// Advisory diagnostics observed during the call.
    pub diagnostics: Vec<Diagnostic>,
}

impl MatchOutcome {
    /// The single closest match, if any.
    pub fn best(&self) -> Option<&RankedMatch> {
        self.matches.first()
    }
}

/// Ranks working-table rows against a target parameter vector.
///
/// The matcher borrows its table: it never mutates rows, and a new selection
/// simply means constructing a new matcher over the new table.
#[derive(Debug, Clone, Copy)]
pub struct DesignMatcher<'a> {
    table: &'a WorkingTable,
}

impl<'a> DesignMatcher<'a> {
    /// Create a matcher over a working table.
    pub fn new(table: &'a WorkingTable) -> Self {
        Self { table }
    }

    /// The table being searched.
    pub fn table(&self) -> &'a WorkingTable {
        self.table
    }

    /// Find the `num_top` closest rows to the target under the given metric.
    ///
    /// Numeric targets outside the observed column bounds and categorical
    /// constraints with no matching rows are advisory: they produce
    /// [`Diagnostic`]s, not errors. Precondition violations (`num_top` larger
    /// than the table, unknown columns, zero targets under a relative metric)
    /// fail before any distance is computed.
    pub fn find_closest(
        &self,
        target: &TargetSpec,
        num_top: usize,
        metric: &Metric,
    ) -> MatchResult<MatchOutcome> {
        let (candidates, diagnostics) = self.prepare(target, num_top, metric)?;
        let scored: Vec<(usize, f64)> = candidates
            .iter()
            .map(|&idx| (idx, metric.calculate(target, &self.table.rows()[idx])))
            .collect();
        Ok(self.finalize(scored, num_top, target, diagnostics))
    }

    /// Precondition checks and advisory filtering shared by the sequential
    /// and parallel paths. Returns candidate row indices in table order.
    pub(crate) fn prepare(
        &self,
        target: &TargetSpec,
        num_top: usize,
        metric: &Metric,
    ) -> MatchResult<(Vec<usize>, Vec<Diagnostic>)> {
        if self.table.is_empty() {
            return Err(MatchError::EmptyTable);
        }
        if num_top > self.table.len() {
            return Err(MatchError::TopCountTooLarge {
                requested: num_top,
                available: self.table.len(),
            });
        }
        for key in target.keys() {
            if !self.table.has_column(key) {
                return Err(MatchError::MissingColumn(key.to_string()));
            }
        }
        metric.validate_target(target)?;

        let mut diagnostics = Vec::new();
        if metric.uses_default_weights() {
            diagnostics.push(Diagnostic::DefaultWeights);
        }

        for (key, value) in target.numeric_entries() {
            if let Some((min, max)) = self.table.numeric_range(key) {
                if value < min || value > max {
                    diagnostics.push(Diagnostic::OutOfBounds {
                        param: key.to_string(),
                        value,
                        min,
                        max,
                    });
                }
            }
        }

        let mut candidates: Vec<usize> = (0..self.table.len()).collect();
        let constraints: Vec<(String, String)> = target
            .tag_entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if !constraints.is_empty() {
            let filtered: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&idx| satisfies_constraints(&self.table.rows()[idx], target))
                .collect();
            if filtered.is_empty() {
                diagnostics.push(Diagnostic::NoCategoricalMatch { constraints });
            } else {
                candidates = filtered;
            }
        }

        for diagnostic in &diagnostics {
            diagnostic.emit();
        }
        Ok((candidates, diagnostics))
    }

    /// Rank scored candidates and materialize the outcome. Sorting is by
    /// `(distance, original row index)`, so equal distances keep table order
    /// no matter how the scores were produced.
    pub(crate) fn finalize(
        &self,
        mut scored: Vec<(usize, f64)>,
        num_top: usize,
        target: &TargetSpec,
        diagnostics: Vec<Diagnostic>,
    ) -> MatchOutcome {
        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(num_top);

        let matches = scored
            .into_iter()
            .map(|(idx, distance)| {
                let record = self.table.rows()[idx].clone();
                let constraint_satisfied = satisfies_constraints(&record, target);
                RankedMatch {
                    record,
                    distance,
                    constraint_satisfied,
                }
            })
            .collect();
        MatchOutcome {
            matches,
            diagnostics,
        }
    }
}

fn satisfies_constraints(record: &CatalogRecord, target: &TargetSpec) -> bool {
    target
        .tag_entries()
        .all(|(key, value)| record.text(key) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_types::columns;

    fn five_row_table() -> WorkingTable {
        let freqs = [3.0, 4.0, 5.0, 6.0, 7.0];
        let alphas = [-150.0, -180.0, -200.0, -220.0, -250.0];
        freqs
            .iter()
            .zip(alphas)
            .map(|(&f, a)| {
                CatalogRecord::new()
                    .with_param(columns::QUBIT_FREQUENCY_GHZ, f)
                    .with_param(columns::ANHARMONICITY_MHZ, a)
            })
            .collect()
    }

    fn target() -> TargetSpec {
        TargetSpec::new()
            .with(columns::QUBIT_FREQUENCY_GHZ, 5.1)
            .with(columns::ANHARMONICITY_MHZ, -205.0)
    }

    #[test]
    fn test_ranks_reference_scenario() {
        let table = five_row_table();
        let outcome = DesignMatcher::new(&table)
            .find_closest(&target(), 2, &Metric::Euclidean)
            .unwrap();

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(
            outcome.matches[0].record.numeric(columns::QUBIT_FREQUENCY_GHZ),
            Some(5.0)
        );
        assert_eq!(
            outcome.matches[1].record.numeric(columns::QUBIT_FREQUENCY_GHZ),
            Some(6.0)
        );
        assert!(outcome.matches[0].distance <= outcome.matches[1].distance);
    }

    #[test]
    fn test_num_top_exceeding_table_is_configuration_error() {
        let table = five_row_table();
        let result = DesignMatcher::new(&table).find_closest(&target(), 10, &Metric::Euclidean);
        assert!(matches!(
            result,
            Err(MatchError::TopCountTooLarge {
                requested: 10,
                available: 5
            })
        ));
    }

    #[test]
    fn test_empty_table_is_refused() {
        let table = WorkingTable::default();
        let result = DesignMatcher::new(&table).find_closest(&target(), 1, &Metric::Euclidean);
        assert!(matches!(result, Err(MatchError::EmptyTable)));
    }

    #[test]
    fn test_unknown_target_column_is_rejected() {
        let table = five_row_table();
        let bad_target = target().with(columns::KAPPA_KHZ, 120.0);
        let result = DesignMatcher::new(&table).find_closest(&bad_target, 1, &Metric::Euclidean);
        assert!(matches!(
            result,
            Err(MatchError::MissingColumn(col)) if col == columns::KAPPA_KHZ
        ));
    }

    #[test]
    fn test_out_of_bounds_target_still_ranked() {
        let table = five_row_table();
        let wild = TargetSpec::new()
            .with(columns::QUBIT_FREQUENCY_GHZ, 15.0)
            .with(columns::ANHARMONICITY_MHZ, -205.0);
        let outcome = DesignMatcher::new(&table)
            .find_closest(&wild, 1, &Metric::Euclidean)
            .unwrap();

        assert!(outcome.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::OutOfBounds { param, min, max, .. }
                if param == columns::QUBIT_FREQUENCY_GHZ && *min == 3.0 && *max == 7.0
        )));
        // The closest row (7 GHz) is still returned.
        assert_eq!(
            outcome.best().unwrap().record.numeric(columns::QUBIT_FREQUENCY_GHZ),
            Some(7.0)
        );
    }

    #[test]
    fn test_categorical_filter_restricts_candidates() {
        let table: WorkingTable = five_row_table()
            .rows()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                r.clone().with_param(
                    columns::RESONATOR_TYPE,
                    if i % 2 == 0 { "quarter" } else { "half" },
                )
            })
            .collect();

        let constrained = target().with_tag(columns::RESONATOR_TYPE, "half");
        let outcome = DesignMatcher::new(&table)
            .find_closest(&constrained, 2, &Metric::Euclidean)
            .unwrap();

        for m in &outcome.matches {
            assert_eq!(m.record.text(columns::RESONATOR_TYPE), Some("half"));
            assert!(m.constraint_satisfied);
        }
        // Best half-wave row is 6 GHz; the closer 5 GHz row is quarter-wave.
        assert_eq!(
            outcome.best().unwrap().record.numeric(columns::QUBIT_FREQUENCY_GHZ),
            Some(6.0)
        );
    }

    #[test]
    fn test_empty_categorical_filter_degrades_to_advisory() {
        let table: WorkingTable = five_row_table()
            .rows()
            .iter()
            .map(|r| r.clone().with_param(columns::RESONATOR_TYPE, "quarter"))
            .collect();

        let constrained = target().with_tag(columns::RESONATOR_TYPE, "half");
        let outcome = DesignMatcher::new(&table)
            .find_closest(&constrained, 2, &Metric::Euclidean)
            .unwrap();

        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NoCategoricalMatch { .. })));
        assert_eq!(outcome.matches.len(), 2);
        // The numeric ranking is authoritative, but the violation is surfaced.
        assert!(outcome.matches.iter().all(|m| !m.constraint_satisfied));
        assert_eq!(
            outcome.best().unwrap().record.numeric(columns::QUBIT_FREQUENCY_GHZ),
            Some(5.0)
        );
    }

    #[test]
    fn test_ties_keep_table_order() {
        let table: WorkingTable = [5.0, 5.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                CatalogRecord::new()
                    .with_param(columns::QUBIT_FREQUENCY_GHZ, f)
                    .with_param("row_id", i as f64)
            })
            .collect();
        let t = TargetSpec::new().with(columns::QUBIT_FREQUENCY_GHZ, 5.0);
        let outcome = DesignMatcher::new(&table)
            .find_closest(&t, 3, &Metric::Euclidean)
            .unwrap();
        let ids: Vec<f64> = outcome
            .matches
            .iter()
            .map(|m| m.record.numeric("row_id").unwrap())
            .collect();
        assert_eq!(ids, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_default_weights_diagnostic_emitted_once() {
        let table = five_row_table();
        let metric = Metric::WeightedEuclidean { weights: None };
        let outcome = DesignMatcher::new(&table)
            .find_closest(&target(), 2, &metric)
            .unwrap();
        let count = outcome
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::DefaultWeights))
            .count();
        assert_eq!(count, 1);

        // And the ranking is identical to plain Euclidean.
        let plain = DesignMatcher::new(&table)
            .find_closest(&target(), 2, &Metric::Euclidean)
            .unwrap();
        let dists: Vec<f64> = outcome.matches.iter().map(|m| m.distance).collect();
        let plain_dists: Vec<f64> = plain.matches.iter().map(|m| m.distance).collect();
        assert_eq!(dists, plain_dists);
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let table = five_row_table();
        let matcher = DesignMatcher::new(&table);
        let a = matcher.find_closest(&target(), 3, &Metric::Euclidean).unwrap();
        let b = matcher.find_closest(&target(), 3, &Metric::Euclidean).unwrap();
        let da: Vec<f64> = a.matches.iter().map(|m| m.distance).collect();
        let db: Vec<f64> = b.matches.iter().map(|m| m.distance).collect();
        assert_eq!(da, db);
    }
}
