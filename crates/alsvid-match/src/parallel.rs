//! Partitioned search for large tables.
//!
//! The half-wavelength resonator dataset is big enough that a full-table
//! scan is worth splitting across cores. Each partition produces its own
//! bounded top-k over the shared read-only table; the winners are re-sorted
//! globally by `(distance, original row index)`, which makes the result
//! identical to the sequential path, tie-breaks included.

use crate::error::MatchResult;
use crate::matcher::{DesignMatcher, MatchOutcome};
use crate::metric::Metric;
use alsvid_types::TargetSpec;
use rayon::prelude::*;

impl DesignMatcher<'_> {
    /// Parallel [`find_closest`](Self::find_closest): same preconditions,
    /// same diagnostics, same ranking, split over `partitions` workers.
    pub fn find_closest_par(
        &self,
        target: &TargetSpec,
        num_top: usize,
        metric: &Metric,
        partitions: usize,
    ) -> MatchResult<MatchOutcome> {
        let (candidates, diagnostics) = self.prepare(target, num_top, metric)?;

        let chunk_len = candidates.len().div_ceil(partitions.max(1)).max(1);
        let winners: Vec<(usize, f64)> = candidates
            .par_chunks(chunk_len)
            .flat_map_iter(|part| {
                let mut scored: Vec<(usize, f64)> = part
                    .iter()
                    .map(|&idx| (idx, metric.calculate(target, &self.table().rows()[idx])))
                    .collect();
                scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
                scored.truncate(num_top);
                scored
            })
            .collect();

        Ok(self.finalize(winners, num_top, target, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_types::{columns, CatalogRecord, WorkingTable};

    fn synthetic_table(rows: usize) -> WorkingTable {
        (0..rows)
            .map(|i| {
                // Deterministic pseudo-spread over realistic ranges.
                let f = 3.0 + 5.0 * ((i as f64 * 0.7311).sin().abs());
                let k = 50.0 + 400.0 * ((i as f64 * 0.2713).cos().abs());
                CatalogRecord::new()
                    .with_param(columns::CAVITY_FREQUENCY_GHZ, f)
                    .with_param(columns::KAPPA_KHZ, k)
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let table = synthetic_table(500);
        let matcher = DesignMatcher::new(&table);
        let target = TargetSpec::new()
            .with(columns::CAVITY_FREQUENCY_GHZ, 6.1)
            .with(columns::KAPPA_KHZ, 180.0);

        let seq = matcher.find_closest(&target, 25, &Metric::Euclidean).unwrap();
        for partitions in [1, 2, 7, 16] {
            let par = matcher
                .find_closest_par(&target, 25, &Metric::Euclidean, partitions)
                .unwrap();
            let seq_rows: Vec<(f64, f64)> = seq
                .matches
                .iter()
                .map(|m| {
                    (
                        m.record.numeric(columns::CAVITY_FREQUENCY_GHZ).unwrap(),
                        m.distance,
                    )
                })
                .collect();
            let par_rows: Vec<(f64, f64)> = par
                .matches
                .iter()
                .map(|m| {
                    (
                        m.record.numeric(columns::CAVITY_FREQUENCY_GHZ).unwrap(),
                        m.distance,
                    )
                })
                .collect();
            assert_eq!(seq_rows, par_rows, "partitions = {partitions}");
        }
    }

    #[test]
    fn test_parallel_preserves_tie_break_order() {
        // All rows identical: every distance ties, so the result must be the
        // first `num_top` rows in table order.
        let table: WorkingTable = (0..64)
            .map(|i| {
                CatalogRecord::new()
                    .with_param(columns::CAVITY_FREQUENCY_GHZ, 6.0)
                    .with_param("row_id", i as f64)
            })
            .collect();
        let target = TargetSpec::new().with(columns::CAVITY_FREQUENCY_GHZ, 6.0);
        let outcome = DesignMatcher::new(&table)
            .find_closest_par(&target, 10, &Metric::Euclidean, 8)
            .unwrap();
        let ids: Vec<f64> = outcome
            .matches
            .iter()
            .map(|m| m.record.numeric("row_id").unwrap())
            .collect();
        assert_eq!(ids, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_shares_precondition_checks() {
        let table = synthetic_table(5);
        let matcher = DesignMatcher::new(&table);
        let target = TargetSpec::new().with(columns::CAVITY_FREQUENCY_GHZ, 6.0);
        assert!(matcher
            .find_closest_par(&target, 10, &Metric::Euclidean, 4)
            .is_err());
    }
}
