//! Transmon Hamiltonian column annotation.
//!
//! Qubit tables ship capacitance-matrix simulation results; the Hamiltonian
//! columns the matcher ranks against are derived from them. The derivation
//! fixes the Josephson energy from the *target* qubit (frequency,
//! anharmonicity) pair, since the junction is a fabrication knob rather than
//! a simulated one, and evaluates each row's transmon at that junction with its own
//! simulated shunt capacitance. Rows that already carry every derivable
//! column pass through untouched.

use crate::error::{MatchError, MatchResult};
use alsvid_types::physics::{
    self, DEFAULT_LINE_IMPEDANCE,
};
use alsvid_types::{columns, CatalogRecord, ParamValue, ResonatorType, TargetSpec, WorkingTable};
use tracing::debug;

fn has_qubit_columns(record: &CatalogRecord) -> bool {
    record.numeric(columns::QUBIT_FREQUENCY_GHZ).is_some()
        && record.numeric(columns::ANHARMONICITY_MHZ).is_some()
}

fn wants_coupling(record: &CatalogRecord) -> bool {
    record.numeric(columns::CAVITY_FREQUENCY_GHZ).is_some()
        && record.numeric(columns::G_MHZ).is_none()
}

/// Derive `EC`, `EJ`, `qubit_frequency_GHz`, `anharmonicity_MHz`, and (for
/// rows carrying a cavity frequency) `g_MHz` from capacitance-matrix
/// columns.
///
/// The target must supply the qubit frequency and a negative anharmonicity;
/// rows must carry `cross_to_claw` and `cross_to_ground`.
pub fn annotate_transmon_columns(
    table: &WorkingTable,
    target: &TargetSpec,
) -> MatchResult<WorkingTable> {
    let f_q = target
        .numeric(columns::QUBIT_FREQUENCY_GHZ)
        .ok_or_else(|| MatchError::InvalidTarget {
            param: columns::QUBIT_FREQUENCY_GHZ.to_string(),
            reason: "required to fix the Josephson energy".to_string(),
        })?;
    let alpha = target
        .numeric(columns::ANHARMONICITY_MHZ)
        .ok_or_else(|| MatchError::InvalidTarget {
            param: columns::ANHARMONICITY_MHZ.to_string(),
            reason: "required to fix the Josephson energy".to_string(),
        })?;
    if alpha >= 0.0 {
        return Err(MatchError::InvalidTarget {
            param: columns::ANHARMONICITY_MHZ.to_string(),
            reason: "transmon anharmonicity must be negative".to_string(),
        });
    }

    let (ej, _) = physics::transmon_ej_ec(f_q, alpha);
    debug!("annotating transmon columns at EJ = {ej:.3} GHz");

    let mut rows = Vec::with_capacity(table.len());
    for record in table.rows() {
        if has_qubit_columns(record) && !wants_coupling(record) {
            rows.push(record.clone());
            continue;
        }

        let cross_to_claw = record.numeric(columns::CROSS_TO_CLAW).ok_or_else(|| {
            MatchError::MissingColumn(columns::CROSS_TO_CLAW.to_string())
        })?;
        let cross_to_ground = record.numeric(columns::CROSS_TO_GROUND).ok_or_else(|| {
            MatchError::MissingColumn(columns::CROSS_TO_GROUND.to_string())
        })?;

        let c_eff = physics::effective_qubit_capacitance_ff(cross_to_ground, cross_to_claw);
        let ec = physics::charging_energy_ghz(c_eff);

        let mut updated = record.clone();
        updated
            .params
            .insert(columns::EC.to_string(), ParamValue::Number(ec));
        updated
            .params
            .insert(columns::EJ.to_string(), ParamValue::Number(ej));
        updated.params.insert(
            columns::QUBIT_FREQUENCY_GHZ.to_string(),
            ParamValue::Number(physics::transmon_frequency_ghz(ej, ec)),
        );
        updated.params.insert(
            columns::ANHARMONICITY_MHZ.to_string(),
            ParamValue::Number(physics::transmon_anharmonicity_mhz(ec)),
        );

        if let Some(f_cavity) = updated.numeric(columns::CAVITY_FREQUENCY_GHZ) {
            if let Some(topology) = updated
                .text(columns::RESONATOR_TYPE)
                .and_then(|t| t.parse::<ResonatorType>().ok())
            {
                let g = physics::coupling_strength_mhz(
                    cross_to_ground,
                    cross_to_claw,
                    ej,
                    f_cavity,
                    topology,
                    DEFAULT_LINE_IMPEDANCE,
                );
                updated
                    .params
                    .insert(columns::G_MHZ.to_string(), ParamValue::Number(g));
            }
        }
        rows.push(updated);
    }
    Ok(WorkingTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap_matrix_row(cross_to_claw: f64, cross_to_ground: f64) -> CatalogRecord {
        CatalogRecord::new()
            .with_param(columns::CROSS_TO_CLAW, cross_to_claw)
            .with_param(columns::CROSS_TO_GROUND, cross_to_ground)
    }

    fn target() -> TargetSpec {
        TargetSpec::new()
            .with(columns::QUBIT_FREQUENCY_GHZ, 4.8)
            .with(columns::ANHARMONICITY_MHZ, -210.0)
    }

    #[test]
    fn test_annotates_qubit_columns() {
        let table = WorkingTable::new(vec![
            cap_matrix_row(4.0, 60.0),
            cap_matrix_row(5.5, 90.0),
        ]);
        let annotated = annotate_transmon_columns(&table, &target()).unwrap();

        for row in annotated.rows() {
            assert!(row.numeric(columns::EC).unwrap() > 0.0);
            assert!(row.numeric(columns::EJ).unwrap() > 0.0);
            assert!(row.numeric(columns::QUBIT_FREQUENCY_GHZ).unwrap() > 0.0);
            assert!(row.numeric(columns::ANHARMONICITY_MHZ).unwrap() < 0.0);
        }
        // A bigger shunt means smaller EC, so a smaller |anharmonicity|.
        let a0 = annotated.row(0).unwrap().numeric(columns::ANHARMONICITY_MHZ).unwrap();
        let a1 = annotated.row(1).unwrap().numeric(columns::ANHARMONICITY_MHZ).unwrap();
        assert!(a1 > a0, "larger capacitance must soften anharmonicity");
    }

    #[test]
    fn test_annotates_coupling_for_cavity_rows() {
        let row = cap_matrix_row(4.0, 60.0)
            .with_param(columns::CAVITY_FREQUENCY_GHZ, 6.8)
            .with_param(columns::RESONATOR_TYPE, "quarter");
        let annotated =
            annotate_transmon_columns(&WorkingTable::new(vec![row]), &target()).unwrap();
        let g = annotated.row(0).unwrap().numeric(columns::G_MHZ).unwrap();
        assert!(g > 0.0 && g < 1000.0, "g = {g} MHz");
    }

    #[test]
    fn test_complete_rows_pass_through() {
        let row = CatalogRecord::new()
            .with_param(columns::QUBIT_FREQUENCY_GHZ, 5.0)
            .with_param(columns::ANHARMONICITY_MHZ, -200.0);
        let table = WorkingTable::new(vec![row.clone()]);
        let annotated = annotate_transmon_columns(&table, &target()).unwrap();
        assert_eq!(annotated.row(0).unwrap(), &row);
    }

    #[test]
    fn test_positive_anharmonicity_rejected() {
        let table = WorkingTable::new(vec![cap_matrix_row(4.0, 60.0)]);
        let bad = TargetSpec::new()
            .with(columns::QUBIT_FREQUENCY_GHZ, 4.8)
            .with(columns::ANHARMONICITY_MHZ, 210.0);
        assert!(matches!(
            annotate_transmon_columns(&table, &bad),
            Err(MatchError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_missing_cap_matrix_column_rejected() {
        let table = WorkingTable::new(vec![
            CatalogRecord::new().with_param(columns::CROSS_TO_CLAW, 4.0)
        ]);
        assert!(matches!(
            annotate_transmon_columns(&table, &target()),
            Err(MatchError::MissingColumn(col)) if col == columns::CROSS_TO_GROUND
        ));
    }
}
