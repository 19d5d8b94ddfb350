//! Table joins and column normalization.
//!
//! A qubit table and a cavity table are populated independently; a coupled
//! device only makes sense where the two share the same coupling-capacitor
//! (claw) geometry. The inner join here pairs rows on those shared claw
//! dimensions and merges the two `design_options` trees into the unified
//! structure, one coherent record per device.

use crate::error::CatalogResult;
use alsvid_types::{
    columns, CatalogRecord, CavityClawOptions, CoupledDesign, DesignOptions, DesignSlot,
    ParamValue, ReadoutPad, WorkingTable,
};
use alsvid_types::physics;
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Claw dimensions shared between qubit and cavity tables.
///
/// `claw_length` is the one dimension both tables are swept over; width and
/// gap are accepted for catalogs that sweep all three.
pub const CLAW_MERGER_TERMS: &[&str] = &["claw_length"];

/// Coupler geometry terms shared between cavity and interdigitated-capacitor
/// tables.
pub const NCAP_MERGER_TERMS: &[&str] = &["prime_width", "prime_gap", "second_width", "second_gap"];

fn pad_term(pad: &ReadoutPad, term: &str) -> Option<String> {
    match term {
        "claw_length" => Some(pad.claw_length.to_string()),
        "claw_width" => Some(pad.claw_width.to_string()),
        "claw_gap" => Some(pad.claw_gap.to_string()),
        other => pad.extra.get(other).map(value_key),
    }
}

fn value_key(value: &Value) -> String {
    value.to_string()
}

fn qubit_join_key(record: &CatalogRecord, terms: &[&str]) -> Option<Vec<String>> {
    let pad = &record.qubit_options()?.connection_pads.readout;
    terms.iter().map(|t| pad_term(pad, t)).collect()
}

fn cavity_join_key(record: &CatalogRecord, terms: &[&str]) -> Option<Vec<String>> {
    let pad = &record.cavity_options()?.claw_opts.connection_pads.readout;
    terms.iter().map(|t| pad_term(pad, t)).collect()
}

fn coupler_join_key(opts_terms: &serde_json::Map<String, Value>, terms: &[&str]) -> Option<Vec<String>> {
    terms
        .iter()
        .map(|t| opts_terms.get(*t).map(value_key))
        .collect()
}

/// Merge two parameter maps; columns present in both move to suffixed
/// variants (`_qubit` / `_cavity_claw`) instead of one silently winning.
fn merge_params(
    qubit: &FxHashMap<String, ParamValue>,
    cavity: &FxHashMap<String, ParamValue>,
) -> FxHashMap<String, ParamValue> {
    let mut merged = FxHashMap::default();
    for (key, value) in qubit {
        if cavity.contains_key(key) {
            merged.insert(format!("{key}_qubit"), value.clone());
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in cavity {
        if qubit.contains_key(key) {
            merged.insert(format!("{key}_cavity_claw"), value.clone());
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Inner-join a qubit table and a cavity table on shared claw geometry.
///
/// Row pairs are emitted in (qubit row, cavity row) table order, so the join
/// is deterministic. Each joined record carries both component trees plus the
/// unified design options. No overlap yields an empty table; refusing to
/// match against it is the matcher's job, not the selector's.
pub fn join_qubit_cavity(
    qubit: &WorkingTable,
    cavity: &WorkingTable,
    terms: &[&str],
    coupler_type: &str,
) -> WorkingTable {
    let mut by_key: FxHashMap<Vec<String>, Vec<usize>> = FxHashMap::default();
    for (idx, record) in cavity.rows().iter().enumerate() {
        if let Some(key) = cavity_join_key(record, terms) {
            by_key.entry(key).or_default().push(idx);
        }
    }

    let mut rows = Vec::new();
    for qubit_record in qubit.rows() {
        let Some(key) = qubit_join_key(qubit_record, terms) else {
            continue;
        };
        let Some(cavity_indices) = by_key.get(&key) else {
            continue;
        };
        let Some(qubit_opts) = qubit_record.qubit_options() else {
            continue;
        };
        for &cavity_idx in cavity_indices {
            let cavity_record = &cavity.rows()[cavity_idx];
            let Some(cavity_opts) = cavity_record.cavity_options() else {
                continue;
            };
            let unified = DesignOptions::unify(qubit_opts, cavity_opts, coupler_type);
            rows.push(CatalogRecord {
                params: merge_params(&qubit_record.params, &cavity_record.params),
                design: DesignSlot::Coupled(Box::new(CoupledDesign {
                    qubit: qubit_opts.clone(),
                    cavity_claw: cavity_opts.clone(),
                    unified,
                })),
            });
        }
    }
    WorkingTable::new(rows)
}

/// Rename and rescale raw-Hz cavity columns to the engine's working units
/// (`cavity_frequency` → GHz, `kappa` → kHz). Tables already normalized are
/// returned unchanged.
pub fn normalize_cavity_columns(table: &WorkingTable) -> WorkingTable {
    if !table.has_column(columns::CAVITY_FREQUENCY_RAW) && !table.has_column(columns::KAPPA_RAW) {
        return table.clone();
    }
    table.map_rows(|record| {
        let mut record = record.clone();
        if let Some(hz) = record.numeric(columns::CAVITY_FREQUENCY_RAW) {
            record.params.remove(columns::CAVITY_FREQUENCY_RAW);
            record
                .params
                .insert(columns::CAVITY_FREQUENCY_GHZ.to_string(), ParamValue::Number(hz / 1e9));
        }
        if let Some(hz) = record.numeric(columns::KAPPA_RAW) {
            record.params.remove(columns::KAPPA_RAW);
            record
                .params
                .insert(columns::KAPPA_KHZ.to_string(), ParamValue::Number(hz / 1e3));
        }
        record
    })
}

/// Fold interdigitated-capacitor coupler simulations into a half-wave cavity
/// table: rows are paired on the coupler geometry terms, the coupler's
/// capacitances replace the rough eigenmode frequency and linewidth with the
/// loaded values, and the coupler knobs are copied onto the cavity's coupler
/// options. Cavity rows without a matching coupler row are dropped.
pub fn apply_coupler_loading(
    cavity: &WorkingTable,
    ncap: &WorkingTable,
    terms: &[&str],
    line_impedance: f64,
) -> CatalogResult<WorkingTable> {
    let mut by_key: FxHashMap<Vec<String>, usize> = FxHashMap::default();
    for (idx, record) in ncap.rows().iter().enumerate() {
        let DesignSlot::Coupler(opts) = &record.design else {
            continue;
        };
        if let Some(key) = coupler_join_key(&opts.extra, terms) {
            by_key.entry(key).or_insert(idx);
        }
    }

    let mut rows = Vec::new();
    for record in cavity.rows() {
        let Some(cavity_opts) = record.cavity_options() else {
            continue;
        };
        let Some(key) = coupler_join_key(&cavity_opts.cplr_opts.extra, terms) else {
            continue;
        };
        let Some(&ncap_idx) = by_key.get(&key) else {
            continue;
        };
        let ncap_record = &ncap.rows()[ncap_idx];
        let (Some(c_tg), Some(c_tb)) = (
            ncap_record.numeric(columns::TOP_TO_GROUND),
            ncap_record.numeric(columns::TOP_TO_BOTTOM),
        ) else {
            continue;
        };
        let Some(rough_hz) = record.numeric(columns::CAVITY_FREQUENCY_RAW) else {
            continue;
        };

        let (loaded_hz, kappa_hz) =
            physics::loaded_cavity_params(rough_hz, c_tg, c_tb, line_impedance);

        let mut updated = record.clone();
        updated.params.insert(
            columns::CAVITY_FREQUENCY_RAW.to_string(),
            ParamValue::Number(loaded_hz),
        );
        updated
            .params
            .insert(columns::KAPPA_RAW.to_string(), ParamValue::Number(kappa_hz));

        if let DesignSlot::Coupler(ncap_opts) = &ncap_record.design {
            let mut cavity_opts = cavity_opts.clone();
            copy_coupler_knobs(&mut cavity_opts, ncap_opts);
            updated.design = DesignSlot::CavityClaw(cavity_opts);
        }
        rows.push(updated);
    }
    Ok(WorkingTable::new(rows))
}

fn copy_coupler_knobs(
    cavity: &mut CavityClawOptions,
    ncap: &alsvid_types::CouplerOptions,
) {
    if ncap.coupling_length.is_some() {
        cavity.cplr_opts.coupling_length = ncap.coupling_length;
    }
    let shared: Vec<String> = cavity
        .cplr_opts
        .extra
        .keys()
        .filter(|k| ncap.extra.contains_key(*k))
        .cloned()
        .collect();
    for key in shared {
        cavity.cplr_opts.extra.insert(key.clone(), ncap.extra[&key].clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_types::{ConnectionPads, CouplerOptions, PhysicalQuantity, QubitOptions};
    use serde_json::json;

    fn qubit_record(claw_length: f64, freq: f64) -> CatalogRecord {
        let mut opts = QubitOptions {
            cross_length: PhysicalQuantity::um(200.0),
            connection_pads: ConnectionPads::default(),
            ..Default::default()
        };
        opts.connection_pads.readout.claw_length = PhysicalQuantity::um(claw_length);
        CatalogRecord::new()
            .with_param(columns::QUBIT_FREQUENCY_GHZ, freq)
            .with_param(columns::CROSS_TO_CLAW, 4.0)
            .with_design(DesignSlot::Qubit(opts))
    }

    fn cavity_record(claw_length: f64, freq_ghz: f64) -> CatalogRecord {
        let mut opts = CavityClawOptions::default()
            .with_total_length(PhysicalQuantity::um(4000.0))
            .with_coupling_length(PhysicalQuantity::um(200.0));
        opts.claw_opts.connection_pads.readout.claw_length = PhysicalQuantity::um(claw_length);
        CatalogRecord::new()
            .with_param(columns::CAVITY_FREQUENCY_GHZ, freq_ghz)
            .with_param(columns::COUPLER_TYPE, "CLT")
            .with_design(DesignSlot::CavityClaw(opts))
    }

    #[test]
    fn test_join_pairs_matching_claws() {
        let qubits = WorkingTable::new(vec![qubit_record(180.0, 4.0), qubit_record(220.0, 5.0)]);
        let cavities =
            WorkingTable::new(vec![cavity_record(220.0, 6.8), cavity_record(240.0, 7.2)]);

        let joined = join_qubit_cavity(&qubits, &cavities, CLAW_MERGER_TERMS, "CLT");
        assert_eq!(joined.len(), 1);

        let row = joined.row(0).unwrap();
        assert_eq!(row.numeric(columns::QUBIT_FREQUENCY_GHZ), Some(5.0));
        assert_eq!(row.numeric(columns::CAVITY_FREQUENCY_GHZ), Some(6.8));
        let unified = row.unified_options().unwrap();
        assert_eq!(unified.cavity_claw_options.coupler_type, "CLT");
    }

    #[test]
    fn test_join_without_overlap_is_empty() {
        let qubits = WorkingTable::new(vec![qubit_record(100.0, 4.0)]);
        let cavities = WorkingTable::new(vec![cavity_record(220.0, 6.8)]);
        let joined = join_qubit_cavity(&qubits, &cavities, CLAW_MERGER_TERMS, "CLT");
        assert!(joined.is_empty());
    }

    #[test]
    fn test_join_suffixes_colliding_columns() {
        let qubit = qubit_record(180.0, 4.0).with_param("renderer", "q3d");
        let cavity = cavity_record(180.0, 6.8).with_param("renderer", "hfss");
        let joined = join_qubit_cavity(
            &WorkingTable::new(vec![qubit]),
            &WorkingTable::new(vec![cavity]),
            CLAW_MERGER_TERMS,
            "CLT",
        );
        let row = joined.row(0).unwrap();
        assert_eq!(row.text("renderer_qubit"), Some("q3d"));
        assert_eq!(row.text("renderer_cavity_claw"), Some("hfss"));
        assert_eq!(row.text("renderer"), None);
    }

    #[test]
    fn test_normalize_cavity_columns() {
        let table = WorkingTable::new(vec![CatalogRecord::new()
            .with_param(columns::CAVITY_FREQUENCY_RAW, 6.8e9)
            .with_param(columns::KAPPA_RAW, 120_000.0)]);
        let normalized = normalize_cavity_columns(&table);
        let row = normalized.row(0).unwrap();
        assert_eq!(row.numeric(columns::CAVITY_FREQUENCY_GHZ), Some(6.8));
        assert_eq!(row.numeric(columns::KAPPA_KHZ), Some(120.0));
        assert_eq!(row.numeric(columns::CAVITY_FREQUENCY_RAW), None);
    }

    #[test]
    fn test_coupler_loading_lowers_frequency() {
        let mut cavity_opts = CavityClawOptions::default();
        cavity_opts.cplr_opts.extra.insert("prime_width".into(), json!("10um"));
        cavity_opts.cplr_opts.extra.insert("prime_gap".into(), json!("6um"));
        cavity_opts.cplr_opts.extra.insert("second_width".into(), json!("10um"));
        cavity_opts.cplr_opts.extra.insert("second_gap".into(), json!("6um"));
        let cavity = WorkingTable::new(vec![CatalogRecord::new()
            .with_param(columns::CAVITY_FREQUENCY_RAW, 6.8e9)
            .with_design(DesignSlot::CavityClaw(cavity_opts))]);

        let mut ncap_opts = CouplerOptions::default();
        ncap_opts.extra.insert("prime_width".into(), json!("10um"));
        ncap_opts.extra.insert("prime_gap".into(), json!("6um"));
        ncap_opts.extra.insert("second_width".into(), json!("10um"));
        ncap_opts.extra.insert("second_gap".into(), json!("6um"));
        ncap_opts.extra.insert("finger_count".into(), json!("5"));
        let ncap = WorkingTable::new(vec![CatalogRecord::new()
            .with_param(columns::TOP_TO_GROUND, 40.0)
            .with_param(columns::TOP_TO_BOTTOM, 30.0)
            .with_design(DesignSlot::Coupler(ncap_opts))]);

        let loaded = apply_coupler_loading(&cavity, &ncap, NCAP_MERGER_TERMS, 50.0).unwrap();
        assert_eq!(loaded.len(), 1);
        let row = loaded.row(0).unwrap();
        let f = row.numeric(columns::CAVITY_FREQUENCY_RAW).unwrap();
        assert!(f < 6.8e9, "loading must pull the frequency down, got {f}");
        assert!(row.numeric(columns::KAPPA_RAW).unwrap() > 0.0);
    }

    #[test]
    fn test_coupler_loading_drops_unmatched_rows() {
        let mut cavity_opts = CavityClawOptions::default();
        cavity_opts.cplr_opts.extra.insert("prime_width".into(), json!("12um"));
        cavity_opts.cplr_opts.extra.insert("prime_gap".into(), json!("6um"));
        cavity_opts.cplr_opts.extra.insert("second_width".into(), json!("10um"));
        cavity_opts.cplr_opts.extra.insert("second_gap".into(), json!("6um"));
        let cavity = WorkingTable::new(vec![CatalogRecord::new()
            .with_param(columns::CAVITY_FREQUENCY_RAW, 6.8e9)
            .with_design(DesignSlot::CavityClaw(cavity_opts))]);

        let loaded =
            apply_coupler_loading(&cavity, &WorkingTable::default(), NCAP_MERGER_TERMS, 50.0)
                .unwrap();
        assert!(loaded.is_empty());
    }
}
