//! Closed-form circuit physics.
//!
//! The transmon and resonator relations used to derive Hamiltonian columns
//! from capacitance-matrix simulation results and to back geometry scale
//! ratios out of target parameters. Transmon levels use the asymptotic
//! expressions `f01 = sqrt(8*EJ*EC) - EC`, `alpha = -EC`, valid in the
//! EJ/EC >> 1 regime the catalog covers.

use crate::params::ResonatorType;
use std::f64::consts::PI;

/// Planck constant, J·s (CODATA 2018 exact).
pub const PLANCK_H: f64 = 6.626_070_15e-34;

/// Reduced Planck constant, J·s.
pub const HBAR: f64 = PLANCK_H / (2.0 * PI);

/// Elementary charge, C (CODATA 2018 exact).
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Magnetic flux quantum `h / 2e`, Wb.
pub const FLUX_QUANTUM: f64 = PLANCK_H / (2.0 * ELEMENTARY_CHARGE);

/// Default transmission-line characteristic impedance, Ω.
pub const DEFAULT_LINE_IMPEDANCE: f64 = 50.0;

/// Charging energy in GHz of a shunt capacitance in fF: `e² / 2C / h`.
pub fn charging_energy_ghz(capacitance_ff: f64) -> f64 {
    let c = capacitance_ff * 1e-15;
    let ec_joules = ELEMENTARY_CHARGE * ELEMENTARY_CHARGE / (2.0 * c);
    ec_joules / PLANCK_H * 1e-9
}

/// Effective qubit shunt capacitance in fF from the capacitance matrix.
pub fn effective_qubit_capacitance_ff(cross_to_ground_ff: f64, cross_to_claw_ff: f64) -> f64 {
    cross_to_ground_ff.abs() + cross_to_claw_ff.abs()
}

/// Transmon 0→1 transition frequency in GHz.
pub fn transmon_frequency_ghz(ej_ghz: f64, ec_ghz: f64) -> f64 {
    (8.0 * ej_ghz * ec_ghz).sqrt() - ec_ghz
}

/// Transmon anharmonicity in MHz (negative).
pub fn transmon_anharmonicity_mhz(ec_ghz: f64) -> f64 {
    -ec_ghz * 1e3
}

/// Invert the transmon relations: EJ and EC in GHz from a target frequency
/// (GHz) and anharmonicity (MHz, negative).
pub fn transmon_ej_ec(frequency_ghz: f64, anharmonicity_mhz: f64) -> (f64, f64) {
    let ec = -anharmonicity_mhz * 1e-3;
    let sum = frequency_ghz + ec;
    let ej = sum * sum / (8.0 * ec);
    (ej, ec)
}

/// Josephson inductance in nH equivalent to a Josephson energy in GHz:
/// `Lj = (Φ₀/2π)² / (h·EJ)`.
pub fn josephson_inductance_nh(ej_ghz: f64) -> f64 {
    let phi = FLUX_QUANTUM / (2.0 * PI);
    phi * phi / (PLANCK_H * ej_ghz * 1e9) * 1e9
}

/// Josephson energy in GHz of a junction inductance in nH.
pub fn josephson_energy_ghz(lj_nh: f64) -> f64 {
    let phi = FLUX_QUANTUM / (2.0 * PI);
    phi * phi / (PLANCK_H * lj_nh * 1e-9) * 1e-9
}

/// Qubit–resonator coupling strength in MHz from the capacitance matrix.
///
/// `g = (C_c/C_q)·ω_r·sqrt(n·Z₀·e²/(ħπ))·(EJ/8EC)^¼ / 2π`, with the mode
/// prefactor `n` set by the resonator topology.
pub fn coupling_strength_mhz(
    cross_to_ground_ff: f64,
    cross_to_claw_ff: f64,
    ej_ghz: f64,
    cavity_frequency_ghz: f64,
    topology: ResonatorType,
    line_impedance: f64,
) -> f64 {
    let c = cross_to_ground_ff.abs() * 1e-15;
    let c_c = cross_to_claw_ff.abs() * 1e-15;
    let c_q = c + c_c;
    let omega_r = 2.0 * PI * cavity_frequency_ghz * 1e9;
    let ec_ghz = charging_energy_ghz(c_q * 1e15);

    let prefactor = (topology.coupling_prefactor() * line_impedance * ELEMENTARY_CHARGE
        * ELEMENTARY_CHARGE
        / (HBAR * PI))
        .sqrt();
    let g = (c_c / c_q) * omega_r * prefactor * (ej_ghz / (8.0 * ec_ghz)).powf(0.25);
    g * 1e-6 / (2.0 * PI)
}

/// Self-capacitance in fF of a transmission-line resonator at `f` GHz:
/// `C_res = π / (2·ω·Z₀)`.
pub fn resonator_self_capacitance_ff(frequency_ghz: f64, line_impedance: f64) -> f64 {
    let omega = 2.0 * PI * frequency_ghz * 1e9;
    PI / (2.0 * omega * line_impedance) * 1e15
}

/// Frequency reduction factor from capacitive loading:
/// `sqrt(C_res / (C_res + C_load))`.
pub fn loading_factor(c_res_ff: f64, c_load_ff: f64) -> f64 {
    (c_res_ff / (c_res_ff + c_load_ff)).sqrt()
}

/// Corrected cavity frequency and linewidth (both Hz) of a feedline-coupled
/// resonator, from the rough eigenmode frequency and the coupler capacitances
/// (fF).
pub fn loaded_cavity_params(
    rough_frequency_hz: f64,
    top_to_ground_ff: f64,
    top_to_bottom_ff: f64,
    line_impedance: f64,
) -> (f64, f64) {
    let omega_rough = 2.0 * PI * rough_frequency_hz;
    let c_res = PI / (2.0 * omega_rough * line_impedance) * 1e15;
    let c_total = c_res + top_to_ground_ff + top_to_bottom_ff;

    let omega_est = (c_res / c_total).sqrt() * omega_rough;
    let kappa = 0.5 * line_impedance * omega_est * omega_est
        * (top_to_bottom_ff * top_to_bottom_ff / c_total)
        * 1e-15;

    (omega_est / (2.0 * PI), kappa / (2.0 * PI))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_charging_energy_of_typical_shunt() {
        // 65 fF shunt is ~0.3 GHz
        let ec = charging_energy_ghz(65.0);
        assert!((ec - 0.298).abs() < 0.01, "EC = {ec}");
    }

    #[test]
    fn test_transmon_relations_roundtrip() {
        let (ej, ec) = transmon_ej_ec(5.1, -205.0);
        assert!(ec > 0.0 && ej > 0.0);
        let f = transmon_frequency_ghz(ej, ec);
        let alpha = transmon_anharmonicity_mhz(ec);
        assert!((f - 5.1).abs() < 1e-9);
        assert!((alpha + 205.0).abs() < 1e-9);
    }

    #[test]
    fn test_josephson_inductance_roundtrip() {
        let lj = josephson_inductance_nh(15.0);
        assert!(lj > 0.0);
        let ej = josephson_energy_ghz(lj);
        assert!((ej - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_coupling_prefactor_orders_topologies() {
        // A half-wave mode couples more weakly than quarter-wave at equal caps.
        let quarter = coupling_strength_mhz(
            120.0, 5.0, 13.0, 7.0, ResonatorType::Quarter, DEFAULT_LINE_IMPEDANCE,
        );
        let half = coupling_strength_mhz(
            120.0, 5.0, 13.0, 7.0, ResonatorType::Half, DEFAULT_LINE_IMPEDANCE,
        );
        assert!(quarter > half);
        assert!((quarter / half - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_loaded_cavity_below_rough_frequency() {
        let (f, kappa) = loaded_cavity_params(6.8e9, 40.0, 30.0, DEFAULT_LINE_IMPEDANCE);
        assert!(f < 6.8e9);
        assert!(f > 5.0e9);
        assert!(kappa > 0.0);
    }

    #[test]
    fn test_loading_factor_unloaded_is_identity() {
        assert_eq!(loading_factor(500.0, 0.0), 1.0);
        assert!(loading_factor(500.0, 5.0) < 1.0);
    }

    proptest! {
        #[test]
        fn prop_ej_ec_inversion(f in 2.0f64..9.0, alpha in -400.0f64..-80.0) {
            let (ej, ec) = transmon_ej_ec(f, alpha);
            prop_assert!((transmon_frequency_ghz(ej, ec) - f).abs() < 1e-6);
            prop_assert!((transmon_anharmonicity_mhz(ec) - alpha).abs() < 1e-6);
        }
    }
}
