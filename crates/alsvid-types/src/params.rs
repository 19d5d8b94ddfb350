//! Parameter values and target specifications.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Well-known column names of the catalog tables.
pub mod columns {
    /// Qubit 0→1 transition frequency, GHz.
    pub const QUBIT_FREQUENCY_GHZ: &str = "qubit_frequency_GHz";
    /// Transmon anharmonicity, MHz (negative for transmons).
    pub const ANHARMONICITY_MHZ: &str = "anharmonicity_MHz";
    /// Qubit–resonator coupling strength, MHz.
    pub const G_MHZ: &str = "g_MHz";
    /// Readout cavity resonant frequency, GHz.
    pub const CAVITY_FREQUENCY_GHZ: &str = "cavity_frequency_GHz";
    /// Cavity linewidth, kHz.
    pub const KAPPA_KHZ: &str = "kappa_kHz";
    /// Raw cavity frequency column as some tables ship it, Hz.
    pub const CAVITY_FREQUENCY_RAW: &str = "cavity_frequency";
    /// Raw linewidth column as some tables ship it, Hz.
    pub const KAPPA_RAW: &str = "kappa";
    /// Resonator topology tag: `"quarter"` or `"half"`.
    pub const RESONATOR_TYPE: &str = "resonator_type";
    /// Coupler component tag, e.g. `"CLT"` or `"NCap"`.
    pub const COUPLER_TYPE: &str = "coupler_type";
    /// Simulated cross-to-claw coupling capacitance, fF.
    pub const CROSS_TO_CLAW: &str = "cross_to_claw";
    /// Simulated cross-to-ground capacitance, fF.
    pub const CROSS_TO_GROUND: &str = "cross_to_ground";
    /// Charging energy, GHz.
    pub const EC: &str = "EC";
    /// Josephson energy, GHz.
    pub const EJ: &str = "EJ";
    /// Coupler top-to-ground capacitance, fF.
    pub const TOP_TO_GROUND: &str = "top_to_ground";
    /// Coupler top-to-bottom capacitance, fF.
    pub const TOP_TO_BOTTOM: &str = "top_to_bottom";
}

/// A single cell of a catalog row: numeric simulation output or categorical tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric Hamiltonian or simulation parameter.
    Number(f64),
    /// Categorical tag (hard filter, never a distance term).
    Text(String),
}

impl ParamValue {
    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }

    /// The tag value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Number(_) => None,
            ParamValue::Text(s) => Some(s.as_str()),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Parameter map of a catalog row.
pub type ParamMap = FxHashMap<String, ParamValue>;

/// Resonator topology of the readout cavity.
///
/// Quarter-wave and half-wave cavities differ in the scaling-law prefactors
/// used by the coupling-strength derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResonatorType {
    /// λ/4 resonator, shorted at one end.
    Quarter,
    /// λ/2 resonator, open at both ends.
    Half,
}

impl ResonatorType {
    /// Tag string as it appears in catalog rows.
    pub fn tag(self) -> &'static str {
        match self {
            ResonatorType::Quarter => "quarter",
            ResonatorType::Half => "half",
        }
    }

    /// Mode prefactor entering the coupling-strength expression.
    pub fn coupling_prefactor(self) -> f64 {
        match self {
            ResonatorType::Quarter => 4.0,
            ResonatorType::Half => 2.0,
        }
    }
}

impl fmt::Display for ResonatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ResonatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarter" => Ok(ResonatorType::Quarter),
            "half" => Ok(ResonatorType::Half),
            other => Err(format!(
                "invalid resonator type `{other}`; must be `quarter` or `half`"
            )),
        }
    }
}

/// One entry of a target specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetValue {
    /// Desired numeric Hamiltonian parameter.
    Number(f64),
    /// Categorical constraint, matched exactly against row tags.
    Tag(String),
}

/// Desired Hamiltonian parameters plus optional categorical constraints.
///
/// Immutable once handed to a match call. Entries iterate in key order, so
/// distance sums are deterministic across calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    entries: BTreeMap<String, TargetValue>,
}

impl TargetSpec {
    /// Create an empty target specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric target entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.entries.insert(key.into(), TargetValue::Number(value));
        self
    }

    /// Add a categorical constraint.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), TargetValue::Tag(value.into()));
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the specification is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a single entry.
    pub fn get(&self, key: &str) -> Option<&TargetValue> {
        self.entries.get(key)
    }

    /// Numeric value of an entry, if present and numeric.
    pub fn numeric(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(TargetValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// All entry keys, in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Numeric entries, in key order.
    pub fn numeric_entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            TargetValue::Number(n) => Some((k.as_str(), *n)),
            TargetValue::Tag(_) => None,
        })
    }

    /// Categorical entries, in key order.
    pub fn tag_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            TargetValue::Tag(t) => Some((k.as_str(), t.as_str())),
            TargetValue::Number(_) => None,
        })
    }
}
