//! Dataset configuration keys.
//!
//! The catalog provider names each tabular dataset by a
//! `"{sub-system}-{component-name}-{data-type}"` configuration string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical sub-system a dataset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    /// Transmon qubit with its readout claw.
    Qubit,
    /// Readout cavity with claw and feedline coupler.
    CavityClaw,
    /// Standalone feedline coupler.
    Coupler,
}

impl Subsystem {
    /// Tag as it appears in configuration strings.
    pub fn tag(self) -> &'static str {
        match self {
            Subsystem::Qubit => "qubit",
            Subsystem::CavityClaw => "cavity_claw",
            Subsystem::Coupler => "coupler",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Subsystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qubit" => Ok(Subsystem::Qubit),
            "cavity_claw" => Ok(Subsystem::CavityClaw),
            "coupler" => Ok(Subsystem::Coupler),
            other => Err(format!("unknown sub-system `{other}`")),
        }
    }
}

/// Kind of simulation data a dataset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Electrostatic capacitance-matrix results.
    CapMatrix,
    /// Eigenmode (frequency/linewidth) results.
    Eigenmode,
}

impl DataType {
    /// Tag as it appears in configuration strings.
    pub fn tag(self) -> &'static str {
        match self {
            DataType::CapMatrix => "cap_matrix",
            DataType::Eigenmode => "eigenmode",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cap_matrix" => Ok(DataType::CapMatrix),
            "eigenmode" => Ok(DataType::Eigenmode),
            other => Err(format!("unknown data type `{other}`")),
        }
    }
}

/// Fully qualified dataset key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetKey {
    /// Sub-system the dataset describes.
    pub subsystem: Subsystem,
    /// Component name, e.g. `"TransmonCross"` or `"RouteMeander"`.
    pub component: String,
    /// Kind of simulation data.
    pub data_type: DataType,
}

impl DatasetKey {
    /// Create a key from its parts.
    pub fn new(subsystem: Subsystem, component: impl Into<String>, data_type: DataType) -> Self {
        Self {
            subsystem,
            component: component.into(),
            data_type,
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.subsystem, self.component, self.data_type)
    }
}

impl FromStr for DatasetKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Sub-system tags contain underscores, never dashes, so the first dash
        // ends the sub-system and the last dash starts the data type.
        let (subsystem, rest) = s
            .split_once('-')
            .ok_or_else(|| format!("malformed dataset key `{s}`"))?;
        let (component, data_type) = rest
            .rsplit_once('-')
            .ok_or_else(|| format!("malformed dataset key `{s}`"))?;
        if component.is_empty() {
            return Err(format!("malformed dataset key `{s}`"));
        }
        Ok(DatasetKey {
            subsystem: subsystem.parse()?,
            component: component.to_string(),
            data_type: data_type.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_provider_naming() {
        let key = DatasetKey::new(Subsystem::Qubit, "TransmonCross", DataType::CapMatrix);
        assert_eq!(key.to_string(), "qubit-TransmonCross-cap_matrix");

        let key = DatasetKey::new(Subsystem::CavityClaw, "RouteMeander", DataType::Eigenmode);
        assert_eq!(key.to_string(), "cavity_claw-RouteMeander-eigenmode");
    }

    #[test]
    fn test_parse_roundtrip() {
        let key: DatasetKey = "coupler-NCap-cap_matrix".parse().unwrap();
        assert_eq!(key.subsystem, Subsystem::Coupler);
        assert_eq!(key.component, "NCap");
        assert_eq!(key.data_type, DataType::CapMatrix);
        assert_eq!(key.to_string(), "coupler-NCap-cap_matrix");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("qubit-TransmonCross".parse::<DatasetKey>().is_err());
        assert!("qubit--cap_matrix".parse::<DatasetKey>().is_err());
        assert!("rotor-TransmonCross-cap_matrix".parse::<DatasetKey>().is_err());
    }
}
