//! Unit-suffixed physical quantities.
//!
//! Catalog geometry values travel as strings like `"200um"` or `"12.3nH"`.
//! [`PhysicalQuantity`] is the typed form: a magnitude plus a closed [`Unit`].
//! Scaling strips the unit, multiplies the magnitude, and reattaches the unit;
//! the unit string itself is never touched. Conversion to and from the suffixed
//! string form happens only at the serde boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing unit-suffixed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value carries no recognized unit suffix.
    #[error("unknown unit suffix in `{0}`")]
    UnknownUnit(String),

    /// The part before the unit suffix is not a number.
    #[error("invalid magnitude in `{0}`")]
    InvalidMagnitude(String),
}

/// Unit suffixes used by catalog geometry and lumped-element values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// `um`: micrometers (planar geometry lengths).
    Micrometer,
    /// `nm`: nanometers (film thicknesses).
    Nanometer,
    /// `mm`: millimeters (chip-scale dimensions).
    Millimeter,
    /// `nH`: nanohenries (Josephson inductance).
    NanoHenry,
    /// `fF`: femtofarads (capacitances).
    FemtoFarad,
}

impl Unit {
    const ALL: [Unit; 5] = [
        Unit::Micrometer,
        Unit::Nanometer,
        Unit::Millimeter,
        Unit::NanoHenry,
        Unit::FemtoFarad,
    ];

    /// The string suffix as it appears in catalog values.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Micrometer => "um",
            Unit::Nanometer => "nm",
            Unit::Millimeter => "mm",
            Unit::NanoHenry => "nH",
            Unit::FemtoFarad => "fF",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A magnitude with an attached unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhysicalQuantity {
    /// Numeric magnitude in the attached unit.
    pub magnitude: f64,
    /// The attached unit.
    pub unit: Unit,
}

impl PhysicalQuantity {
    /// Create a quantity from magnitude and unit.
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Shorthand for micrometer quantities.
    pub fn um(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Micrometer)
    }

    /// Shorthand for nanohenry quantities.
    pub fn nh(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::NanoHenry)
    }

    /// Shorthand for femtofarad quantities.
    pub fn ff(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::FemtoFarad)
    }

    /// Scale the magnitude by a dimensionless ratio; the unit is unchanged.
    pub fn scale(self, ratio: f64) -> Self {
        Self {
            magnitude: self.magnitude * ratio,
            unit: self.unit,
        }
    }

    /// Round the magnitude to the nearest integer; the unit is unchanged.
    pub fn round(self) -> Self {
        Self {
            magnitude: self.magnitude.round(),
            unit: self.unit,
        }
    }

    /// Parse a unit-suffixed string such as `"200um"`.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let trimmed = s.trim();
        for unit in Unit::ALL {
            if let Some(head) = trimmed.strip_suffix(unit.suffix()) {
                let magnitude = head
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| QuantityError::InvalidMagnitude(s.to_string()))?;
                return Ok(Self { magnitude, unit });
            }
        }
        Err(QuantityError::UnknownUnit(s.to_string()))
    }
}

impl Default for PhysicalQuantity {
    /// Zero micrometers, the neutral value of geometry fields.
    fn default() -> Self {
        Self::um(0.0)
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

impl FromStr for PhysicalQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhysicalQuantity {
    type Error = QuantityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PhysicalQuantity> for String {
    fn from(q: PhysicalQuantity) -> String {
        q.to_string()
    }
}
