//! Alsvid Data Model
//!
//! Shared types for the Alsvid device-design engine: unit-suffixed physical
//! quantities, catalog records and working tables, target specifications,
//! design-option trees in the collaborator shape, and the closed-form circuit
//! physics used by the matcher and the interpolator.
//!
//! # Overview
//!
//! A catalog row pairs simulated *Hamiltonian parameters* (frequencies,
//! anharmonicity, coupling strength, linewidth) with the *design options*
//! (geometric knobs) that produced them. Targets are expressed against the
//! Hamiltonian columns; geometry travels as typed value objects whose
//! unit-suffixed string form exists only at the serde boundary.
//!
//! # Example
//!
//! ```rust
//! use alsvid_types::{columns, PhysicalQuantity, TargetSpec};
//!
//! let target = TargetSpec::new()
//!     .with(columns::QUBIT_FREQUENCY_GHZ, 5.1)
//!     .with(columns::ANHARMONICITY_MHZ, -205.0)
//!     .with_tag(columns::RESONATOR_TYPE, "quarter");
//! assert_eq!(target.numeric(columns::QUBIT_FREQUENCY_GHZ), Some(5.1));
//!
//! let claw = PhysicalQuantity::parse("200um").unwrap();
//! assert_eq!(claw.scale(1.5).to_string(), "300um");
//! ```

pub mod options;
pub mod params;
pub mod physics;
pub mod quantity;
pub mod record;
pub mod table;

pub use options::{
    CavityClawAssembly, CavityClawOptions, ClawOptions, ConnectionPads, CouplerOptions,
    CpwOptions, CpwStack, DesignOptions, QubitOptions, ReadoutPad,
};
pub use params::{columns, ParamMap, ParamValue, ResonatorType, TargetSpec, TargetValue};
pub use quantity::{PhysicalQuantity, QuantityError, Unit};
pub use record::{CatalogRecord, CoupledDesign, DesignSlot};
pub use table::WorkingTable;
