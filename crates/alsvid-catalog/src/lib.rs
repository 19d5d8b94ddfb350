//! Alsvid Catalog: selection and table assembly
//!
//! Translates a human-level selection ("qubit + cavity-claw system,
//! TransmonCross qubit, RouteMeander cavity, quarter-wave resonator") into
//! dataset fetches from a [`CatalogProvider`], joins the component tables on
//! their shared coupling-capacitor geometry, and merges the per-component
//! design options into one coherent record per device.
//!
//! # Example
//!
//! ```ignore
//! use alsvid_catalog::{Selector, SystemSelection};
//! use alsvid_types::ResonatorType;
//!
//! let mut selector = Selector::new(provider);
//! selector.select_system(SystemSelection::QubitCavity);
//! selector.select_qubit("TransmonCross")?;
//! selector.select_cavity("RouteMeander")?;
//! selector.select_resonator_type(ResonatorType::Quarter);
//! let table = selector.build_working_table()?;
//! ```

pub mod error;
pub mod join;
pub mod key;
pub mod memory;
pub mod provider;
pub mod selector;

pub use error::{CatalogError, CatalogResult};
pub use key::{DataType, DatasetKey, Subsystem};
pub use memory::InMemoryProvider;
pub use provider::CatalogProvider;
pub use selector::{Selector, SystemSelection};
