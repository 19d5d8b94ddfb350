//! Alsvid Interpolator: scaling-law design derivation
//!
//! Turns a target Hamiltonian-parameter vector into a *new* device geometry
//! that is not literally present in the catalog: the nearest matches supply
//! the starting geometry, and closed-form physics ratios rescale its
//! characteristic dimensions toward the target.
//!
//! # Example
//!
//! ```ignore
//! use alsvid_interp::{ScalingConfig, ScalingInterpolator};
//!
//! let interpolator = ScalingInterpolator::new(ScalingConfig::default());
//! let design = interpolator.interpolate(&table, &target)?;
//! let payload = serde_json::to_value(&design.design_options)?;
//! ```
//!
//! The produced [`InterpolatedDesign`] carries the unified design options in
//! the exact nested shape the downstream geometry renderer and simulator
//! read; realizing and re-simulating it is their job, not this crate's.

pub mod config;
pub mod error;
pub mod scaling;

pub use config::{
    ScalingConfig, DEFAULT_COUPLING_CAP_TOLERANCE, DEFAULT_LOADING_BREAKDOWN_THRESHOLD,
};
pub use error::{InterpError, InterpResult};
pub use scaling::{InterpolatedDesign, ScalingInterpolator};
