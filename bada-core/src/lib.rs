#![allow(clippy::too_many_arguments)]
// TODO: uncomment when docs are somewhat mature to check for missing docs
// #![warn(missing_docs)]

//! Crate containing the BADA 3 aircraft performance model, evaluated tick by
//! tick over a growing and shrinking fleet of simulated aircraft.
//! # Features:
//! - resources: bundle the reference data in `resources/` into the crate

#[macro_use]
pub mod macros;

pub mod aerodynamics;
pub mod atmosphere;
pub mod coefficients;
pub mod configuration;
pub mod enums;
pub mod envelope;
pub mod error;
pub mod fleet;
pub mod fuel;
pub mod imports;
pub mod loader;
pub mod params;
pub mod performance;
pub mod prelude;
#[cfg(feature = "resources")]
pub mod resources;
pub mod speed_schedule;
pub mod thrust;
pub mod total_energy;
pub mod traits;
pub mod utils;
