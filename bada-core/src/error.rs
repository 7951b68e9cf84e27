//! Typed errors raised by the performance model.  They travel inside
//! `anyhow::Error` and can be recovered with `downcast_ref`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerformanceError {
    #[error("Required reference data is missing or empty: {0}")]
    ConfigurationDataMissing(String),
    #[error("Unknown aircraft type: {0}")]
    UnknownAircraftType(String),
    #[error("Invalid coefficients for {icao}: {reason}")]
    InvalidCoefficients { icao: String, reason: String },
    #[error("Invalid mass class selector {0}, must be one of 1 (low), 2 (average), 3 (high)")]
    InvalidMassClass(u8),
    #[error("Slot {slot} is out of range for a fleet of {len} aircraft")]
    SlotOutOfRange { slot: usize, len: usize },
}
