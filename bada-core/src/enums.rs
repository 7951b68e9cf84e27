//! Discrete per-aircraft states shared between the traffic layer and the
//! performance model.

use crate::error::PerformanceError;
use crate::imports::*;

/// Engine type of an aircraft, selects the thrust and fuel flow equations
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineType {
    #[default]
    #[serde(alias = "JET", alias = "jet")]
    Jet,
    #[serde(alias = "TURBOPROP", alias = "turboprop")]
    Turboprop,
    #[serde(alias = "PISTON", alias = "piston")]
    Piston,
}

/// ICAO wake turbulence category
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WakeCategory {
    #[serde(alias = "L")]
    Light,
    #[default]
    #[serde(alias = "M")]
    Medium,
    #[serde(alias = "H")]
    Heavy,
    #[serde(alias = "J")]
    Super,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalMode {
    Climb,
    #[default]
    Level,
    Descent,
}

/// Autopilot speed mode
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedMode {
    #[default]
    ConstantCas,
    ConstantMach,
    Accelerate,
    Decelerate,
}

/// Aerodynamic configuration (flaps and gear state)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Configuration {
    Takeoff,
    InitialClimb,
    #[default]
    Clean,
    Approach,
    Landing,
}

/// Flight phase.  Variant order is the order of a flight, so comparisons
/// such as `phase <= FlightPhase::Climb` are meaningful.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum FlightPhase {
    AtGateOrigin,
    TaxiOrigin,
    Takeoff,
    Climb,
    #[default]
    Cruise,
    Descent,
    Approach,
    Landing,
    TaxiDest,
    AtGateDest,
}

/// Mass class selecting the airline procedure speeds of an aircraft
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MassClass {
    Low = 1,
    #[default]
    Average = 2,
    High = 3,
}

impl TryFrom<u8> for MassClass {
    type Error = PerformanceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Average),
            3 => Ok(Self::High),
            _ => Err(PerformanceError::InvalidMassClass(value)),
        }
    }
}

impl MassClass {
    /// Zero based row of this mass class in per-class tables
    pub fn index(&self) -> usize {
        *self as usize - 1
    }
}
