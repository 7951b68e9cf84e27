//! Fuel flow.  Flows are in kg/min with thrust in N, [fuel_burn] converts
//! the flow of the current flight phase to kg/s.
//!
//! [fuel_burn]: AircraftCoefficients::fuel_burn

use crate::coefficients::AircraftCoefficients;
use crate::enums::*;
use crate::params::*;

impl AircraftCoefficients {
    /// Returns nominal fuel flow [kg/min]
    /// # Arguments
    /// * `v_tas_kts` - true airspeed [kt]
    /// * `thrust` - thrust [N]
    pub fn nominal_fuel_flow(&self, v_tas_kts: f64, thrust: f64) -> f64 {
        let thr_kn = thrust / N_PER_KN;
        match self.engine_type {
            EngineType::Jet => self.c_f1 * (1.0 + v_tas_kts / self.c_f2) * thr_kn,
            EngineType::Turboprop => {
                self.c_f1 * (1.0 - v_tas_kts / self.c_f2) * (v_tas_kts / 1_000.0) * thr_kn
            }
            EngineType::Piston => self.c_f1,
        }
    }

    /// Returns minimum fuel flow [kg/min] for idle descent at `h_p_ft` [ft]
    pub fn minimum_fuel_flow(&self, h_p_ft: f64) -> f64 {
        match self.engine_type {
            EngineType::Piston => self.c_f3,
            EngineType::Jet | EngineType::Turboprop => self.c_f3 * (1.0 - h_p_ft / self.c_f4),
        }
    }

    /// Returns fuel flow [kg/min] in approach and landing, never below the
    /// idle flow
    pub fn approach_landing_fuel_flow(&self, v_tas_kts: f64, thrust: f64, h_p_ft: f64) -> f64 {
        let f_min = self.minimum_fuel_flow(h_p_ft);
        match self.engine_type {
            EngineType::Piston => f_min,
            EngineType::Jet | EngineType::Turboprop => {
                self.nominal_fuel_flow(v_tas_kts, thrust).max(f_min)
            }
        }
    }

    /// Returns cruise fuel flow [kg/min]
    pub fn cruise_fuel_flow(&self, v_tas_kts: f64, thrust: f64) -> f64 {
        self.nominal_fuel_flow(v_tas_kts, thrust) * self.c_fcr
    }

    /// Returns fuel burn [kg/s] for `flight_phase`
    /// # Arguments
    /// * `flight_phase` - current flight phase
    /// * `v_tas_kts` - true airspeed [kt]
    /// * `thrust` - thrust [N]
    /// * `h_p_ft` - geopotential pressure altitude [ft]
    pub fn fuel_burn(
        &self,
        flight_phase: FlightPhase,
        v_tas_kts: f64,
        thrust: f64,
        h_p_ft: f64,
    ) -> f64 {
        let flow = match flight_phase {
            FlightPhase::Cruise => self.cruise_fuel_flow(v_tas_kts, thrust),
            FlightPhase::Descent => self.minimum_fuel_flow(h_p_ft),
            FlightPhase::Approach | FlightPhase::Landing => {
                self.approach_landing_fuel_flow(v_tas_kts, thrust, h_p_ft)
            }
            _ => self.nominal_fuel_flow(v_tas_kts, thrust),
        };
        flow / SEC_PER_MIN
    }
}
