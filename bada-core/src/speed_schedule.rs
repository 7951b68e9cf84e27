//! Standard climb, cruise and descent speed schedules built from the airline
//! procedure speeds.

use crate::coefficients::{AircraftCoefficients, ProcedureSpeeds};
use crate::enums::*;
use crate::imports::*;
use crate::params::GlobalPerformanceFactors;

/// Number of climb schedule bands
pub const CLIMB_BANDS: usize = 8;
/// Number of cruise schedule bands
pub const CRUISE_BANDS: usize = 5;
/// Number of descent schedule bands
pub const DESCENT_BANDS: usize = 8;

/// Speed schedule of one aircraft.  Every row holds CAS values [kt] except
/// the last used band, which is a Mach number.  Engine types with fewer bands
/// pad the row with zeros.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedSchedule {
    pub climb: [f64; CLIMB_BANDS],
    pub cruise: [f64; CRUISE_BANDS],
    pub descent: [f64; DESCENT_BANDS],
}

impl SpeedSchedule {
    /// Builds the schedule for an aircraft of `mass_kg`.  Low altitude bands
    /// follow the stall speed corrected to that mass.
    pub fn new(
        ac: &AircraftCoefficients,
        gpf: &GlobalPerformanceFactors,
        speeds: &ProcedureSpeeds,
        mass_kg: f64,
    ) -> Self {
        let v_stall_to = ac.operating_speed(mass_kg, ac.v_stall_to);
        let v_stall_ld = ac.operating_speed(mass_kg, ac.v_stall_ld);
        let d_cl = &gpf.v_d_cl_kts;
        let d_des = &gpf.v_d_des_kts;
        let v_min_cl = |d: f64| gpf.c_v_min * v_stall_to + d;
        let v_min_des = |d: f64| gpf.c_v_min * v_stall_ld + d;

        let climb = match ac.engine_type {
            EngineType::Jet => [
                v_min_cl(d_cl[0]),
                v_min_cl(d_cl[1]),
                v_min_cl(d_cl[2]),
                v_min_cl(d_cl[3]),
                v_min_cl(d_cl[4]),
                speeds.v_cl_1.min(250.0),
                speeds.v_cl_2,
                speeds.m_cl,
            ],
            EngineType::Turboprop | EngineType::Piston => [
                v_min_cl(d_cl[5]),
                v_min_cl(d_cl[6]),
                v_min_cl(d_cl[7]),
                speeds.v_cl_1.min(250.0),
                speeds.v_cl_2,
                speeds.m_cl,
                0.0,
                0.0,
            ],
        };

        let caps = match ac.engine_type {
            EngineType::Jet => [170.0, 220.0, 250.0],
            EngineType::Turboprop | EngineType::Piston => [150.0, 180.0, 250.0],
        };
        let cruise = [
            speeds.v_cr_1.min(caps[0]),
            speeds.v_cr_1.min(caps[1]),
            speeds.v_cr_1.min(caps[2]),
            speeds.v_cr_2,
            speeds.m_cr,
        ];

        let descent = match ac.engine_type {
            EngineType::Jet | EngineType::Turboprop => [
                v_min_des(d_des[0]),
                v_min_des(d_des[1]),
                v_min_des(d_des[2]),
                v_min_des(d_des[3]),
                speeds.v_des_1.min(220.0),
                speeds.v_des_1.min(250.0),
                speeds.v_des_2,
                speeds.m_des,
            ],
            EngineType::Piston => [
                v_min_des(d_des[4]),
                v_min_des(d_des[5]),
                v_min_des(d_des[6]),
                speeds.v_des_1,
                speeds.v_des_2,
                speeds.m_des,
                0.0,
                0.0,
            ],
        };

        Self {
            climb,
            cruise,
            descent,
        }
    }

    /// Rebuilds a schedule from stored rows
    pub fn from_rows(
        climb: ArrayView1<f64>,
        cruise: ArrayView1<f64>,
        descent: ArrayView1<f64>,
    ) -> anyhow::Result<Self> {
        fn to_array<const N: usize>(row: ArrayView1<f64>) -> anyhow::Result<[f64; N]> {
            row.to_vec()
                .try_into()
                .map_err(|v: Vec<f64>| anyhow!("expected {} bands, found {}", N, v.len()))
        }
        Ok(Self {
            climb: to_array(climb)?,
            cruise: to_array(cruise)?,
            descent: to_array(descent)?,
        })
    }

    /// Returns the scheduled speed at `h_p_ft` [ft] in `flight_phase`, a CAS
    /// [kt] below the Mach transition altitude `h_p_trans_ft` [ft] and a Mach
    /// number above.  Phases up to climb use the climb row, cruise uses the
    /// cruise row and descent onwards the descent row.
    pub fn speed(
        &self,
        engine_type: EngineType,
        h_p_ft: f64,
        h_p_trans_ft: f64,
        flight_phase: FlightPhase,
    ) -> f64 {
        let is_jet = engine_type == EngineType::Jet;
        if flight_phase <= FlightPhase::Climb {
            let jet = [1_500.0, 3_000.0, 4_000.0, 5_000.0, 6_000.0, 10_000.0, h_p_trans_ft];
            let other = [500.0, 1_000.0, 1_500.0, 10_000.0, h_p_trans_ft];
            let bounds: &[f64] = if is_jet { &jet } else { &other };
            self.climb[band(h_p_ft, bounds)]
        } else if flight_phase == FlightPhase::Cruise {
            let jet = [3_000.0, 6_000.0, 14_000.0, h_p_trans_ft];
            let other = [3_000.0, 6_000.0, 10_000.0, h_p_trans_ft];
            let bounds: &[f64] = if is_jet { &jet } else { &other };
            self.cruise[band(h_p_ft, bounds)]
        } else {
            let non_piston = [1_000.0, 1_500.0, 2_000.0, 3_000.0, 6_000.0, 10_000.0, h_p_trans_ft];
            let piston = [500.0, 1_000.0, 1_500.0, 10_000.0, h_p_trans_ft];
            let bounds: &[f64] = if engine_type == EngineType::Piston {
                &piston
            } else {
                &non_piston
            };
            self.descent[band(h_p_ft, bounds)]
        }
    }
}

/// Index of the first band whose upper bound lies above `h_p_ft`, or one past
/// the last bound
fn band(h_p_ft: f64, upper_bounds: &[f64]) -> usize {
    upper_bounds
        .iter()
        .position(|bound| h_p_ft < *bound)
        .unwrap_or(upper_bounds.len())
}
