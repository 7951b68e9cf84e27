//! Engine thrust for climb, cruise and descent, and the thrust setting
//! selected from the vertical and autopilot speed modes.

use crate::coefficients::AircraftCoefficients;
use crate::enums::*;
use crate::params::GlobalPerformanceFactors;

impl AircraftCoefficients {
    /// Returns maximum climb and take-off thrust [N], corrected for the
    /// temperature deviation.  Turboprop and piston thrust divide by `v_tas_kts`
    /// and are unbounded at zero speed.
    /// # Arguments
    /// * `h_p_ft` - geopotential pressure altitude [ft]
    /// * `v_tas_kts` - true airspeed [kt]
    /// * `d_t` - temperature deviation from ISA [K]
    pub fn max_climb_thrust(&self, h_p_ft: f64, v_tas_kts: f64, d_t: f64) -> f64 {
        let thr_isa = match self.engine_type {
            EngineType::Jet => {
                self.c_tc_1 * (1.0 - h_p_ft / self.c_tc_2 + self.c_tc_3 * h_p_ft.powi(2))
            }
            EngineType::Turboprop => {
                self.c_tc_1 / v_tas_kts * (1.0 - h_p_ft / self.c_tc_2) + self.c_tc_3
            }
            EngineType::Piston => {
                self.c_tc_1 * (1.0 - h_p_ft / self.c_tc_2) + self.c_tc_3 / v_tas_kts
            }
        };
        let d_t_eff = d_t - self.c_tc_4;
        thr_isa * (1.0 - (self.c_tc_5.max(0.0) * d_t_eff).clamp(0.0, 0.4))
    }

    /// Returns descent thrust [N] as a fraction of `thr_max_climb` [N].  With
    /// non-clean drag data the high altitude setting never reaches below the
    /// approach ceiling.
    pub fn descent_thrust(
        &self,
        gpf: &GlobalPerformanceFactors,
        h_p_ft: f64,
        thr_max_climb: f64,
        configuration: Configuration,
    ) -> f64 {
        let h_p_des = if self.c_d2_ap != 0.0 {
            self.h_p_des.max(gpf.h_max_ap_ft)
        } else {
            self.h_p_des
        };
        if h_p_ft > h_p_des {
            return self.c_tdes_high * thr_max_climb;
        }
        match configuration {
            Configuration::Approach => self.c_tdes_app * thr_max_climb,
            Configuration::Landing => self.c_tdes_ld * thr_max_climb,
            // take-off and initial climb share the clean low altitude setting
            Configuration::Clean | Configuration::Takeoff | Configuration::InitialClimb => {
                self.c_tdes_low * thr_max_climb
            }
        }
    }

    /// Returns thrust [N] for the current modes, first matching rule wins:
    /// climb or level acceleration uses maximum climb thrust, level flight at
    /// constant speed balances drag up to maximum cruise thrust, descent and
    /// level deceleration use descent thrust.
    /// # Arguments
    /// * `gpf` - global performance factors
    /// * `vertical_mode` - vertical mode
    /// * `configuration` - aerodynamic configuration
    /// * `h_p_ft` - geopotential pressure altitude [ft]
    /// * `v_tas_kts` - true airspeed [kt]
    /// * `d_t` - temperature deviation from ISA [K]
    /// * `drag` - aerodynamic drag [N]
    /// * `speed_mode` - autopilot speed mode
    pub fn thrust(
        &self,
        gpf: &GlobalPerformanceFactors,
        vertical_mode: VerticalMode,
        configuration: Configuration,
        h_p_ft: f64,
        v_tas_kts: f64,
        d_t: f64,
        drag: f64,
        speed_mode: SpeedMode,
    ) -> f64 {
        let thr_max_climb = self.max_climb_thrust(h_p_ft, v_tas_kts, d_t);
        match (vertical_mode, speed_mode) {
            (VerticalMode::Climb, _) | (VerticalMode::Level, SpeedMode::Accelerate) => {
                thr_max_climb
            }
            (VerticalMode::Level, SpeedMode::ConstantCas | SpeedMode::ConstantMach) => {
                drag.min(max_cruise_thrust(gpf, thr_max_climb))
            }
            (VerticalMode::Descent, _) | (VerticalMode::Level, SpeedMode::Decelerate) => {
                self.descent_thrust(gpf, h_p_ft, thr_max_climb, configuration)
            }
        }
    }
}

/// Returns maximum cruise thrust [N] from maximum climb thrust [N]
pub fn max_cruise_thrust(gpf: &GlobalPerformanceFactors, thr_max_climb: f64) -> f64 {
    gpf.c_tcr * thr_max_climb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ApproxEq;

    fn gpf() -> GlobalPerformanceFactors {
        GlobalPerformanceFactors::default()
    }

    #[test]
    fn test_max_cruise_thrust_is_scaled_climb_thrust() {
        let gpf = gpf();
        for thr in [0.0, 1.0, 12_345.6, 1.2e5] {
            assert_eq!(max_cruise_thrust(&gpf, thr), gpf.c_tcr * thr);
        }
    }

    #[test]
    fn test_jet_climb_thrust_decreases_with_altitude() {
        let ac = AircraftCoefficients::mock_jet();
        let low = ac.max_climb_thrust(0.0, 250.0, 0.0);
        let high = ac.max_climb_thrust(30_000.0, 450.0, 0.0);
        assert!(low.approx_eq(&ac.c_tc_1, 1e-12));
        assert!(high < low && high > 0.0);
    }

    #[test]
    fn test_temperature_correction_is_clamped() {
        let ac = AircraftCoefficients::mock_jet();
        let isa = ac.max_climb_thrust(10_000.0, 300.0, 0.0);
        // below c_tc_4 no correction applies
        assert_eq!(ac.max_climb_thrust(10_000.0, 300.0, ac.c_tc_4), isa);
        let hot = ac.max_climb_thrust(10_000.0, 300.0, ac.c_tc_4 + 20.0);
        assert!(hot.approx_eq(&(isa * (1.0 - ac.c_tc_5 * 20.0)), 1e-12));
        // at most 40 % reduction
        let very_hot = ac.max_climb_thrust(10_000.0, 300.0, 500.0);
        assert!(very_hot.approx_eq(&(isa * 0.6), 1e-12));
    }

    #[test]
    fn test_turboprop_and_piston_climb_thrust() {
        let prop = AircraftCoefficients::mock_turboprop();
        let thr = prop.max_climb_thrust(10_000.0, 200.0, 0.0);
        let expected = prop.c_tc_1 / 200.0 * (1.0 - 10_000.0 / prop.c_tc_2) + prop.c_tc_3;
        assert!(thr.approx_eq(&expected, 1e-12));
        let piston = AircraftCoefficients::mock_piston();
        let thr = piston.max_climb_thrust(2_000.0, 100.0, 0.0);
        let expected = piston.c_tc_1 * (1.0 - 2_000.0 / piston.c_tc_2) + piston.c_tc_3 / 100.0;
        assert!(thr.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_descent_thrust_transition() {
        let gpf = gpf();
        let jet = AircraftCoefficients::mock_jet();
        let thr = 100_000.0;
        assert_eq!(
            jet.descent_thrust(&gpf, 25_000.0, thr, Configuration::Clean),
            jet.c_tdes_high * thr
        );
        assert_eq!(
            jet.descent_thrust(&gpf, 15_000.0, thr, Configuration::Clean),
            jet.c_tdes_low * thr
        );
        assert_eq!(
            jet.descent_thrust(&gpf, 3_000.0, thr, Configuration::Approach),
            jet.c_tdes_app * thr
        );
        assert_eq!(
            jet.descent_thrust(&gpf, 1_000.0, thr, Configuration::Landing),
            jet.c_tdes_ld * thr
        );
        // with non-clean data the transition is raised to the approach ceiling
        let mut low_des = jet;
        low_des.h_p_des = 5_000.0;
        assert_eq!(
            low_des.descent_thrust(&gpf, 6_000.0, thr, Configuration::Clean),
            low_des.c_tdes_low * thr
        );
        // without it the published transition applies
        let prop = AircraftCoefficients::mock_turboprop();
        assert_eq!(
            prop.descent_thrust(&gpf, 11_000.0, thr, Configuration::Clean),
            prop.c_tdes_high * thr
        );
    }

    #[test]
    fn test_thrust_mode_selection() {
        let gpf = gpf();
        let ac = AircraftCoefficients::mock_jet();
        let (h, v, d_t) = (30_000.0, 447.0, 0.0);
        let thr_max = ac.max_climb_thrust(h, v, d_t);
        let thrust = |vm, sm, drag| ac.thrust(&gpf, vm, Configuration::Clean, h, v, d_t, drag, sm);

        assert_eq!(thrust(VerticalMode::Climb, SpeedMode::ConstantCas, 1.0), thr_max);
        assert_eq!(thrust(VerticalMode::Level, SpeedMode::Accelerate, 1.0), thr_max);
        assert_eq!(thrust(VerticalMode::Level, SpeedMode::ConstantMach, 1_000.0), 1_000.0);
        assert_eq!(
            thrust(VerticalMode::Level, SpeedMode::ConstantCas, 1.0e9),
            gpf.c_tcr * thr_max
        );
        assert_eq!(
            thrust(VerticalMode::Descent, SpeedMode::Accelerate, 1.0),
            ac.c_tdes_high * thr_max
        );
        assert_eq!(
            thrust(VerticalMode::Level, SpeedMode::Decelerate, 1.0),
            ac.c_tdes_high * thr_max
        );
    }
}
