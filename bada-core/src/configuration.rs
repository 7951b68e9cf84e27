//! Aerodynamic configuration classifier and the configuration dependent
//! speed and bank angle limits.

use crate::coefficients::AircraftCoefficients;
use crate::enums::*;
use crate::params::GlobalPerformanceFactors;

impl AircraftCoefficients {
    /// Classifies the aerodynamic configuration from speed, altitude and
    /// vertical mode.  Conditions are checked in order and the first match
    /// wins.
    /// # Arguments
    /// * `gpf` - global performance factors
    /// * `v_cas_kts` - calibrated airspeed [kt]
    /// * `h_p_ft` - geopotential pressure altitude [ft]
    /// * `vertical_mode` - current vertical mode
    pub fn update_configuration(
        &self,
        gpf: &GlobalPerformanceFactors,
        v_cas_kts: f64,
        h_p_ft: f64,
        vertical_mode: VerticalMode,
    ) -> Configuration {
        let v_min_cr = gpf.c_v_min * self.v_stall_cr + 10.0;
        let v_min_ap = gpf.c_v_min * self.v_stall_ap + 10.0;
        let climb = vertical_mode == VerticalMode::Climb;
        let descent = vertical_mode == VerticalMode::Descent;

        if climb && h_p_ft <= gpf.h_max_to_ft {
            Configuration::Takeoff
        } else if climb && h_p_ft > gpf.h_max_to_ft && h_p_ft < gpf.h_max_ic_ft {
            Configuration::InitialClimb
        } else if h_p_ft > gpf.h_max_ic_ft || (descent && v_cas_kts >= v_min_cr) {
            Configuration::Clean
        } else if descent
            && ((v_cas_kts < v_min_cr && h_p_ft > gpf.h_max_ld_ft && h_p_ft <= gpf.h_max_ap_ft)
                || (v_cas_kts < v_min_cr && v_cas_kts >= v_min_ap && h_p_ft <= gpf.h_max_ld_ft))
        {
            Configuration::Approach
        } else if descent && h_p_ft < gpf.h_max_ld_ft && v_cas_kts < v_min_ap {
            Configuration::Landing
        } else {
            Configuration::Clean
        }
    }

    /// Returns the minimum speed [kt CAS] in `configuration`
    pub fn minimum_speed(
        &self,
        gpf: &GlobalPerformanceFactors,
        configuration: Configuration,
    ) -> f64 {
        match configuration {
            Configuration::Takeoff => gpf.c_v_min_to * self.v_stall_to,
            Configuration::InitialClimb => gpf.c_v_min * self.v_stall_ic,
            Configuration::Approach => gpf.c_v_min * self.v_stall_ap,
            Configuration::Landing => gpf.c_v_min * self.v_stall_ld,
            Configuration::Clean => gpf.c_v_min * self.v_stall_cr,
        }
    }
}

/// Returns the nominal bank angle [deg] for civil flights in `configuration`
pub fn nominal_bank_angle(gpf: &GlobalPerformanceFactors, configuration: Configuration) -> f64 {
    match configuration {
        Configuration::Takeoff | Configuration::Landing => gpf.phi_norm_civ_told_deg,
        _ => gpf.phi_norm_civ_others_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (AircraftCoefficients, GlobalPerformanceFactors) {
        (
            AircraftCoefficients::mock_jet(),
            GlobalPerformanceFactors::default(),
        )
    }

    #[test]
    fn test_climb_configurations() {
        let (ac, gpf) = setup();
        assert_eq!(
            ac.update_configuration(&gpf, 150.0, 200.0, VerticalMode::Climb),
            Configuration::Takeoff
        );
        assert_eq!(
            ac.update_configuration(&gpf, 150.0, 400.0, VerticalMode::Climb),
            Configuration::Takeoff
        );
        assert_eq!(
            ac.update_configuration(&gpf, 180.0, 1_000.0, VerticalMode::Climb),
            Configuration::InitialClimb
        );
        // exactly at the initial climb ceiling nothing matches until the default
        assert_eq!(
            ac.update_configuration(&gpf, 180.0, 2_000.0, VerticalMode::Climb),
            Configuration::Clean
        );
    }

    #[test]
    fn test_that_high_altitude_is_always_clean() {
        let (ac, gpf) = setup();
        for mode in [VerticalMode::Climb, VerticalMode::Level, VerticalMode::Descent] {
            for v in [100.0, 250.0, 320.0] {
                assert_eq!(
                    ac.update_configuration(&gpf, v, 20_000.0, mode),
                    Configuration::Clean
                );
            }
        }
    }

    #[test]
    fn test_descent_configurations() {
        let (ac, gpf) = setup();
        // v_min_cr + 10 = 1.3 * 143 + 10 = 195.9, v_min_ap + 10 = 1.3 * 111 + 10 = 154.3
        assert_eq!(
            ac.update_configuration(&gpf, 250.0, 1_500.0, VerticalMode::Descent),
            Configuration::Clean
        );
        assert_eq!(
            ac.update_configuration(&gpf, 180.0, 1_800.0, VerticalMode::Descent),
            Configuration::Approach
        );
        assert_eq!(
            ac.update_configuration(&gpf, 150.0, 1_800.0, VerticalMode::Descent),
            Configuration::Landing
        );
        // above the initial climb ceiling the clean check wins over any slow speed
        assert_eq!(
            ac.update_configuration(&gpf, 150.0, 2_500.0, VerticalMode::Descent),
            Configuration::Clean
        );
    }

    #[test]
    fn test_that_level_flight_at_low_altitude_defaults_to_clean() {
        let (ac, gpf) = setup();
        assert_eq!(
            ac.update_configuration(&gpf, 150.0, 1_500.0, VerticalMode::Level),
            Configuration::Clean
        );
    }

    #[test]
    fn test_minimum_speed_per_configuration() {
        let (ac, gpf) = setup();
        assert_eq!(ac.minimum_speed(&gpf, Configuration::Takeoff), 1.2 * 114.0);
        assert_eq!(ac.minimum_speed(&gpf, Configuration::InitialClimb), 1.3 * 120.0);
        assert_eq!(ac.minimum_speed(&gpf, Configuration::Clean), 1.3 * 143.0);
        assert_eq!(ac.minimum_speed(&gpf, Configuration::Approach), 1.3 * 111.0);
        assert_eq!(ac.minimum_speed(&gpf, Configuration::Landing), 1.3 * 106.0);
    }

    #[test]
    fn test_nominal_bank_angles() {
        let gpf = GlobalPerformanceFactors::default();
        assert_eq!(nominal_bank_angle(&gpf, Configuration::Takeoff), 15.0);
        assert_eq!(nominal_bank_angle(&gpf, Configuration::Landing), 15.0);
        assert_eq!(nominal_bank_angle(&gpf, Configuration::Clean), 30.0);
        assert_eq!(nominal_bank_angle(&gpf, Configuration::Approach), 30.0);
    }
}
