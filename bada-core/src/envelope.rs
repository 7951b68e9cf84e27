//! Flight envelope limits and turn geometry.

use crate::coefficients::AircraftCoefficients;
use crate::params::*;

impl AircraftCoefficients {
    /// Returns maximum altitude [ft] at `mass_kg` and temperature deviation
    /// `d_t` [K].  Aircraft without a published `h_max` are limited by `h_mo` alone.
    pub fn maximum_altitude(&self, d_t: f64, mass_kg: f64) -> f64 {
        if self.h_max == 0.0 {
            return self.h_mo;
        }
        let h_max_act = self.h_max
            + self.g_t * (d_t - self.c_tc_4)
            + self.g_w * (self.m_max * KG_PER_TONNE - mass_kg);
        self.h_mo.min(h_max_act)
    }

    /// Returns maximum operating speed [kt CAS] and Mach number
    pub fn maximum_speed(&self) -> (f64, f64) {
        (self.v_mo, self.m_mo)
    }

    /// Scales reference speed `v_ref` [kt] from reference mass to `mass_kg`
    pub fn operating_speed(&self, mass_kg: f64, v_ref: f64) -> f64 {
        v_ref * (mass_kg / (self.m_ref * KG_PER_TONNE)).sqrt()
    }

    /// Returns empty mass [kg], taken as the BADA minimum mass
    pub fn empty_mass(&self) -> f64 {
        self.m_min * KG_PER_TONNE
    }
}

/// Returns maximum change in true airspeed [ft/s] over `dt` [s] for civil flights
pub fn max_delta_tas(gpf: &GlobalPerformanceFactors, dt: f64) -> f64 {
    gpf.a_l_max_civ * dt
}

/// Returns maximum change in rate of climb or descent [ft/s] over `dt` [s]
/// # Arguments
/// * `gpf` - global performance factors
/// * `dt` - time step [s]
/// * `v_tas` - true airspeed [ft/s]
/// * `rocd` - current rate of climb or descent [ft/s]
pub fn max_delta_rocd(gpf: &GlobalPerformanceFactors, dt: f64, v_tas: f64, rocd: f64) -> f64 {
    ((rocd / v_tas).asin() - gpf.a_n_max_civ * dt / v_tas).sin() * (v_tas + dt)
}

/// Returns rate of turn [deg/s] at `bank_angle_deg` and `v_tas` [m/s]
pub fn rate_of_turn(bank_angle_deg: f64, v_tas: f64) -> f64 {
    (G_0 / v_tas * bank_angle_deg.to_radians().tan()).to_degrees()
}

/// Returns the bank angle [deg] that gives `rate_of_turn_deg` [deg/s] at `v_tas` [m/s]
pub fn bank_angle(rate_of_turn_deg: f64, v_tas: f64) -> f64 {
    (rate_of_turn_deg.to_radians() * v_tas / G_0).atan().to_degrees()
}

/// Returns turn radius [m] at `bank_angle_deg` and `v_tas` [m/s]
pub fn turn_radius(bank_angle_deg: f64, v_tas: f64) -> f64 {
    v_tas.powi(2) / G_0 / bank_angle_deg.to_radians().tan()
}

/// Returns the maximum holding speed at `h_p_ft` [ft].  The value is CAS [kt]
/// up to FL340 and a Mach number above.
pub fn holding_speed(gpf: &GlobalPerformanceFactors, h_p_ft: f64) -> f64 {
    if h_p_ft <= 14_000.0 {
        gpf.v_hold_kts[0]
    } else if h_p_ft <= 20_000.0 {
        gpf.v_hold_kts[1]
    } else if h_p_ft <= 34_000.0 {
        gpf.v_hold_kts[2]
    } else {
        gpf.m_hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ApproxEq;

    #[test]
    fn test_maximum_altitude() {
        let jet = AircraftCoefficients::mock_jet();
        // at maximum mass only the temperature term moves the published value
        assert!(jet
            .maximum_altitude(jet.c_tc_4, 77_000.0)
            .approx_eq(&jet.h_max, 1e-12));
        // lighter aircraft fly higher but never above h_mo
        let light = jet.maximum_altitude(0.0, 70_000.0);
        assert!(light > jet.h_max);
        assert!(light <= jet.h_mo);
        assert_eq!(jet.maximum_altitude(0.0, 40_000.0), jet.h_mo);
        // hot days lower the ceiling
        assert!(jet.maximum_altitude(30.0, 77_000.0) < jet.maximum_altitude(0.0, 77_000.0));
        let piston = AircraftCoefficients::mock_piston();
        assert_eq!(piston.maximum_altitude(15.0, 900.0), piston.h_mo);
    }

    #[test]
    fn test_operating_speed_and_masses() {
        let jet = AircraftCoefficients::mock_jet();
        assert_eq!(jet.operating_speed(64_000.0, 143.0), 143.0);
        assert!(jet
            .operating_speed(4.0 * 64_000.0, 100.0)
            .approx_eq(&200.0, 1e-12));
        assert_eq!(jet.empty_mass(), 39_000.0);
        assert_eq!(jet.maximum_speed(), (350.0, 0.82));
    }

    #[test]
    fn test_turn_relations_are_consistent() {
        let v = 120.0;
        for bank in [5.0, 15.0, 25.0, 35.0] {
            let rot = rate_of_turn(bank, v);
            assert!(bank_angle(rot, v).approx_eq(&bank, 1e-9));
            // radius times angular rate gives the speed back
            let radius = turn_radius(bank, v);
            assert!((radius * rot.to_radians()).approx_eq(&v, 1e-9));
        }
    }

    #[test]
    fn test_standard_rate_turn() {
        // a rate one turn at 250 kt needs about 34 deg of bank
        let bank = bank_angle(3.0, 250.0 * MPS_PER_KT);
        assert!(bank > 33.0 && bank < 36.0, "{}", format_dbg!(bank));
    }

    #[test]
    fn test_acceleration_limits() {
        let gpf = GlobalPerformanceFactors::default();
        assert_eq!(max_delta_tas(&gpf, 0.5), 1.0);
        // from level flight the limit is a pull down at the normal acceleration limit
        let d = max_delta_rocd(&gpf, 1.0, 400.0, 0.0);
        assert!(d < 0.0);
        assert!(d.approx_eq(&((-5.0_f64 / 400.0).sin() * 401.0), 1e-12));
    }

    #[test]
    fn test_holding_speed_bands() {
        let gpf = GlobalPerformanceFactors::default();
        assert_eq!(holding_speed(&gpf, 5_000.0), 230.0);
        assert_eq!(holding_speed(&gpf, 14_000.0), 230.0);
        assert_eq!(holding_speed(&gpf, 18_000.0), 240.0);
        assert_eq!(holding_speed(&gpf, 30_000.0), 265.0);
        assert_eq!(holding_speed(&gpf, 37_000.0), 0.83);
    }
}
