//! Aerodynamic drag and the low speed buffet limit.

use crate::coefficients::AircraftCoefficients;
use crate::enums::Configuration;
use crate::params::*;
use std::f64::consts::PI;

impl AircraftCoefficients {
    /// Returns the drag coefficient for lift coefficient `c_l` in `configuration`.
    /// Approach and landing fall back to the cruise polar when the aircraft
    /// has no non-clean data.
    pub fn drag_coefficient(&self, c_l: f64, configuration: Configuration) -> f64 {
        let clean = self.c_d0_cr + self.c_d2_cr * c_l.powi(2);
        match configuration {
            Configuration::Approach if self.c_d2_ap != 0.0 => {
                self.c_d0_ap + self.c_d2_ap * c_l.powi(2)
            }
            Configuration::Landing if self.c_d2_ld != 0.0 => {
                self.c_d0_ld + self.c_d0_ldg + self.c_d2_ld * c_l.powi(2)
            }
            _ => clean,
        }
    }

    /// Returns aerodynamic drag [N], exactly 0 when the aircraft is not moving
    /// # Arguments
    /// * `v_tas` - true airspeed [m/s]
    /// * `bank_angle_deg` - bank angle [deg]
    /// * `mass_kg` - aircraft mass [kg]
    /// * `rho` - air density [kg/m^3]
    /// * `configuration` - aerodynamic configuration
    /// * `expedite_factor` - drag multiplier, see [expedite_descent_factor]
    pub fn drag(
        &self,
        v_tas: f64,
        bank_angle_deg: f64,
        mass_kg: f64,
        rho: f64,
        configuration: Configuration,
        expedite_factor: f64,
    ) -> f64 {
        if v_tas == 0.0 {
            return 0.0;
        }
        let c_l = 2.0 * mass_kg * G_0
            / (rho * v_tas.powi(2) * self.wing_area_m2 * bank_angle_deg.to_radians().cos());
        let c_d = self.drag_coefficient(c_l, configuration);
        c_d * rho * v_tas.powi(2) * self.wing_area_m2 / 2.0 * expedite_factor
    }

    /// Returns the low speed buffet limit as a Mach number, the largest
    /// positive root of `k*M^3 - c_lbo*M^2 + (m*g/S)/(0.583*p) = 0`.
    ///
    /// The roots come from the trigonometric solution, which needs the cubic
    /// to have three real roots.  Outside that regime the result is NaN.
    /// # Arguments
    /// * `p` - air pressure [Pa]
    /// * `mass_kg` - aircraft mass [kg]
    pub fn low_speed_buffeting_limit(&self, p: f64, mass_kg: f64) -> f64 {
        let a = -self.c_lbo / self.k;
        let c = mass_kg * G_0 / self.wing_area_m2 / (0.583 * p) / self.k;
        let q = -a.powi(2) / 9.0;
        let r = (-27.0 * c - 2.0 * a.powi(3)) / 54.0;
        let theta = (r / (-q.powi(3)).sqrt()).acos();
        (0..3)
            .map(|i| 2.0 * (-q).sqrt() * (theta / 3.0 + 2.0 * PI * i as f64 / 3.0).cos() - a / 3.0)
            .filter(|root| *root > 0.0)
            .fold(f64::NAN, f64::max)
    }
}

/// Returns the drag multiplier for an expedited descent
pub fn expedite_descent_factor(gpf: &GlobalPerformanceFactors, expedite_descent: bool) -> f64 {
    if expedite_descent {
        gpf.c_des_exp
    } else {
        1.0
    }
}
