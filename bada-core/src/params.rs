//! Module containing physical constants and the BADA global performance factors.

use crate::imports::*;
use validator::Validate;

/// Unit conversions that should NEVER change
pub const M_PER_FT: f64 = 0.3048;
pub const MPS_PER_KT: f64 = 0.514444;
pub const SEC_PER_MIN: f64 = 60.0;
// Newtons per kilonewton, BADA fuel coefficients are given per kN of thrust
pub const N_PER_KN: f64 = 1_000.0;
// BADA masses in the coefficient record are in tonnes
pub const KG_PER_TONNE: f64 = 1_000.0;

/// ISA mean sea level temperature [K]
pub const T_0: f64 = 288.15;
/// ISA mean sea level pressure [Pa]
pub const P_0: f64 = 101_325.0;
/// ISA mean sea level density [kg/m^3]
pub const RHO_0: f64 = 1.225;
/// ISA mean sea level speed of sound [m/s]
pub const A_0: f64 = 340.294;
/// Adiabatic index of air [-]
pub const KAPPA: f64 = 1.4;
/// Real gas constant of air [m^2/(K*s^2)]
pub const R: f64 = 287.05287;
/// Gravitational acceleration [m/s^2]
pub const G_0: f64 = 9.80665;
/// ISA temperature gradient below the tropopause [K/m]
pub const BETA_T_BELOW_TROP: f64 = -0.0065;
/// Geopotential pressure altitude of the tropopause [m]
pub const H_P_TROP: f64 = 11_000.0;

/// Process-wide BADA global aircraft parameters.  Read-only once the
/// performance model has been built; `Default` gives the BADA 3 values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
pub struct GlobalPerformanceFactors {
    /// Maximum longitudinal acceleration for civil flights [ft/s^2]
    #[validate(range(min = 0))]
    pub a_l_max_civ: f64,
    /// Maximum normal acceleration for civil flights [ft/s^2]
    #[validate(range(min = 0))]
    pub a_n_max_civ: f64,
    /// Nominal bank angle for civil flight during take off and landing [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_norm_civ_told_deg: f64,
    /// Nominal bank angle for civil flight in all other phases [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_norm_civ_others_deg: f64,
    /// Nominal bank angle for military flights [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_norm_mil_deg: f64,
    /// Maximum bank angle for civil flight during take off and landing [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_max_civ_told_deg: f64,
    /// Maximum bank angle for civil flight during holding [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_max_civ_hold_deg: f64,
    /// Maximum bank angle for civil flight in all other phases [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_max_civ_others_deg: f64,
    /// Maximum bank angle for military flights [deg]
    #[validate(range(min = 0, max = 90))]
    pub phi_max_mil_deg: f64,
    /// Expedited descent drag multiplier [-]
    #[validate(range(min = 1))]
    pub c_des_exp: f64,
    /// Maximum cruise thrust coefficient [-]
    #[validate(range(min = 0, max = 1))]
    pub c_tcr: f64,
    /// Take-off thrust coefficient [-]
    #[validate(range(min = 0))]
    pub c_th_to: f64,
    /// Maximum altitude threshold for take-off [ft]
    #[validate(range(min = 0))]
    pub h_max_to_ft: f64,
    /// Maximum altitude threshold for initial climb [ft]
    #[validate(range(min = 0))]
    pub h_max_ic_ft: f64,
    /// Maximum altitude threshold for approach [ft]
    #[validate(range(min = 0))]
    pub h_max_ap_ft: f64,
    /// Maximum altitude threshold for landing [ft]
    #[validate(range(min = 0))]
    pub h_max_ld_ft: f64,
    /// Minimum speed coefficient for all phases except take-off [-]
    #[validate(range(min = 1))]
    pub c_v_min: f64,
    /// Minimum speed coefficient for take-off [-]
    #[validate(range(min = 1))]
    pub c_v_min_to: f64,
    /// Climb speed increments `V_D_CL_1` to `V_D_CL_8` [kt CAS]
    pub v_d_cl_kts: [f64; 8],
    /// Descent speed increments `V_D_DES_1` to `V_D_DES_7` [kt CAS]
    pub v_d_des_kts: [f64; 7],
    /// Holding speeds up to FL140, FL140-FL200 and FL200-FL340 [kt CAS]
    pub v_hold_kts: [f64; 3],
    /// Holding Mach number above FL340 [-]
    #[validate(range(min = 0, max = 1))]
    pub m_hold: f64,
    /// Runway backtrack speed [kt]
    pub v_backtrack_kts: f64,
    /// Taxi speed [kt]
    pub v_taxi_kts: f64,
    /// Apron speed [kt]
    pub v_apron_kts: f64,
    /// Gate speed [kt]
    pub v_gate_kts: f64,
    /// Maximum reduction in power for turboprops [-]
    #[validate(range(min = 0, max = 1))]
    pub c_red_turbo: f64,
    /// Maximum reduction in power for pistons [-]
    #[validate(range(min = 0, max = 1))]
    pub c_red_piston: f64,
    /// Maximum reduction in power for jets [-]
    #[validate(range(min = 0, max = 1))]
    pub c_red_jet: f64,
}

impl Default for GlobalPerformanceFactors {
    fn default() -> Self {
        Self {
            a_l_max_civ: 2.0,
            a_n_max_civ: 5.0,
            phi_norm_civ_told_deg: 15.0,
            phi_norm_civ_others_deg: 30.0,
            phi_norm_mil_deg: 50.0,
            phi_max_civ_told_deg: 25.0,
            phi_max_civ_hold_deg: 35.0,
            phi_max_civ_others_deg: 45.0,
            phi_max_mil_deg: 70.0,
            c_des_exp: 1.6,
            c_tcr: 0.95,
            c_th_to: 1.2,
            h_max_to_ft: 400.0,
            h_max_ic_ft: 2_000.0,
            h_max_ap_ft: 8_000.0,
            h_max_ld_ft: 3_000.0,
            c_v_min: 1.3,
            c_v_min_to: 1.2,
            v_d_cl_kts: [5.0, 10.0, 30.0, 60.0, 80.0, 20.0, 30.0, 35.0],
            v_d_des_kts: [5.0, 10.0, 20.0, 50.0, 5.0, 10.0, 20.0],
            v_hold_kts: [230.0, 240.0, 265.0],
            m_hold: 0.83,
            v_backtrack_kts: 35.0,
            v_taxi_kts: 15.0,
            v_apron_kts: 10.0,
            v_gate_kts: 5.0,
            c_red_turbo: 0.25,
            c_red_piston: 0.0,
            c_red_jet: 0.15,
        }
    }
}

impl SerdeAPI for GlobalPerformanceFactors {
    fn init(&mut self) -> anyhow::Result<()> {
        if let Err(e) = self.validate() {
            bail!(e)
        }
        ensure!(
            self.h_max_to_ft < self.h_max_ic_ft,
            "{}\ntake-off threshold must lie below the initial climb threshold",
            format_dbg!((self.h_max_to_ft, self.h_max_ic_ft))
        );
        ensure!(
            self.h_max_ld_ft < self.h_max_ap_ft,
            "{}\nlanding threshold must lie below the approach threshold",
            format_dbg!((self.h_max_ld_ft, self.h_max_ap_ft))
        );
        Ok(())
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_that_defaults_pass_validation() {
        let mut gpf = GlobalPerformanceFactors::default();
        assert!(gpf.init().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_values() {
        let gpf = GlobalPerformanceFactors::default();
        let yaml = gpf.to_yaml().unwrap();
        let gpf_de = GlobalPerformanceFactors::from_yaml(yaml).unwrap();
        assert_eq!(gpf, gpf_de);
    }

    #[test]
    fn test_that_out_of_order_thresholds_are_rejected() {
        let mut gpf = GlobalPerformanceFactors {
            h_max_to_ft: 2_500.0,
            ..Default::default()
        };
        assert!(gpf.init().is_err());
        gpf.h_max_to_ft = 400.0;
        gpf.c_tcr = 1.5;
        let err = gpf.init().unwrap_err();
        assert!(err.downcast_ref::<validator::ValidationErrors>().is_some());
    }

    #[test]
    fn test_that_isa_constants_are_consistent() {
        // a0 = sqrt(kappa * R * T0) and rho0 = p0 / (R * T0)
        assert!(((KAPPA * R * T_0).sqrt() - A_0).abs() < 1e-2);
        assert!((P_0 / (R * T_0) - RHO_0).abs() < 1e-4);
    }
}
