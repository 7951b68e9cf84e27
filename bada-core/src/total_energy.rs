//! Total energy model: the balance of thrust and drag is shared between
//! climbing and accelerating according to the energy share factor.

use crate::coefficients::AircraftCoefficients;
use crate::enums::*;
use crate::params::*;

/// Returns the energy share factor, the fraction of excess power spent on
/// climbing
/// # Arguments
/// * `h_p_m` - geopotential pressure altitude [m]
/// * `t` - air temperature [K]
/// * `d_t` - temperature deviation from ISA [K]
/// * `mach` - Mach number [-]
/// * `speed_mode` - autopilot speed mode
/// * `vertical_mode` - vertical mode
pub fn energy_share_factor(
    h_p_m: f64,
    t: f64,
    d_t: f64,
    mach: f64,
    speed_mode: SpeedMode,
    vertical_mode: VerticalMode,
) -> f64 {
    let temp_term = KAPPA * R * BETA_T_BELOW_TROP / 2.0 / G_0 * mach.powi(2) * (t - d_t) / t;
    match speed_mode {
        SpeedMode::ConstantMach => {
            if h_p_m > H_P_TROP {
                1.0
            } else {
                1.0 / (1.0 + temp_term)
            }
        }
        SpeedMode::ConstantCas => {
            if h_p_m <= H_P_TROP {
                1.0 / (1.0 + temp_term + compressibility_term(mach))
            } else {
                1.0 / (1.0 + compressibility_term(mach))
            }
        }
        SpeedMode::Accelerate => match vertical_mode {
            VerticalMode::Climb => 0.3,
            VerticalMode::Descent => 1.7,
            VerticalMode::Level => 0.0,
        },
        SpeedMode::Decelerate => match vertical_mode {
            VerticalMode::Descent => 0.3,
            VerticalMode::Climb => 1.7,
            VerticalMode::Level => 0.0,
        },
    }
}

/// Change in dynamic pressure ratio with Mach at constant CAS
fn compressibility_term(mach: f64) -> f64 {
    let base = 1.0 + (KAPPA - 1.0) / 2.0 * mach.powi(2);
    base.powf(-1.0 / (KAPPA - 1.0)) * (base.powf(KAPPA / (KAPPA - 1.0)) - 1.0)
}

/// Returns rate of climb or descent [m/s] of geopotential pressure altitude
/// # Arguments
/// * `t` - air temperature [K]
/// * `d_t` - temperature deviation from ISA [K]
/// * `mass_kg` - aircraft mass [kg]
/// * `drag` - drag [N]
/// * `esf` - energy share factor [-]
/// * `thrust` - thrust [N]
/// * `v_tas` - true airspeed [m/s]
/// * `c_pow_red` - reduced climb power coefficient [-]
pub fn tem_rocd(
    t: f64,
    d_t: f64,
    mass_kg: f64,
    drag: f64,
    esf: f64,
    thrust: f64,
    v_tas: f64,
    c_pow_red: f64,
) -> f64 {
    (t - d_t) / t * (thrust - drag) * v_tas * c_pow_red / mass_kg / G_0 * esf
}

/// Returns true airspeed acceleration [m/s^2].  The climb term is dropped
/// when the aircraft is not moving.
pub fn tem_accel(
    t: f64,
    d_t: f64,
    mass_kg: f64,
    drag: f64,
    rocd: f64,
    thrust: f64,
    v_tas: f64,
) -> f64 {
    if v_tas == 0.0 {
        (thrust - drag) / mass_kg
    } else {
        (thrust - drag) / mass_kg - G_0 / v_tas * rocd * t / (t - d_t)
    }
}

/// Returns the thrust [N] needed to fly `rocd` [m/s].  Divides by `esf` and
/// `v_tas` without guarding either.
pub fn tem_thrust(
    t: f64,
    d_t: f64,
    mass_kg: f64,
    drag: f64,
    esf: f64,
    rocd: f64,
    v_tas: f64,
) -> f64 {
    rocd / esf / ((t - d_t) / t) * mass_kg * G_0 / v_tas + drag
}

impl AircraftCoefficients {
    /// Returns the reduced climb power coefficient, exactly 1.0 at or above
    /// 80 % of `h_max_ft`
    /// # Arguments
    /// * `gpf` - global performance factors
    /// * `mass_kg` - aircraft mass [kg]
    /// * `h_p_ft` - geopotential pressure altitude [ft]
    /// * `h_max_ft` - maximum altitude [ft]
    pub fn reduced_climb_power(
        &self,
        gpf: &GlobalPerformanceFactors,
        mass_kg: f64,
        h_p_ft: f64,
        h_max_ft: f64,
    ) -> f64 {
        if h_p_ft >= 0.8 * h_max_ft {
            return 1.0;
        }
        let c_red = match self.engine_type {
            EngineType::Turboprop => gpf.c_red_turbo,
            EngineType::Piston => gpf.c_red_piston,
            EngineType::Jet => gpf.c_red_jet,
        };
        1.0 - c_red * (self.m_max - mass_kg / KG_PER_TONNE) / (self.m_max - self.m_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::Atmosphere;
    use crate::traits::ApproxEq;

    #[test]
    fn test_constant_mach_above_tropopause_spends_everything_on_climb() {
        let atm = Atmosphere::at(11_500.0, 0.0);
        for vm in [VerticalMode::Climb, VerticalMode::Descent] {
            let esf = energy_share_factor(
                11_500.0,
                atm.temperature,
                0.0,
                0.78,
                SpeedMode::ConstantMach,
                vm,
            );
            assert_eq!(esf, 1.0);
        }
    }

    #[test]
    fn test_constant_speed_factors() {
        let h = 6_000.0;
        let atm = Atmosphere::at(h, 0.0);
        let mach_below = energy_share_factor(
            h,
            atm.temperature,
            0.0,
            0.6,
            SpeedMode::ConstantMach,
            VerticalMode::Climb,
        );
        // falling temperature helps a constant Mach climb
        assert!(mach_below > 1.0);
        let cas_below = energy_share_factor(
            h,
            atm.temperature,
            0.0,
            0.6,
            SpeedMode::ConstantCas,
            VerticalMode::Climb,
        );
        // constant CAS means accelerating in TAS while climbing
        assert!(cas_below < 1.0 && cas_below > 0.5, "{}", format_dbg!(cas_below));
        let cas_above = energy_share_factor(
            12_000.0,
            216.65,
            0.0,
            0.6,
            SpeedMode::ConstantCas,
            VerticalMode::Climb,
        );
        assert!(cas_above.approx_eq(&(1.0 / (1.0 + compressibility_term(0.6))), 1e-12));
    }

    #[test]
    fn test_acceleration_factors() {
        let esf = |sm, vm| energy_share_factor(3_000.0, 268.65, 0.0, 0.5, sm, vm);
        assert_eq!(esf(SpeedMode::Accelerate, VerticalMode::Climb), 0.3);
        assert_eq!(esf(SpeedMode::Accelerate, VerticalMode::Descent), 1.7);
        assert_eq!(esf(SpeedMode::Accelerate, VerticalMode::Level), 0.0);
        assert_eq!(esf(SpeedMode::Decelerate, VerticalMode::Descent), 0.3);
        assert_eq!(esf(SpeedMode::Decelerate, VerticalMode::Climb), 1.7);
        assert_eq!(esf(SpeedMode::Decelerate, VerticalMode::Level), 0.0);
    }

    #[test]
    fn test_tem_thrust_inverts_tem_rocd() {
        let (t, d_t, m, drag, esf, v) = (250.0, 5.0, 60_000.0, 40_000.0, 0.8, 200.0);
        let rocd = tem_rocd(t, d_t, m, drag, esf, 90_000.0, v, 1.0);
        assert!(rocd > 0.0);
        let thrust = tem_thrust(t, d_t, m, drag, esf, rocd, v);
        assert!(thrust.approx_eq(&90_000.0, 1e-9), "{}", format_dbg!(thrust));
    }

    #[test]
    fn test_tem_accel() {
        assert_eq!(tem_accel(288.15, 0.0, 1_000.0, 500.0, 3.0, 2_500.0, 0.0), 2.0);
        // with all excess power in the climb there is nothing left to accelerate
        let (t, m, drag, thr, v) = (288.15, 60_000.0, 30_000.0, 50_000.0, 100.0);
        let rocd = tem_rocd(t, 0.0, m, drag, 1.0, thr, v, 1.0);
        assert!(tem_accel(t, 0.0, m, drag, rocd, thr, v).abs() < 1e-12);
    }

    #[test]
    fn test_reduced_climb_power() {
        let gpf = GlobalPerformanceFactors::default();
        let jet = AircraftCoefficients::mock_jet();
        let h_max = 39_000.0;
        assert_eq!(jet.reduced_climb_power(&gpf, 50_000.0, 0.8 * h_max, h_max), 1.0);
        assert_eq!(jet.reduced_climb_power(&gpf, 50_000.0, 35_000.0, h_max), 1.0);
        // at maximum mass there is no reduction
        assert_eq!(jet.reduced_climb_power(&gpf, 77_000.0, 10_000.0, h_max), 1.0);
        // at minimum mass the full reduction applies
        assert!(jet
            .reduced_climb_power(&gpf, 39_000.0, 10_000.0, h_max)
            .approx_eq(&(1.0 - gpf.c_red_jet), 1e-12));
        let piston = AircraftCoefficients::mock_piston();
        assert_eq!(piston.reduced_climb_power(&gpf, 800.0, 2_000.0, 14_000.0), 1.0);
    }
}
