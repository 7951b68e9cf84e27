//! International Standard Atmosphere with a temperature deviation, and the
//! airspeed conversions that depend on it.
//!
//! All kernels work in SI units: geopotential pressure altitude in m,
//! temperatures in K, pressure in Pa, density in kg/m^3 and speeds in m/s.
//! Each scalar kernel has an element-wise counterpart over equal length
//! arrays, suffixed with `_arr`.

use crate::imports::*;
use crate::params::*;

/// Exponent of the barometric power law below the tropopause
const BAROMETRIC_EXP: f64 = -G_0 / (BETA_T_BELOW_TROP * R);

/// Returns air temperature [K]
/// # Arguments
/// * `h_p_m` - geopotential pressure altitude [m]
/// * `d_t` - temperature deviation from ISA at mean sea level [K]
pub fn temperature(h_p_m: f64, d_t: f64) -> f64 {
    if h_p_m < H_P_TROP {
        T_0 + d_t + BETA_T_BELOW_TROP * h_p_m
    } else {
        T_0 + d_t + BETA_T_BELOW_TROP * H_P_TROP
    }
}

/// Returns air pressure [Pa]
/// # Arguments
/// * `h_p_m` - geopotential pressure altitude [m]
/// * `t` - air temperature at `h_p_m`, see [temperature] [K]
/// * `d_t` - temperature deviation from ISA at mean sea level [K]
pub fn pressure(h_p_m: f64, t: f64, d_t: f64) -> f64 {
    if h_p_m <= H_P_TROP {
        P_0 * ((t - d_t) / T_0).powf(BAROMETRIC_EXP)
    } else {
        let t_trop = temperature(H_P_TROP, d_t);
        let p_trop = P_0 * ((t_trop - d_t) / T_0).powf(BAROMETRIC_EXP);
        p_trop * (-G_0 / (R * temperature(H_P_TROP, 0.0)) * (h_p_m - H_P_TROP)).exp()
    }
}

/// Returns air density [kg/m^3] from pressure [Pa] and temperature [K]
pub fn density(p: f64, t: f64) -> f64 {
    p / (R * t)
}

/// Returns speed of sound [m/s] at temperature `t` [K]
pub fn speed_of_sound(t: f64) -> f64 {
    (KAPPA * R * t).sqrt()
}

/// Converts calibrated airspeed to true airspeed [m/s]
/// # Arguments
/// * `v_cas` - calibrated airspeed [m/s]
/// * `p` - air pressure [Pa]
/// * `rho` - air density [kg/m^3]
pub fn cas_to_tas(v_cas: f64, p: f64, rho: f64) -> f64 {
    let mu = (KAPPA - 1.0) / KAPPA;
    let impact = (1.0 + mu / 2.0 * RHO_0 / P_0 * v_cas.powi(2)).powf(1.0 / mu) - 1.0;
    (2.0 / mu * p / rho * ((1.0 + P_0 / p * impact).powf(mu) - 1.0)).sqrt()
}

/// Converts true airspeed to calibrated airspeed [m/s], inverse of [cas_to_tas]
/// # Arguments
/// * `v_tas` - true airspeed [m/s]
/// * `p` - air pressure [Pa]
/// * `rho` - air density [kg/m^3]
pub fn tas_to_cas(v_tas: f64, p: f64, rho: f64) -> f64 {
    let mu = (KAPPA - 1.0) / KAPPA;
    let impact = (1.0 + mu / 2.0 * rho / p * v_tas.powi(2)).powf(1.0 / mu) - 1.0;
    (2.0 / mu * P_0 / RHO_0 * ((1.0 + p / P_0 * impact).powf(mu) - 1.0)).sqrt()
}

/// Converts Mach number to true airspeed [m/s] at temperature `t` [K]
pub fn mach_to_tas(mach: f64, t: f64) -> f64 {
    mach * speed_of_sound(t)
}

/// Converts true airspeed [m/s] to Mach number at temperature `t` [K]
pub fn tas_to_mach(v_tas: f64, t: f64) -> f64 {
    v_tas / speed_of_sound(t)
}

/// Returns the Mach/CAS transition altitude [m], the geopotential pressure
/// altitude at which `v_cas` and `mach` give the same true airspeed.
/// # Arguments
/// * `v_cas` - calibrated airspeed [m/s]
/// * `mach` - Mach number [-]
/// * `d_t` - temperature deviation from ISA at mean sea level [K]
pub fn transition_altitude(v_cas: f64, mach: f64, d_t: f64) -> f64 {
    let exp = KAPPA / (KAPPA - 1.0);
    let p_trans = P_0 * ((1.0 + (KAPPA - 1.0) / 2.0 * (v_cas / A_0).powi(2)).powf(exp) - 1.0)
        / ((1.0 + (KAPPA - 1.0) / 2.0 * mach.powi(2)).powf(exp) - 1.0);
    let p_trop = pressure(H_P_TROP, temperature(H_P_TROP, d_t), d_t);
    if p_trans >= p_trop {
        T_0 / BETA_T_BELOW_TROP * ((p_trans / P_0).powf(-BETA_T_BELOW_TROP * R / G_0) - 1.0)
    } else {
        H_P_TROP - R * temperature(H_P_TROP, 0.0) / G_0 * (p_trans / p_trop).ln()
    }
}

/// Air state at one altitude
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Temperature [K]
    pub temperature: f64,
    /// Pressure [Pa]
    pub pressure: f64,
    /// Density [kg/m^3]
    pub density: f64,
    /// Speed of sound [m/s]
    pub speed_of_sound: f64,
}

impl Atmosphere {
    /// Evaluates the atmosphere at `h_p_m` [m] with temperature deviation `d_t` [K]
    pub fn at(h_p_m: f64, d_t: f64) -> Self {
        let t = temperature(h_p_m, d_t);
        let p = pressure(h_p_m, t, d_t);
        Self {
            temperature: t,
            pressure: p,
            density: density(p, t),
            speed_of_sound: speed_of_sound(t),
        }
    }

    pub fn cas_to_tas(&self, v_cas: f64) -> f64 {
        cas_to_tas(v_cas, self.pressure, self.density)
    }

    pub fn tas_to_cas(&self, v_tas: f64) -> f64 {
        tas_to_cas(v_tas, self.pressure, self.density)
    }

    pub fn tas_to_mach(&self, v_tas: f64) -> f64 {
        v_tas / self.speed_of_sound
    }
}

fn zip2(
    a: &Array1<f64>,
    b: &Array1<f64>,
    f: impl Fn(f64, f64) -> f64,
) -> anyhow::Result<Array1<f64>> {
    ensure_same_len!(a, b);
    Ok(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)))
}

fn zip3(
    a: &Array1<f64>,
    b: &Array1<f64>,
    c: &Array1<f64>,
    f: impl Fn(f64, f64, f64) -> f64,
) -> anyhow::Result<Array1<f64>> {
    ensure_same_len!(a, b, c);
    Ok(Zip::from(a).and(b).and(c).map_collect(|&x, &y, &z| f(x, y, z)))
}

pub fn temperature_arr(h_p_m: &Array1<f64>, d_t: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
    zip2(h_p_m, d_t, temperature)
}

pub fn pressure_arr(
    h_p_m: &Array1<f64>,
    t: &Array1<f64>,
    d_t: &Array1<f64>,
) -> anyhow::Result<Array1<f64>> {
    zip3(h_p_m, t, d_t, pressure)
}

pub fn density_arr(p: &Array1<f64>, t: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
    zip2(p, t, density)
}

pub fn speed_of_sound_arr(t: &Array1<f64>) -> Array1<f64> {
    t.mapv(speed_of_sound)
}

pub fn cas_to_tas_arr(
    v_cas: &Array1<f64>,
    p: &Array1<f64>,
    rho: &Array1<f64>,
) -> anyhow::Result<Array1<f64>> {
    zip3(v_cas, p, rho, cas_to_tas)
}

pub fn tas_to_cas_arr(
    v_tas: &Array1<f64>,
    p: &Array1<f64>,
    rho: &Array1<f64>,
) -> anyhow::Result<Array1<f64>> {
    zip3(v_tas, p, rho, tas_to_cas)
}

pub fn mach_to_tas_arr(mach: &Array1<f64>, t: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
    zip2(mach, t, mach_to_tas)
}

pub fn tas_to_mach_arr(v_tas: &Array1<f64>, t: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
    zip2(v_tas, t, tas_to_mach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::kts_to_mps;
    use ndarray::array;

    #[test]
    fn test_temperature_lapse_below_tropopause() {
        for h in [0.0, 1_000.0, 5_500.0, 10_999.0] {
            for d_t in [-15.0, 0.0, 20.0] {
                let expected = T_0 + d_t + BETA_T_BELOW_TROP * h;
                assert!(temperature(h, d_t).approx_eq(&expected, 1e-12));
            }
        }
    }

    #[test]
    fn test_temperature_frozen_above_tropopause() {
        let t_trop = temperature(H_P_TROP, 5.0);
        assert!(t_trop.approx_eq(&(T_0 + 5.0 - 71.5), 1e-12));
        assert_eq!(temperature(15_000.0, 5.0), t_trop);
        assert_eq!(temperature(20_000.0, 5.0), t_trop);
    }

    #[test]
    fn test_that_density_satisfies_gas_law() {
        for h in [0.0, 3_000.0, 11_000.0, 14_000.0, 19_000.0] {
            for d_t in [-10.0, 0.0, 10.0] {
                let t = temperature(h, d_t);
                let p = pressure(h, t, d_t);
                let rho = density(p, t);
                assert!((rho * R * t - p).abs() < 1e-9 * p.max(1.0));
            }
        }
    }

    #[test]
    fn test_isa_reference_values() {
        let msl = Atmosphere::at(0.0, 0.0);
        assert!(msl.pressure.approx_eq(&P_0, 1e-12));
        assert!(msl.density.approx_eq(&RHO_0, 1e-4));
        let trop = Atmosphere::at(H_P_TROP, 0.0);
        assert!((trop.pressure - 22_632.0).abs() < 5.0);
        assert!((trop.temperature - 216.65).abs() < 1e-9);
    }

    #[test]
    fn test_that_pressure_is_continuous_across_tropopause() {
        let t = temperature(H_P_TROP, 0.0);
        let below = pressure(H_P_TROP, t, 0.0);
        let above = pressure(H_P_TROP + 1e-6, t, 0.0);
        assert!(below.approx_eq(&above, 1e-6));
    }

    #[test]
    fn test_cas_tas_roundtrip() {
        let msl = Atmosphere::at(0.0, 0.0);
        for v_kts in (0..=400).step_by(10) {
            let v = kts_to_mps(v_kts as f64);
            let back = tas_to_cas(cas_to_tas(v, msl.pressure, msl.density), msl.pressure, msl.density);
            assert!(back.approx_eq(&v, 1e-6));
        }
        // at altitude, tas exceeds cas
        let fl350 = Atmosphere::at(10_668.0, 0.0);
        let v = kts_to_mps(250.0);
        assert!(fl350.cas_to_tas(v) > v);
        assert!(fl350.tas_to_cas(fl350.cas_to_tas(v)).approx_eq(&v, 1e-9));
    }

    #[test]
    fn test_that_cas_equals_tas_at_isa_msl() {
        let v = 120.0;
        assert!(cas_to_tas(v, P_0, RHO_0).approx_eq(&v, 1e-12));
    }

    #[test]
    fn test_mach_tas_inverse() {
        for t in [200.0, 250.0, 288.15, 320.0] {
            for mach in [0.1, 0.5, 0.78, 0.99] {
                assert!(tas_to_mach(mach_to_tas(mach, t), t).approx_eq(&mach, 1e-12));
            }
        }
    }

    #[test]
    fn test_transition_altitude_for_typical_jet_schedule() {
        let h = transition_altitude(kts_to_mps(300.0), 0.78, 0.0);
        assert!(h > 8_800.0 && h < 9_100.0, "{}", format_dbg!(h));
        // lower mach at the same cas crosses over lower
        assert!(transition_altitude(kts_to_mps(300.0), 0.70, 0.0) < h);
    }

    #[test]
    fn test_array_kernels_check_length() {
        let h = array![0.0, 5_000.0, 12_000.0];
        let d_t = array![0.0, 0.0, 0.0];
        let t = temperature_arr(&h, &d_t).unwrap();
        assert_eq!(t[2], temperature(12_000.0, 0.0));
        let p = pressure_arr(&h, &t, &d_t).unwrap();
        let rho = density_arr(&p, &t).unwrap();
        assert!(rho[0].approx_eq(&RHO_0, 1e-4));
        assert!(temperature_arr(&h, &array![0.0]).is_err());
        let v = array![100.0, 150.0, 200.0];
        let tas = cas_to_tas_arr(&v, &p, &rho).unwrap();
        assert!(tas_to_cas_arr(&tas, &p, &rho).unwrap().approx_eq(&v, 1e-9));
        let mach = tas_to_mach_arr(&tas, &t).unwrap();
        assert!(mach_to_tas_arr(&mach, &t).unwrap().approx_eq(&tas, 1e-12));
        assert_eq!(speed_of_sound_arr(&t).len(), 3);
    }
}
