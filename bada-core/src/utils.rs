//! Module containing miscellaneous utility functions.

use crate::imports::*;
use crate::params::*;
use rayon::prelude::*;

/// Fleet size from which per-slot kernels are spread over the rayon pool
pub const PAR_SLOT_THRESHOLD: usize = 256;

pub fn kts_to_mps(v: f64) -> f64 {
    v * MPS_PER_KT
}

pub fn mps_to_kts(v: f64) -> f64 {
    v / MPS_PER_KT
}

pub fn ft_to_m(h: f64) -> f64 {
    h * M_PER_FT
}

pub fn m_to_ft(h: f64) -> f64 {
    h / M_PER_FT
}

/// Converts a vertical speed from m/s to ft/min
pub fn mps_to_fpm(v: f64) -> f64 {
    m_to_ft(v) * SEC_PER_MIN
}

/// Converts acceleration from m/s^2 to kt/s
pub fn mps2_to_kts_per_s(a: f64) -> f64 {
    a / MPS_PER_KT
}

/// Evaluates `f` for every slot in `0..n` and collects the results in slot
/// order.  Large fleets are evaluated in parallel; `f` must only read shared
/// state.
pub fn map_slots<T, F>(n: usize, f: F) -> Array1<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if n >= PAR_SLOT_THRESHOLD {
        let out: Vec<T> = (0..n).into_par_iter().map(f).collect();
        Array1::from_vec(out)
    } else {
        (0..n).map(f).collect()
    }
}

/// Same as [map_slots] for kernels that can fail, the first error wins
pub fn try_map_slots<T, F>(n: usize, f: F) -> anyhow::Result<Array1<T>>
where
    T: Send,
    F: Fn(usize) -> anyhow::Result<T> + Sync + Send,
{
    let out: Vec<T> = if n >= PAR_SLOT_THRESHOLD {
        (0..n).into_par_iter().map(f).collect::<anyhow::Result<_>>()?
    } else {
        (0..n).map(f).collect::<anyhow::Result<_>>()?
    };
    Ok(Array1::from_vec(out))
}

/// Returns a copy of `arr` without the element at `idx`
pub fn remove_index<T: Clone>(arr: &Array1<T>, idx: usize) -> anyhow::Result<Array1<T>> {
    ensure!(
        idx < arr.len(),
        "{}\nindex out of bounds",
        format_dbg!((idx, arr.len()))
    );
    Ok(concatenate(
        Axis(0),
        &[arr.slice(s![..idx]), arr.slice(s![idx + 1..])],
    )?)
}

/// Returns a copy of `arr` without row `idx`
pub fn remove_row(arr: &Array2<f64>, idx: usize) -> anyhow::Result<Array2<f64>> {
    ensure!(
        idx < arr.nrows(),
        "{}\nrow index out of bounds",
        format_dbg!((idx, arr.nrows()))
    );
    Ok(concatenate(
        Axis(0),
        &[arr.slice(s![..idx, ..]), arr.slice(s![idx + 1.., ..])],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_that_unit_conversions_invert() {
        assert!(mps_to_kts(kts_to_mps(250.0)).approx_eq(&250.0, 1e-12));
        assert!(m_to_ft(ft_to_m(35_000.0)).approx_eq(&35_000.0, 1e-12));
        assert!(ft_to_m(1.0).approx_eq(&0.3048, 1e-12));
        assert!(mps_to_fpm(ft_to_m(1.0)).approx_eq(&60.0, 1e-12));
    }

    #[test]
    fn test_that_map_slots_keeps_slot_order() {
        let small = map_slots(5, |i| i * 2);
        assert_eq!(small, array![0, 2, 4, 6, 8]);
        let big = map_slots(PAR_SLOT_THRESHOLD * 4, |i| i as f64);
        assert_eq!(big.len(), PAR_SLOT_THRESHOLD * 4);
        assert!(big.iter().enumerate().all(|(i, x)| *x == i as f64));
    }

    #[test]
    fn test_that_try_map_slots_propagates_errors() {
        let res = try_map_slots(3, |i| {
            ensure!(i != 1, "slot {i} failed");
            Ok(i)
        });
        assert!(res.is_err());
        assert_eq!(try_map_slots(2, Ok).unwrap(), array![0, 1]);
    }

    #[test]
    fn test_remove_index_and_row() {
        let arr = array![1.0, 2.0, 3.0];
        assert_eq!(remove_index(&arr, 1).unwrap(), array![1.0, 3.0]);
        assert_eq!(remove_index(&arr, 2).unwrap(), array![1.0, 2.0]);
        assert!(remove_index(&arr, 3).is_err());
        let arr2 = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        assert_eq!(remove_row(&arr2, 0).unwrap(), array![[3.0, 4.0], [5.0, 6.0]]);
    }
}
