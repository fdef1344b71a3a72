//! Shared helpers: order statistics, RNG seeding and Python column extraction.
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

/// `q`-quantile (`q` in `[0, 1]`) with linear interpolation between order
/// statistics: position `q · (n − 1)` in the sorted sample.
///
/// Returns `None` for an empty sample or a `q` outside `[0, 1]`.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 0.5)
}

/// Seeded generator when `seed` is given, OS-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Copy a 1-D float column out of a NumPy array, a pandas Series (through
/// its `to_numpy` method) or any Python sequence of floats.
///
/// Strided arrays are accepted; the values are copied in logical order.
#[cfg(feature = "python-bindings")]
pub fn extract_column(raw: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_vec());
    }
    if let Ok(converted) = raw.call_method0("to_numpy") {
        if let Ok(arr) = converted.extract::<PyReadonlyArray1<f64>>() {
            return Ok(arr.as_array().to_vec());
        }
    }
    raw.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of floats")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let values = [4.0, 1.0, 3.0, 2.0];

        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 1.0), Some(4.0));
        // position 0.7 · 3 = 2.1 → 3 + 0.1 · (4 − 3)
        assert!((percentile(&values, 0.7).unwrap() - 3.1).abs() < 1e-12);
        assert_eq!(median(&values), Some(2.5));
    }

    #[test]
    fn percentile_rejects_empty_and_out_of_range() {
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile(&[1.0], 1.5), None);
        assert_eq!(percentile(&[1.0], -0.1), None);
        assert_eq!(median(&[7.0]), Some(7.0));
    }

    #[test]
    fn seeded_generators_repeat() {
        let a: f64 = rng_from_seed(Some(11)).random();
        let b: f64 = rng_from_seed(Some(11)).random();

        assert_eq!(a, b);
    }
}
