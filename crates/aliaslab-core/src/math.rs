//! Normalization and summary statistics.
//!
//! All functions are allocation-free except [`normalize_unit`] and are safe to
//! call on empty slices.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use libm::sqrt;

/// Smallest and largest value of a signal, or `None` when empty.
///
/// NaN samples are ignored.
pub fn min_max(signal: &[f32]) -> Option<(f32, f32)> {
    signal
        .iter()
        .copied()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Min-max normalize a signal into `[0, 1]`.
///
/// A flat signal (`max == min`) maps every sample to `0.5`.
///
/// # Example
/// ```rust
/// use aliaslab_core::normalize_unit;
///
/// assert_eq!(normalize_unit(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize_unit(&[7.0, 7.0]), vec![0.5, 0.5]);
/// ```
pub fn normalize_unit(signal: &[f32]) -> Vec<f32> {
    let Some((lo, hi)) = min_max(signal) else {
        return signal.to_vec();
    };
    let span = hi - lo;
    if span == 0.0 {
        return vec![0.5; signal.len()];
    }
    signal.iter().map(|&x| (x - lo) / span).collect()
}

/// Arithmetic mean (0 for an empty signal).
pub fn mean(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum: f64 = signal.iter().map(|&x| f64::from(x)).sum();
    (sum / signal.len() as f64) as f32
}

/// Population standard deviation (0 for an empty signal).
pub fn std_dev(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let m = f64::from(mean(signal));
    let var: f64 = signal
        .iter()
        .map(|&x| {
            let d = f64::from(x) - m;
            d * d
        })
        .sum::<f64>()
        / signal.len() as f64;
    sqrt(var) as f32
}
