//! Cross-recurrence comparison of two signals
//!
//! A cross-recurrence plot marks every pair of time indices `(i, j)` at which
//! two signals take similar values. Identical signals produce a solid main
//! diagonal; a distorted copy smears and breaks it, which makes the damage
//! done by aliasing visible at a glance.
//!
//! Both signals are min-max normalized to `[0, 1]` independently before
//! comparison, so a quiet copy and a loud copy of the same waveform still
//! recur.
//!
//! The matrix is `N × N`, so cost grows quadratically. Callers bound `N`
//! (a few hundred samples is typical) before calling [`compute_recurrence`].
//!
//! Reference: N. Marwan, M. C. Romano, M. Thiel and J. Kurths, "Recurrence plots
//! for the analysis of complex systems", *Physics Reports* 438, 2007.

use aliaslab_core::error::check_unit_threshold;
use aliaslab_core::{Error, Result, normalize_unit, std_dev};
use serde::Serialize;

/// Fraction of the mean standard deviation used by [`compute_adaptive_threshold`].
pub const ADAPTIVE_THRESHOLD_SCALE: f32 = 0.1;

/// Square boolean grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrenceMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl RecurrenceMatrix {
    /// Side length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cell at row `i`, column `j`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        if i < self.size && j < self.size {
            Some(self.cells[i * self.size + j])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks_exact(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks_exact(self.size.max(1))
    }

    /// Rows as `0`/`1` bytes, the shape plotting front ends expect.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }

    /// Fraction of set cells (0 for an empty matrix).
    pub fn recurrence_rate(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let set = self.cells.iter().filter(|&&c| c).count();
        set as f32 / self.cells.len() as f32
    }
}

/// Compute the cross-recurrence matrix of two equal-length signals.
///
/// `cell(i, j)` is true iff `|norm1[i] - norm2[j]| <= threshold`.
///
/// # Errors
///
/// - [`Error::ThresholdOutOfRange`] when `threshold` is outside `[0, 1]`
/// - [`Error::LengthMismatch`] when the signals differ in length; use
///   [`truncate_pair`] first
///
/// # Example
///
/// ```rust
/// use aliaslab_analysis::recurrence::compute_recurrence;
///
/// let m = compute_recurrence(&[0.0, 1.0], &[0.0, 1.0], 0.1).unwrap();
/// assert_eq!(m.to_rows(), vec![vec![1, 0], vec![0, 1]]);
/// ```
pub fn compute_recurrence(
    signal1: &[f32],
    signal2: &[f32],
    threshold: f32,
) -> Result<RecurrenceMatrix> {
    let threshold = check_unit_threshold(threshold)?;
    if signal1.len() != signal2.len() {
        return Err(Error::LengthMismatch {
            left: signal1.len(),
            right: signal2.len(),
        });
    }

    let n1 = normalize_unit(signal1);
    let n2 = normalize_unit(signal2);

    let size = n1.len();
    let mut cells = Vec::with_capacity(size * size);
    for &a in &n1 {
        cells.extend(n2.iter().map(|&b| (a - b).abs() <= threshold));
    }

    tracing::trace!(size, threshold, "computed recurrence matrix");
    Ok(RecurrenceMatrix { size, cells })
}

/// Similarity threshold scaled to the signals' spread.
///
/// `(std(signal1) + std(signal2)) / 2 * 0.1` with population standard
/// deviations. The result is not clamped; it only fits [`compute_recurrence`]
/// when both signals have a standard deviation of at most 10.
pub fn compute_adaptive_threshold(signal1: &[f32], signal2: &[f32]) -> f32 {
    (std_dev(signal1) + std_dev(signal2)) / 2.0 * ADAPTIVE_THRESHOLD_SCALE
}

/// Trim two signals to the length of the shorter one.
pub fn truncate_pair<'a>(a: &'a [f32], b: &'a [f32]) -> (&'a [f32], &'a [f32]) {
    let n = a.len().min(b.len());
    (&a[..n], &b[..n])
}
