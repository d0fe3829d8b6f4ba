//! Smoothing filters used ahead of decimation.
//!
//! Two families are provided:
//!
//! - **One-pole exponential smoother**, the difference equation
//!
//!   ```text
//!   y[0] = x[0]
//!   y[n] = coeff * x[n] + (1 - coeff) * y[n-1]
//!   ```
//!
//!   A coefficient near 1 passes the input almost untouched; a coefficient
//!   near 0 keeps most of the previous output and smooths strongly. 6 dB/octave
//!   rolloff, zero latency, one multiply-add per sample.
//!
//! - **Centered moving average** (box filter), averaging `2 * half_window + 1`
//!   samples around each position. Near the edges only the in-bounds samples
//!   are averaged. Much steeper than the one-pole for the same cost when
//!   computed from a running prefix sum.
//!
//! # Usage
//!
//! ```rust
//! use aliaslab_core::{OnePole, moving_average};
//!
//! let mut lp = OnePole::new(0.25);
//! assert_eq!(lp.process(1.0), 1.0); // primed with the first sample
//! assert_eq!(lp.process(0.0), 0.75);
//!
//! let smoothed = moving_average(&[0.0, 3.0, 0.0], 1);
//! assert_eq!(smoothed, vec![1.5, 1.0, 1.5]);
//! ```
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio Applications",
//! Section: One-Pole Filter.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// One-pole exponential smoother.
///
/// # Invariants
///
/// - `coeff` is in `(0, 1]`; 1 passes the input through unchanged
/// - the first processed sample initialises the state (no ramp from zero)
#[derive(Debug, Clone)]
pub struct OnePole {
    coeff: f32,
    state: Option<f32>,
}

impl OnePole {
    /// Create a smoother with the given input weight.
    ///
    /// The coefficient is clamped to `(0, 1]`.
    pub fn new(coeff: f32) -> Self {
        Self {
            coeff: clamp_coeff(coeff),
            state: None,
        }
    }

    /// Create a smoother whose input weight is the ratio of two sample rates.
    ///
    /// `target_rate / source_rate` shrinks as the simulated rate drops, so a
    /// lower target rate smooths harder.
    pub fn from_rate_ratio(target_rate: f32, source_rate: f32) -> Self {
        Self::new(target_rate / source_rate)
    }

    /// The input weight currently in use.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Process one sample and return the smoothed output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let out = match self.state {
            None => input,
            Some(prev) => input * self.coeff + prev * (1.0 - self.coeff),
        };
        self.state = Some(out);
        out
    }

    /// Forget the previous output; the next sample primes the filter again.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

fn clamp_coeff(coeff: f32) -> f32 {
    if coeff.is_nan() {
        1.0
    } else {
        coeff.clamp(f32::MIN_POSITIVE, 1.0)
    }
}

/// Smooth a whole signal with a single one-pole pass.
pub fn one_pole_lowpass(signal: &[f32], coeff: f32) -> Vec<f32> {
    let mut lp = OnePole::new(coeff);
    signal.iter().map(|&x| lp.process(x)).collect()
}

/// Smooth a signal with `passes` one-pole passes in series.
///
/// Each pass starts fresh and is primed with the first sample of the previous
/// pass's output. Zero passes return the input unchanged.
pub fn one_pole_cascade(signal: &[f32], coeff: f32, passes: usize) -> Vec<f32> {
    let mut filtered = signal.to_vec();
    for _ in 0..passes {
        filtered = one_pole_lowpass(&filtered, coeff);
    }
    filtered
}

/// Centered moving average with the window clamped to the signal bounds.
///
/// Output `i` is the mean of `signal[i - half_window ..= i + half_window]`,
/// restricted to valid indices. Runs in O(n) using an `f64` prefix sum.
pub fn moving_average(signal: &[f32], half_window: usize) -> Vec<f32> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0f64);
    let mut acc = 0.0f64;
    for &x in signal {
        acc += f64::from(x);
        prefix.push(acc);
    }

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half_window);
            let end = i.saturating_add(half_window).min(n - 1);
            let count = (end - start + 1) as f64;
            ((prefix[end + 1] - prefix[start]) / count) as f32
        })
        .collect()
}
