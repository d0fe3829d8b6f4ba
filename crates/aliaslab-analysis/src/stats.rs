//! Signal statistics
//!
//! This module provides the summary numbers shown next to a loaded signal:
//! - RMS level and peak level
//! - Nyquist frequency and the aliasing predicate
//! - A whole-buffer analysis record ([`BufferAnalysis`])
//! - A time-domain amplitude profile used for bar displays

use aliaslab_core::SignalBuffer;
use serde::{Deserialize, Serialize};

/// Compute RMS (Root Mean Square) level of a signal
///
/// Returns RMS value in linear scale (not dB). An empty signal has RMS 0.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = signal.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    (sum_sq / signal.len() as f64).sqrt() as f32
}

/// Compute peak level (maximum absolute value)
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |m, x| m.max(x.abs()))
}

/// Highest frequency representable at `sample_rate`: `sample_rate / 2`.
pub fn nyquist_frequency(sample_rate: f32) -> f32 {
    sample_rate / 2.0
}

/// Check whether content up to `max_frequency` aliases at `sample_rate`.
///
/// True iff `sample_rate < 2 * max_frequency` (Nyquist–Shannon).
///
/// ```rust
/// use aliaslab_analysis::stats::will_alias;
///
/// assert!(will_alias(8000.0, 5000.0));
/// assert!(!will_alias(10000.0, 5000.0));
/// ```
pub fn will_alias(sample_rate: f32, max_frequency: f32) -> bool {
    sample_rate < 2.0 * max_frequency
}

/// Summary of a buffer, computed over its first channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferAnalysis {
    /// Duration in seconds.
    pub duration: f64,
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Samples per channel.
    pub length: usize,
    /// Number of channels.
    pub num_channels: usize,
    /// RMS of channel 0.
    pub rms: f32,
    /// Peak absolute value of channel 0.
    pub peak: f32,
    /// Half the sample rate.
    pub nyquist_frequency: f32,
}

/// Analyze a buffer.
///
/// Level statistics look at channel 0 only; a buffer without channels or
/// samples reports RMS and peak of 0.
pub fn analyze(buffer: &SignalBuffer) -> BufferAnalysis {
    let first = buffer.channel(0).unwrap_or(&[]);
    BufferAnalysis {
        duration: buffer.duration(),
        sample_rate: buffer.sample_rate(),
        length: buffer.len(),
        num_channels: buffer.num_channels(),
        rms: rms(first),
        peak: peak(first),
        nyquist_frequency: nyquist_frequency(buffer.sample_rate()),
    }
}

/// Absolute values of `bins` consecutive samples from the middle of channel 0.
///
/// This is a cheap stand-in for a spectrum display, not a frequency analysis.
/// Missing samples are padded with zeros, so the result always has `bins`
/// entries.
pub fn amplitude_profile(buffer: &SignalBuffer, bins: usize) -> Vec<f32> {
    let first = buffer.channel(0).unwrap_or(&[]);
    let start = first.len().saturating_sub(bins) / 2;
    let mut profile: Vec<f32> = first[start..]
        .iter()
        .take(bins)
        .map(|x| x.abs())
        .collect();
    profile.resize(bins, 0.0);
    profile
}
