//! Aliasing simulation: render a signal as if it had been sampled at a lower rate.
//!
//! Playback hardware runs at a fixed rate, so the simulated signal is not
//! shrunk. The output keeps the input's sample count and sample rate, and the
//! damage of the lower rate is written into the sample values themselves.
//!
//! # Theory
//!
//! Naive downsampling by an integer factor `D` keeps every `D`-th sample.
//! Holding each kept sample for `D` output positions (zero-order hold) yields a
//! staircase whose steps carry images of the spectrum folded around the new
//! Nyquist frequency `fs / (2D)`. That staircase is what makes the result sound
//! aliased.
//!
//! Before holding, each channel is smoothed to imitate the band-limiting of a
//! cheap converter. How hard it is smoothed, and what happens afterwards,
//! depends on the [`SeverityTier`]:
//!
//! 1. **Standard**: one one-pole pass with weight `target / fs`.
//! 2. **Aggressive**: three one-pole passes with weight `max(0.15, target / fs)`,
//!    then the held signal is read back at 0.85× speed to lower its pitch.
//! 3. **Extreme**: a centered moving average with half-window `max(15, 2D)`,
//!    pitch lowered to 0.70×, a feedback echo at a ~120 Hz period for bass
//!    emphasis, and a peak limit at 0.95.
//!
//! The pitch-lowered signal replaces the held signal outright. Nothing of the
//! original or of the pre-shift signal is blended back in, so the rendering is
//! a deterministic function of the input alone.
//!
//! Reference: A. V. Oppenheim and R. W. Schafer, *Discrete-Time Signal Processing*,
//! 3rd ed., Prentice Hall, 2009, Section 4.6 (Changing the Sampling Rate).
//!
//! # Example
//!
//! ```rust
//! use aliaslab_analysis::alias::{ResampleRequest, resample};
//! use aliaslab_core::SignalBuffer;
//!
//! let sr = 44100.0_f32;
//! let tone: Vec<f32> = (0..4410)
//!     .map(|i| (2.0 * std::f32::consts::PI * 5000.0 * i as f32 / sr).sin())
//!     .collect();
//! let input = SignalBuffer::mono(sr, tone).unwrap();
//!
//! let aliased = resample(&input, &ResampleRequest::auto(8000.0)).unwrap();
//! assert_eq!(aliased.len(), input.len());
//! assert_eq!(aliased.sample_rate(), sr);
//! ```

use aliaslab_core::error::check_sample_rate;
use aliaslab_core::{Error, Result, SignalBuffer, moving_average, one_pole_cascade, one_pole_lowpass};
use serde::{Deserialize, Serialize};

use crate::tier::{SeverityTier, TierThresholds};

/// Tunable constants of the aliasing engine.
///
/// The defaults were chosen by ear for speech demos; none of them is a
/// physical constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AliasParams {
    /// Rate boundaries used when the tier is chosen automatically.
    pub thresholds: TierThresholds,
    /// Lower bound on the one-pole weight in the Aggressive tier.
    pub aggressive_min_coeff: f32,
    /// Number of cascaded one-pole passes in the Aggressive tier.
    pub aggressive_passes: usize,
    /// Lower bound on the moving-average half-window in the Extreme tier.
    pub extreme_min_half_window: usize,
    /// Playback-speed factor applied in the Aggressive tier.
    pub aggressive_pitch: f32,
    /// Playback-speed factor applied in the Extreme tier.
    pub extreme_pitch: f32,
    /// Frequency whose period sets the Extreme-tier echo delay, in Hz.
    pub resonance_hz: f32,
    /// Feedback gain of the Extreme-tier echo.
    pub resonance_gain: f32,
    /// Peak level the Extreme tier limits its output to.
    pub clip_ceiling: f32,
}

impl Default for AliasParams {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default(),
            aggressive_min_coeff: 0.15,
            aggressive_passes: 3,
            extreme_min_half_window: 15,
            aggressive_pitch: 0.85,
            extreme_pitch: 0.70,
            resonance_hz: 120.0,
            resonance_gain: 0.4,
            clip_ceiling: 0.95,
        }
    }
}

impl AliasParams {
    /// Check every constant against its admissible range.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if !(self.aggressive_min_coeff > 0.0 && self.aggressive_min_coeff <= 1.0) {
            return Err(Error::InvalidArgument(
                "aggressive filter coefficient must lie in (0, 1]",
            ));
        }
        if self.aggressive_passes == 0 {
            return Err(Error::InvalidArgument("aggressive passes must be non-zero"));
        }
        for pitch in [self.aggressive_pitch, self.extreme_pitch] {
            if !(pitch > 0.0 && pitch <= 1.0) {
                return Err(Error::InvalidArgument("pitch factor must lie in (0, 1]"));
            }
        }
        check_sample_rate(self.resonance_hz)?;
        if !(0.0..1.0).contains(&self.resonance_gain) {
            return Err(Error::InvalidArgument("resonance gain must lie in [0, 1)"));
        }
        if !(self.clip_ceiling > 0.0 && self.clip_ceiling <= 1.0) {
            return Err(Error::InvalidArgument("clip ceiling must lie in (0, 1]"));
        }
        Ok(())
    }
}

/// What rate to simulate and how harshly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResampleRequest {
    /// Simulated sample rate in Hz.
    pub target_sample_rate: f32,
    /// Rendering tier.
    pub tier: SeverityTier,
}

impl ResampleRequest {
    /// Request a rate, choosing the tier from the default boundaries.
    pub fn auto(target_sample_rate: f32) -> Self {
        Self::with_thresholds(target_sample_rate, &TierThresholds::default())
    }

    /// Request a rate, choosing the tier from custom boundaries.
    pub fn with_thresholds(target_sample_rate: f32, thresholds: &TierThresholds) -> Self {
        Self {
            target_sample_rate,
            tier: thresholds.select(target_sample_rate),
        }
    }

    /// Request a rate rendered with an explicit tier.
    pub fn with_tier(target_sample_rate: f32, tier: SeverityTier) -> Self {
        Self {
            target_sample_rate,
            tier,
        }
    }
}

/// Aliasing renderer configured with a set of [`AliasParams`].
#[derive(Debug, Clone, Default)]
pub struct AliasEngine {
    params: AliasParams,
}

impl AliasEngine {
    /// Create an engine after validating its parameters.
    pub fn new(params: AliasParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters in use.
    pub fn params(&self) -> &AliasParams {
        &self.params
    }

    /// Build a request whose tier follows this engine's boundaries.
    pub fn request_for(&self, target_sample_rate: f32) -> ResampleRequest {
        ResampleRequest::with_thresholds(target_sample_rate, &self.params.thresholds)
    }

    /// Render `input` at `target_sample_rate`, choosing the tier automatically.
    pub fn simulate(&self, input: &SignalBuffer, target_sample_rate: f32) -> Result<SignalBuffer> {
        self.resample(input, &self.request_for(target_sample_rate))
    }

    /// Render `input` as it would sound sampled at the requested rate.
    ///
    /// # Returns
    ///
    /// - `Err(Error::InvalidSampleRate)` when the target is not positive
    /// - the input unchanged when the target is at or above the input rate
    /// - an empty buffer of the input's shape when the input has no samples
    /// - otherwise a buffer with the input's rate, length and channel count
    ///   carrying the distorted samples
    pub fn resample(&self, input: &SignalBuffer, request: &ResampleRequest) -> Result<SignalBuffer> {
        let target = check_sample_rate(request.target_sample_rate)?;
        let source_rate = input.sample_rate();

        if target >= source_rate {
            tracing::trace!(target, source_rate, "target rate not below source, passing through");
            return Ok(input.clone());
        }
        if input.is_empty() {
            return Ok(input.clone());
        }

        // Any factor past the signal length holds the first sample throughout
        let factor = decimation_factor(source_rate, target).min(input.len());
        tracing::debug!(
            tier = %request.tier,
            target,
            source_rate,
            factor,
            channels = input.num_channels(),
            "rendering aliased signal"
        );

        Ok(input.map_channels(|samples| {
            self.render_channel(samples, source_rate, target, factor, request.tier)
        }))
    }

    fn render_channel(
        &self,
        samples: &[f32],
        source_rate: f32,
        target: f32,
        factor: usize,
        tier: SeverityTier,
    ) -> Vec<f32> {
        let p = &self.params;
        let ratio = target / source_rate;

        let filtered = match tier {
            SeverityTier::Standard => one_pole_lowpass(samples, ratio),
            SeverityTier::Aggressive => {
                one_pole_cascade(samples, ratio.max(p.aggressive_min_coeff), p.aggressive_passes)
            }
            SeverityTier::Extreme => {
                moving_average(samples, p.extreme_min_half_window.max(factor.saturating_mul(2)))
            }
        };

        let held = zero_order_hold(&filtered, factor);

        match tier {
            SeverityTier::Standard => held,
            SeverityTier::Aggressive => lower_pitch(&held, p.aggressive_pitch),
            SeverityTier::Extreme => {
                let mut out = lower_pitch(&held, p.extreme_pitch);
                add_resonance(&mut out, resonance_delay(source_rate, p.resonance_hz), p.resonance_gain);
                if normalize_peak(&mut out, p.clip_ceiling) {
                    tracing::debug!(ceiling = p.clip_ceiling, "peak-limited extreme rendering");
                }
                out
            }
        }
    }
}

/// Render with the default parameters.
///
/// See [`AliasEngine::resample`].
pub fn resample(input: &SignalBuffer, request: &ResampleRequest) -> Result<SignalBuffer> {
    AliasEngine::default().resample(input, request)
}

/// Integer decimation factor `round(source / target)`, never below 1.
pub fn decimation_factor(source_rate: f32, target_rate: f32) -> usize {
    let factor = (source_rate / target_rate).round();
    if factor.is_finite() && factor >= 1.0 {
        factor as usize
    } else {
        1
    }
}

/// Zero-order hold: repeat every `factor`-th sample `factor` times.
///
/// `out[i] = signal[floor(i / factor) * factor]`; the output has the input's
/// length. A factor of 0 is treated as 1.
pub fn zero_order_hold(signal: &[f32], factor: usize) -> Vec<f32> {
    let factor = factor.max(1);
    (0..signal.len())
        .map(|i| signal[(i / factor) * factor])
        .collect()
}

/// Read a signal back at `speed` times its rate, lowering its pitch.
///
/// `out[i] = signal[floor(i * speed)]`, or 0 past the end of the signal. The
/// output has the input's length and replaces it entirely.
pub fn lower_pitch(signal: &[f32], speed: f32) -> Vec<f32> {
    let speed = f64::from(speed);
    (0..signal.len())
        .map(|i| {
            let idx = (i as f64 * speed).floor();
            if idx >= 0.0 {
                signal.get(idx as usize).copied().unwrap_or(0.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Echo delay in samples for a resonance at `freq_hz`: `round(fs / freq)`.
pub fn resonance_delay(sample_rate: f32, freq_hz: f32) -> usize {
    let delay = (sample_rate / freq_hz).round();
    if delay.is_finite() && delay > 0.0 {
        delay as usize
    } else {
        0
    }
}

/// Add a causal feedback echo in place: `x[i] += x[i - delay] * gain`.
///
/// Runs forward from `i = delay`, so echoes of echoes accumulate. A zero delay
/// leaves the signal untouched.
pub fn add_resonance(signal: &mut [f32], delay: usize, gain: f32) {
    if delay == 0 {
        return;
    }
    for i in delay..signal.len() {
        signal[i] += signal[i - delay] * gain;
    }
}

/// Scale the signal down so its peak equals `ceiling` if it exceeds it.
///
/// Returns `true` when the signal was scaled.
pub fn normalize_peak(signal: &mut [f32], ceiling: f32) -> bool {
    let max = signal.iter().fold(0.0f32, |m, x| m.max(x.abs()));
    if max > ceiling {
        let scale = ceiling / max;
        for x in signal.iter_mut() {
            *x *= scale;
        }
        true
    } else {
        false
    }
}
