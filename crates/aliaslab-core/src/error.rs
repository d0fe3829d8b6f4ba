//! Error types for signal processing preconditions.
//!
//! Every variant is a flavour of "invalid argument": the caller handed the
//! library a value it cannot work with. Empty signals are not errors; the
//! analysis functions answer them with zero or empty results instead.

/// Errors raised when an operation's preconditions are violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Sample rate was zero, negative, or not finite.
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    /// Threshold fell outside `[0, 1]` or was NaN.
    #[error("threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f32),

    /// Two signals that must be compared sample-for-sample differ in length.
    #[error("signals must be truncated to equal length ({left} vs {right} samples)")]
    LengthMismatch {
        /// Length of the first signal.
        left: usize,
        /// Length of the second signal.
        right: usize,
    },

    /// A buffer was built from channels of unequal length.
    #[error("channel {channel} has {found} samples, expected {expected}")]
    RaggedChannels {
        /// Index of the offending channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        found: usize,
    },

    /// Any other out-of-range argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl Error {
    /// Returns `true` for every variant.
    ///
    /// All errors in this crate belong to the invalid-argument family; the
    /// method exists so callers can match on the family without listing
    /// variants.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidSampleRate(_)
                | Error::ThresholdOutOfRange(_)
                | Error::LengthMismatch { .. }
                | Error::RaggedChannels { .. }
                | Error::InvalidArgument(_)
        )
    }
}

/// Convenience result type for core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Validate that a sample rate is positive and finite.
pub fn check_sample_rate(sample_rate: f32) -> Result<f32> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(Error::InvalidSampleRate(sample_rate))
    }
}

/// Validate that a threshold lies in `[0, 1]`.
pub fn check_unit_threshold(threshold: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::ThresholdOutOfRange(threshold))
    }
}
