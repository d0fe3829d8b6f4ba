//! Multi-channel signal buffer.
//!
//! [`SignalBuffer`] holds one `Vec<f32>` per channel plus the sample rate the
//! samples were captured at. It is the interchange type between the WAV loader,
//! the aliasing engine, and the statistics functions.
//!
//! Buffers are immutable once built: every processing step returns a new
//! buffer, so an original recording and its distorted rendition can be held
//! side by side without either affecting the other.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::error::{Error, Result, check_sample_rate};

/// An immutable set of equal-length channels at a fixed sample rate.
///
/// # Invariants
///
/// - `sample_rate` is positive and finite
/// - every channel has the same length
///
/// # Example
///
/// ```rust
/// use aliaslab_core::SignalBuffer;
///
/// let stereo = SignalBuffer::new(48000.0, vec![vec![1.0; 480], vec![0.5; 480]]).unwrap();
/// assert_eq!(stereo.num_channels(), 2);
/// assert!((stereo.duration() - 0.01).abs() < 1e-9);
///
/// let mono = stereo.to_mono();
/// assert_eq!(mono.channel(0).unwrap()[0], 0.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer {
    sample_rate: f32,
    channels: Vec<Vec<f32>>,
}

impl SignalBuffer {
    /// Create a buffer from per-channel sample vectors.
    ///
    /// Fails with [`Error::InvalidSampleRate`] or [`Error::RaggedChannels`]
    /// when the invariants do not hold. Zero channels is allowed.
    pub fn new(sample_rate: f32, channels: Vec<Vec<f32>>) -> Result<Self> {
        check_sample_rate(sample_rate)?;

        if let Some(first) = channels.first() {
            let expected = first.len();
            if let Some((channel, ch)) = channels
                .iter()
                .enumerate()
                .find(|(_, ch)| ch.len() != expected)
            {
                #[cfg(feature = "tracing")]
                tracing::debug!(channel, expected, found = ch.len(), "ragged signal buffer");
                return Err(Error::RaggedChannels {
                    channel,
                    expected,
                    found: ch.len(),
                });
            }
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Create a single-channel buffer.
    pub fn mono(sample_rate: f32, samples: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, vec![samples])
    }

    /// Create a buffer of `num_channels` channels holding `len` zeros each.
    pub fn silent(sample_rate: f32, num_channels: usize, len: usize) -> Result<Self> {
        Self::new(sample_rate, vec![vec![0.0; len]; num_channels])
    }

    /// Deinterleave `[c0, c1, .., c0, c1, ..]` frames into channels.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(sample_rate: f32, data: &[f32], num_channels: usize) -> Result<Self> {
        if num_channels == 0 {
            return Err(Error::InvalidArgument("channel count must be non-zero"));
        }
        let frames = data.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];
        for frame in data.chunks_exact(num_channels) {
            for (ch, &sample) in channels.iter_mut().zip(frame) {
                ch.push(sample);
            }
        }
        Self::new(sample_rate, channels)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel (0 when there are no channels).
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Check whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }

    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over channels in order.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Consume the buffer and return its channels.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Build a new buffer at the same sample rate by transforming each channel.
    ///
    /// `f` must return a vector of the same length for every channel, which
    /// holds for all length-preserving filters in this workspace.
    pub fn map_channels<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[f32]) -> Vec<f32>,
    {
        let channels: Vec<Vec<f32>> = self.channels.iter().map(|ch| f(ch)).collect();
        debug_assert!(
            channels.windows(2).all(|w| w[0].len() == w[1].len()),
            "channel transform changed lengths unevenly"
        );
        Self {
            sample_rate: self.sample_rate,
            channels,
        }
    }

    /// Mix down to a single channel by averaging.
    pub fn to_mono(&self) -> Self {
        if self.channels.len() <= 1 {
            return self.clone();
        }
        let n = self.channels.len() as f32;
        let mixed = (0..self.len())
            .map(|i| self.channels.iter().map(|ch| ch[i]).sum::<f32>() / n)
            .collect();
        Self {
            sample_rate: self.sample_rate,
            channels: vec![mixed],
        }
    }

    /// Interleave channels frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * self.channels.len());
        for i in 0..self.len() {
            for ch in &self.channels {
                out.push(ch[i]);
            }
        }
        out
    }
}
