//! Audio file I/O for aliaslab.
//!
//! This crate provides:
//!
//! - **WAV loading**: [`read_signal`] decodes a file into a [`SignalBuffer`],
//!   keeping channels separate
//! - **WAV export**: [`write_signal`] and [`encode_wav`] store a buffer as
//!   16/24-bit PCM or 32-bit float, to disk or to memory
//! - **Metadata**: [`read_wav_info`] reads the header only
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aliaslab_analysis::AliasEngine;
//! use aliaslab_io::{read_signal, write_signal};
//!
//! let original = read_signal("speech.wav")?;
//! let aliased = AliasEngine::default().simulate(&original, 8000.0)?;
//! write_signal("aliased_8000Hz_speech.wav", &aliased, 16)?;
//! ```
//!
//! [`SignalBuffer`]: aliaslab_core::SignalBuffer

mod wav;

pub use wav::{
    WavFormat, WavInfo, WavSpec, decode_wav, encode_wav, read_signal, read_wav_info,
    spec_for_buffer, write_signal,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoded samples did not form a valid signal buffer.
    #[error("Invalid signal: {0}")]
    Signal(#[from] aliaslab_core::Error),

    /// Only 16, 24 and 32 bits per sample are written.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// The buffer's sample rate cannot be stored in a WAV header.
    #[error("Sample rate out of range for WAV: {0}")]
    SampleRateOutOfRange(f32),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
