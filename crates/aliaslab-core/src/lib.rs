//! aliaslab Core - signal buffers and smoothing primitives
//!
//! This crate provides the foundational building blocks shared by the aliasing
//! engine and the comparison tools in `aliaslab-analysis`.
//!
//! # Core Abstractions
//!
//! - [`SignalBuffer`] - Immutable multi-channel sample buffer with a sample rate
//! - [`Error`] - Precondition violations (invalid sample rate, threshold, lengths)
//!
//! ## Filters
//!
//! - [`OnePole`] - One-pole exponential smoother primed with the first sample
//! - [`one_pole_lowpass`] / [`one_pole_cascade`] - Whole-signal smoothing passes
//! - [`moving_average`] - Centered box filter clamped to the buffer bounds
//!
//! ## Utilities
//!
//! - [`min_max`], [`normalize_unit`] - Min-max normalization to `[0, 1]`
//! - [`mean`], [`std_dev`] - Population statistics
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in your
//! `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! aliaslab-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use aliaslab_core::{SignalBuffer, one_pole_lowpass};
//!
//! let buffer = SignalBuffer::mono(8000.0, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
//! assert_eq!(buffer.len(), 4);
//! assert!((buffer.duration() - 0.0005).abs() < 1e-9);
//!
//! let smoothed = buffer.map_channels(|samples| one_pole_lowpass(samples, 0.5));
//! assert_eq!(smoothed.channel(0).unwrap(), &[0.0, 0.5, 0.25, 0.625]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod error;
pub mod filter;
pub mod math;

// Re-export main types at crate root
pub use buffer::SignalBuffer;
pub use error::{Error, Result};
pub use filter::{OnePole, moving_average, one_pole_cascade, one_pole_lowpass};
pub use math::{mean, min_max, normalize_unit, std_dev};
