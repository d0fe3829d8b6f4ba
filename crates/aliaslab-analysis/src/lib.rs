//! aliaslab Analysis - aliasing simulation and signal comparison
//!
//! This crate renders audio as it would sound at a lower sample rate and
//! provides the measurements used to study the result:
//!
//! - [`alias`] - Aliasing engine (decimation, zero-order hold, pitch lowering)
//! - [`tier`] - Severity tiers and the rate boundaries that select them
//! - [`stats`] - RMS, peak, Nyquist frequency and the aliasing predicate
//! - [`severity`] - Perceptual 0–100 aliasing score and labels
//! - [`recurrence`] - Cross-recurrence matrices and adaptive thresholds
//! - [`xor`] - Rolling XOR-style difference accumulator
//! - [`session`] - Original/live buffer pairing for playback front ends
//!
//! ## Example Workflow
//!
//! ```rust
//! use aliaslab_analysis::{AliasEngine, analyze, compute_adaptive_threshold, compute_recurrence};
//! use aliaslab_core::SignalBuffer;
//!
//! let sr = 44100.0_f32;
//! let tone: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 5000.0 * i as f32 / sr).sin())
//!     .collect();
//! let original = SignalBuffer::mono(sr, tone).unwrap();
//!
//! // 1. Simulate an 8 kHz recording
//! let aliased = AliasEngine::default().simulate(&original, 8000.0).unwrap();
//!
//! // 2. Measure it
//! let stats = analyze(&aliased);
//! assert_eq!(stats.length, original.len());
//!
//! // 3. Compare a short window of both
//! let a = &original.channel(0).unwrap()[..256];
//! let b = &aliased.channel(0).unwrap()[..256];
//! let threshold = compute_adaptive_threshold(a, b);
//! let matrix = compute_recurrence(a, b, threshold).unwrap();
//! assert_eq!(matrix.size(), 256);
//! ```

pub mod alias;
pub mod recurrence;
pub mod session;
pub mod severity;
pub mod stats;
pub mod tier;
pub mod xor;

pub use alias::{AliasEngine, AliasParams, ResampleRequest, resample};
pub use recurrence::{RecurrenceMatrix, compute_adaptive_threshold, compute_recurrence, truncate_pair};
pub use session::AliasSession;
pub use severity::{AliasingLevel, aliasing_severity, speech_aliasing_present};
pub use stats::{BufferAnalysis, amplitude_profile, analyze, nyquist_frequency, peak, rms, will_alias};
pub use tier::{SeverityTier, TierThresholds};
pub use xor::{AccumulatorState, TickOutcome, XorAccumulator, XorConfig};
