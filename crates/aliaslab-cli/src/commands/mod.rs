//! CLI command implementations.

pub mod analyze;
pub mod common;
pub mod config;
pub mod generate;
pub mod info;
pub mod nyquist;
pub mod recurrence;
pub mod simulate;
pub mod xor;
