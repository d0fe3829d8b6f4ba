//! Configuration for the aliaslab engine.
//!
//! The tier boundaries, filter constants, pitch factors and output ceiling of
//! the aliasing engine were tuned by ear. This crate lets users override them
//! from a TOML file instead of recompiling.
//!
//! # Features
//!
//! - **Config file**: [`AliasConfig`] with per-section defaults
//! - **Validation**: range checks that report every problem at once
//! - **Paths**: platform-specific config directory
//!
//! # Example
//!
//! ```rust
//! use aliaslab_analysis::AliasEngine;
//! use aliaslab_config::AliasConfig;
//!
//! let config = AliasConfig::from_toml("[pitch]\nextreme = 0.6\n").unwrap();
//! let engine = AliasEngine::new(config.alias_params()).unwrap();
//! assert_eq!(engine.params().extreme_pitch, 0.6);
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Range checks for configuration values.
pub mod validation;

pub use config::{
    AliasConfig, FilterSection, OutputSection, PitchSection, RecurrenceSection, ResonanceSection,
    TiersSection, XorSection,
};
pub use error::ConfigError;
pub use paths::{default_config_path, ensure_user_config_dir, user_config_dir};
pub use validation::{ValidationError, ValidationResult, validate_config};
