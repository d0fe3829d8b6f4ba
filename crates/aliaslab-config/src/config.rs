//! Configuration file format and operations.

use aliaslab_analysis::{AliasParams, TierThresholds, XorConfig, xor::chunk_threshold};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths::default_config_path;
use crate::validation::{ValidationResult, validate_config};

/// Every tunable constant of the aliasing engine and the comparison tools.
///
/// Missing sections and fields take their defaults, so an empty file is a
/// valid configuration.
///
/// # TOML Format
///
/// ```toml
/// [tiers]
/// aggressive_max_hz = 16000.0
/// extreme_max_hz = 10000.0
///
/// [filter]
/// aggressive_min_coeff = 0.15
/// aggressive_passes = 3
/// extreme_min_half_window = 15
///
/// [pitch]
/// aggressive = 0.85
/// extreme = 0.7
///
/// [resonance]
/// frequency_hz = 120.0
/// gain = 0.4
///
/// [output]
/// clip_ceiling = 0.95
///
/// [recurrence]
/// max_window = 300
/// threshold = 0.1
///
/// [xor]
/// window = 512
/// scroll_speed = 1
/// chunk_size = 32
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Rate boundaries between severity tiers.
    pub tiers: TiersSection,
    /// Smoothing constants.
    pub filter: FilterSection,
    /// Pitch-lowering factors.
    pub pitch: PitchSection,
    /// Extreme-tier echo.
    pub resonance: ResonanceSection,
    /// Output limiting.
    pub output: OutputSection,
    /// Recurrence plot settings.
    pub recurrence: RecurrenceSection,
    /// XOR accumulator settings.
    pub xor: XorSection,
}

/// `[tiers]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiersSection {
    /// Aggressive when `extreme_max_hz < rate <= aggressive_max_hz`.
    pub aggressive_max_hz: f32,
    /// Extreme when `rate <= extreme_max_hz`.
    pub extreme_max_hz: f32,
}

impl Default for TiersSection {
    fn default() -> Self {
        let t = TierThresholds::default();
        Self {
            aggressive_max_hz: t.aggressive_max_hz,
            extreme_max_hz: t.extreme_max_hz,
        }
    }
}

/// `[filter]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Lower bound on the Aggressive one-pole weight.
    pub aggressive_min_coeff: f32,
    /// Cascaded one-pole passes in the Aggressive tier.
    pub aggressive_passes: usize,
    /// Lower bound on the Extreme moving-average half-window.
    pub extreme_min_half_window: usize,
}

impl Default for FilterSection {
    fn default() -> Self {
        let p = AliasParams::default();
        Self {
            aggressive_min_coeff: p.aggressive_min_coeff,
            aggressive_passes: p.aggressive_passes,
            extreme_min_half_window: p.extreme_min_half_window,
        }
    }
}

/// `[pitch]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchSection {
    /// Aggressive-tier playback speed.
    pub aggressive: f32,
    /// Extreme-tier playback speed.
    pub extreme: f32,
}

impl Default for PitchSection {
    fn default() -> Self {
        let p = AliasParams::default();
        Self {
            aggressive: p.aggressive_pitch,
            extreme: p.extreme_pitch,
        }
    }
}

/// `[resonance]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceSection {
    /// Frequency whose period sets the echo delay.
    pub frequency_hz: f32,
    /// Feedback gain.
    pub gain: f32,
}

impl Default for ResonanceSection {
    fn default() -> Self {
        let p = AliasParams::default();
        Self {
            frequency_hz: p.resonance_hz,
            gain: p.resonance_gain,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Extreme-tier peak ceiling.
    pub clip_ceiling: f32,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            clip_ceiling: AliasParams::default().clip_ceiling,
        }
    }
}

/// `[recurrence]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceSection {
    /// Largest number of samples compared (the matrix is `N × N`).
    pub max_window: usize,
    /// Fixed threshold; the adaptive threshold is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
}

impl Default for RecurrenceSection {
    fn default() -> Self {
        Self {
            max_window: 300,
            threshold: None,
        }
    }
}

/// `[xor]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XorSection {
    /// Rolling window length.
    pub window: usize,
    /// Samples consumed per tick.
    pub scroll_speed: usize,
    /// Chunk size selecting the default similarity threshold.
    pub chunk_size: usize,
    /// Explicit similarity threshold, overriding the chunk-size mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f32>,
}

impl Default for XorSection {
    fn default() -> Self {
        let x = XorConfig::default();
        Self {
            window: x.window,
            scroll_speed: x.scroll_speed,
            chunk_size: 32,
            similarity_threshold: None,
        }
    }
}

impl AliasConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load the file at [`default_config_path`] if it exists, else the defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AliasConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its admissible range.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_config(self)
    }

    /// Engine parameters described by this configuration.
    pub fn alias_params(&self) -> AliasParams {
        AliasParams {
            thresholds: TierThresholds {
                aggressive_max_hz: self.tiers.aggressive_max_hz,
                extreme_max_hz: self.tiers.extreme_max_hz,
            },
            aggressive_min_coeff: self.filter.aggressive_min_coeff,
            aggressive_passes: self.filter.aggressive_passes,
            extreme_min_half_window: self.filter.extreme_min_half_window,
            aggressive_pitch: self.pitch.aggressive,
            extreme_pitch: self.pitch.extreme,
            resonance_hz: self.resonance.frequency_hz,
            resonance_gain: self.resonance.gain,
            clip_ceiling: self.output.clip_ceiling,
        }
    }

    /// Accumulator settings described by this configuration.
    pub fn xor_config(&self) -> XorConfig {
        XorConfig {
            window: self.xor.window,
            scroll_speed: self.xor.scroll_speed,
            similarity_threshold: self
                .xor
                .similarity_threshold
                .unwrap_or_else(|| chunk_threshold(self.xor.chunk_size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AliasConfig::from_toml("").unwrap(), AliasConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AliasConfig::from_toml(
            r#"
            [pitch]
            extreme = 0.6

            [xor]
            chunk_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.pitch.extreme, 0.6);
        assert_eq!(config.pitch.aggressive, 0.85);
        assert_eq!(config.xor.window, 512);
        assert_eq!(config.xor_config().similarity_threshold, 0.05);
    }

    #[test]
    fn defaults_match_engine() {
        let config = AliasConfig::default();
        assert_eq!(config.alias_params(), AliasParams::default());
        assert_eq!(config.xor_config(), XorConfig::default());
    }

    #[test]
    fn explicit_xor_threshold_wins() {
        let mut config = AliasConfig::default();
        config.xor.chunk_size = 10;
        config.xor.similarity_threshold = Some(0.3);
        assert_eq!(config.xor_config().similarity_threshold, 0.3);
    }

    #[test]
    fn invalid_values_are_rejected_on_parse() {
        let err = AliasConfig::from_toml("[output]\nclip_ceiling = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AliasConfig::from_toml("[filter]\naggressive_passes = \"three\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = AliasConfig::default();
        config.recurrence.threshold = Some(0.2);
        config.tiers.aggressive_max_hz = 20000.0;
        let text = config.to_toml().unwrap();
        assert!(text.contains("[recurrence]"));
        assert_eq!(AliasConfig::from_toml(&text).unwrap(), config);
    }
}
