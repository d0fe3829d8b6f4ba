//! Range checks for configuration values.
//!
//! Every check runs, and all failures are reported together so a user can fix
//! a config file in one pass.

use thiserror::Error;

use crate::config::AliasConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A value lies outside its admissible range.
    #[error("'{param}' = {value} is out of range, expected {expected}")]
    OutOfRange {
        /// Dotted TOML path of the value.
        param: &'static str,
        /// The offending value.
        value: f64,
        /// Human-readable admissible range.
        expected: &'static str,
    },

    /// Two values that must be strictly ordered are not.
    #[error("'{lower}' ({lower_value}) must be below '{upper}' ({upper_value})")]
    Ordering {
        /// Path of the value that must be smaller.
        lower: &'static str,
        /// Its value.
        lower_value: f64,
        /// Path of the value that must be larger.
        upper: &'static str,
        /// Its value.
        upper_value: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn require(&mut self, ok: bool, param: &'static str, value: f64, expected: &'static str) {
        if !ok {
            self.errors.push(ValidationError::OutOfRange {
                param,
                value,
                expected,
            });
        }
    }

    fn unit_open_closed(&mut self, param: &'static str, value: f32) {
        self.require(value > 0.0 && value <= 1.0, param, f64::from(value), "(0, 1]");
    }

    fn positive(&mut self, param: &'static str, value: f32) {
        self.require(
            value.is_finite() && value > 0.0,
            param,
            f64::from(value),
            "a positive finite number",
        );
    }

    fn non_zero(&mut self, param: &'static str, value: usize) {
        self.require(value > 0, param, value as f64, "at least 1");
    }

    fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}

/// Check every value of a configuration.
pub fn validate_config(config: &AliasConfig) -> ValidationResult<()> {
    let mut c = Checker { errors: Vec::new() };

    let tiers = &config.tiers;
    c.positive("tiers.extreme_max_hz", tiers.extreme_max_hz);
    c.positive("tiers.aggressive_max_hz", tiers.aggressive_max_hz);
    if tiers.extreme_max_hz >= tiers.aggressive_max_hz {
        c.errors.push(ValidationError::Ordering {
            lower: "tiers.extreme_max_hz",
            lower_value: f64::from(tiers.extreme_max_hz),
            upper: "tiers.aggressive_max_hz",
            upper_value: f64::from(tiers.aggressive_max_hz),
        });
    }

    c.unit_open_closed("filter.aggressive_min_coeff", config.filter.aggressive_min_coeff);
    c.non_zero("filter.aggressive_passes", config.filter.aggressive_passes);

    c.unit_open_closed("pitch.aggressive", config.pitch.aggressive);
    c.unit_open_closed("pitch.extreme", config.pitch.extreme);

    c.positive("resonance.frequency_hz", config.resonance.frequency_hz);
    c.require(
        (0.0..1.0).contains(&config.resonance.gain),
        "resonance.gain",
        f64::from(config.resonance.gain),
        "[0, 1)",
    );

    c.unit_open_closed("output.clip_ceiling", config.output.clip_ceiling);

    c.non_zero("recurrence.max_window", config.recurrence.max_window);
    if let Some(threshold) = config.recurrence.threshold {
        c.require(
            (0.0..=1.0).contains(&threshold),
            "recurrence.threshold",
            f64::from(threshold),
            "[0, 1]",
        );
    }

    let xor = &config.xor;
    c.non_zero("xor.window", xor.window);
    c.non_zero("xor.scroll_speed", xor.scroll_speed);
    c.non_zero("xor.chunk_size", xor.chunk_size);
    if xor.scroll_speed > xor.window {
        c.errors.push(ValidationError::Ordering {
            lower: "xor.scroll_speed",
            lower_value: xor.scroll_speed as f64,
            upper: "xor.window",
            upper_value: xor.window as f64,
        });
    }
    if let Some(threshold) = xor.similarity_threshold {
        c.require(
            (0.0..=1.0).contains(&threshold),
            "xor.similarity_threshold",
            f64::from(threshold),
            "[0, 1]",
        );
    }

    c.finish()
}
