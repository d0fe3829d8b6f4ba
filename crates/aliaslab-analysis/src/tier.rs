//! Severity tiers for the aliasing simulation.
//!
//! The lower the simulated sample rate, the harsher the rendering:
//!
//! | Tier | Default range | Smoothing | Pitch |
//! |------|---------------|-----------|-------|
//! | [`SeverityTier::Standard`] | rate > 16 kHz | one one-pole pass | unchanged |
//! | [`SeverityTier::Aggressive`] | 10 kHz < rate ≤ 16 kHz | three one-pole passes | ×0.85 |
//! | [`SeverityTier::Extreme`] | rate ≤ 10 kHz | moving average | ×0.70, resonance, peak limit |
//!
//! The boundaries are perceptual choices and live in [`TierThresholds`].

use aliaslab_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// How hard the aliasing engine distorts the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    /// Single smoothing pass and zero-order hold.
    Standard,
    /// Cascaded smoothing, zero-order hold and mild pitch lowering.
    Aggressive,
    /// Box smoothing, strong pitch lowering, bass resonance and peak limiting.
    Extreme,
}

impl SeverityTier {
    /// All tiers from mildest to harshest.
    pub const ALL: [SeverityTier; 3] = [
        SeverityTier::Standard,
        SeverityTier::Aggressive,
        SeverityTier::Extreme,
    ];

    /// Lowercase name, as used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            SeverityTier::Standard => "standard",
            SeverityTier::Aggressive => "aggressive",
            SeverityTier::Extreme => "extreme",
        }
    }

    /// Parse a tier from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rate boundaries between tiers.
///
/// # Invariants
///
/// - `0 < extreme_max_hz < aggressive_max_hz`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Rates at or below this (and above `extreme_max_hz`) use [`SeverityTier::Aggressive`].
    pub aggressive_max_hz: f32,
    /// Rates at or below this use [`SeverityTier::Extreme`].
    pub extreme_max_hz: f32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            aggressive_max_hz: 16000.0,
            extreme_max_hz: 10000.0,
        }
    }
}

impl TierThresholds {
    /// Create validated thresholds.
    pub fn new(aggressive_max_hz: f32, extreme_max_hz: f32) -> Result<Self> {
        let thresholds = Self {
            aggressive_max_hz,
            extreme_max_hz,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that both boundaries are positive and correctly ordered.
    pub fn validate(&self) -> Result<()> {
        if !(self.extreme_max_hz.is_finite() && self.extreme_max_hz > 0.0) {
            return Err(Error::InvalidSampleRate(self.extreme_max_hz));
        }
        if !self.aggressive_max_hz.is_finite() {
            return Err(Error::InvalidSampleRate(self.aggressive_max_hz));
        }
        if self.extreme_max_hz >= self.aggressive_max_hz {
            return Err(Error::InvalidArgument(
                "extreme tier boundary must lie below the aggressive tier boundary",
            ));
        }
        Ok(())
    }

    /// Pick the tier for a simulated sample rate.
    ///
    /// ```rust
    /// use aliaslab_analysis::{SeverityTier, TierThresholds};
    ///
    /// let t = TierThresholds::default();
    /// assert_eq!(t.select(22050.0), SeverityTier::Standard);
    /// assert_eq!(t.select(16000.0), SeverityTier::Aggressive);
    /// assert_eq!(t.select(10000.0), SeverityTier::Extreme);
    /// ```
    pub fn select(&self, target_rate: f32) -> SeverityTier {
        if target_rate <= self.extreme_max_hz {
            SeverityTier::Extreme
        } else if target_rate <= self.aggressive_max_hz {
            SeverityTier::Aggressive
        } else {
            SeverityTier::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boundaries() {
        let t = TierThresholds::default();
        assert_eq!(t.select(44100.0), SeverityTier::Standard);
        assert_eq!(t.select(16000.1), SeverityTier::Standard);
        assert_eq!(t.select(16000.0), SeverityTier::Aggressive);
        assert_eq!(t.select(10000.1), SeverityTier::Aggressive);
        assert_eq!(t.select(10000.0), SeverityTier::Extreme);
        assert_eq!(t.select(8000.0), SeverityTier::Extreme);
    }

    #[test]
    fn custom_boundaries_keep_ordering() {
        let t = TierThresholds::new(24000.0, 12000.0).unwrap();
        assert_eq!(t.select(20000.0), SeverityTier::Aggressive);
        assert_eq!(t.select(12000.0), SeverityTier::Extreme);

        assert!(TierThresholds::new(10000.0, 16000.0).is_err());
        assert!(TierThresholds::new(10000.0, 10000.0).is_err());
        assert!(TierThresholds::new(16000.0, 0.0).is_err());
    }

    #[test]
    fn names_roundtrip() {
        for tier in SeverityTier::ALL {
            assert_eq!(SeverityTier::from_name(tier.name()), Some(tier));
        }
        assert_eq!(SeverityTier::from_name("EXTREME"), Some(SeverityTier::Extreme));
        assert_eq!(SeverityTier::from_name("mild"), None);
    }
}
