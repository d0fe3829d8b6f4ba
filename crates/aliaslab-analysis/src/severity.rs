//! Perceptual aliasing severity.
//!
//! Maps a simulated sample rate to a 0–100 score and a coarse label. The scale
//! is anchored at CD quality (44.1 kHz, no aliasing) and telephone quality
//! (8 kHz, maximal aliasing) and is linear in between.

use serde::{Deserialize, Serialize};

/// Rate at and above which the severity is 0.
pub const CD_QUALITY_HZ: f32 = 44100.0;

/// Rate at and below which the severity is 100.
pub const TELEPHONE_QUALITY_HZ: f32 = 8000.0;

/// Lowest rate that keeps speech harmonics free of aliasing.
pub const FULL_SPEECH_QUALITY_HZ: f32 = 40000.0;

/// Severity score in `0..=100` for a simulated sample rate.
///
/// ```rust
/// use aliaslab_analysis::severity::aliasing_severity;
///
/// assert_eq!(aliasing_severity(48000.0), 0);
/// assert_eq!(aliasing_severity(26050.0), 50);
/// assert_eq!(aliasing_severity(4000.0), 100);
/// ```
pub fn aliasing_severity(sample_rate: f32) -> u8 {
    if sample_rate >= CD_QUALITY_HZ {
        return 0;
    }
    if sample_rate <= TELEPHONE_QUALITY_HZ {
        return 100;
    }
    let span = CD_QUALITY_HZ - TELEPHONE_QUALITY_HZ;
    let score = (CD_QUALITY_HZ - sample_rate) / span * 100.0;
    score.round().clamp(0.0, 100.0) as u8
}

/// Check whether speech recorded at `sample_rate` loses harmonics to aliasing.
pub fn speech_aliasing_present(sample_rate: f32) -> bool {
    sample_rate < FULL_SPEECH_QUALITY_HZ
}

/// Coarse severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasingLevel {
    /// Severity 0.
    None,
    /// Severity 1–24.
    Minimal,
    /// Severity 25–49.
    Moderate,
    /// Severity 50–74.
    Severe,
    /// Severity 75–100.
    Extreme,
}

impl AliasingLevel {
    /// Bucket a severity score.
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            0 => AliasingLevel::None,
            1..25 => AliasingLevel::Minimal,
            25..50 => AliasingLevel::Moderate,
            50..75 => AliasingLevel::Severe,
            _ => AliasingLevel::Extreme,
        }
    }

    /// Bucket the severity of a simulated sample rate.
    pub fn from_sample_rate(sample_rate: f32) -> Self {
        Self::from_severity(aliasing_severity(sample_rate))
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            AliasingLevel::None => "None",
            AliasingLevel::Minimal => "Minimal",
            AliasingLevel::Moderate => "Moderate",
            AliasingLevel::Severe => "Severe",
            AliasingLevel::Extreme => "Extreme",
        }
    }

    /// One-line description of how the level sounds.
    pub fn description(self) -> &'static str {
        match self {
            AliasingLevel::None => "Full quality, no audible aliasing",
            AliasingLevel::Minimal => "Slight loss of high-frequency detail",
            AliasingLevel::Moderate => "Noticeable harshness on sibilants",
            AliasingLevel::Severe => "Metallic artifacts and muffled speech",
            AliasingLevel::Extreme => "Heavily distorted, telephone-like sound",
        }
    }
}

impl std::fmt::Display for AliasingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_anchors() {
        assert_eq!(aliasing_severity(44100.0), 0);
        assert_eq!(aliasing_severity(96000.0), 0);
        assert_eq!(aliasing_severity(8000.0), 100);
        assert_eq!(aliasing_severity(1000.0), 100);
    }

    #[test]
    fn severity_is_linear_and_monotonic() {
        // 44100 - 0.25 * 36100 = 35075
        assert_eq!(aliasing_severity(35075.0), 25);
        let mut last = 0;
        for rate in (8000..=44100).rev().step_by(500) {
            let s = aliasing_severity(rate as f32);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn level_buckets() {
        assert_eq!(AliasingLevel::from_severity(0), AliasingLevel::None);
        assert_eq!(AliasingLevel::from_severity(1), AliasingLevel::Minimal);
        assert_eq!(AliasingLevel::from_severity(24), AliasingLevel::Minimal);
        assert_eq!(AliasingLevel::from_severity(25), AliasingLevel::Moderate);
        assert_eq!(AliasingLevel::from_severity(74), AliasingLevel::Severe);
        assert_eq!(AliasingLevel::from_severity(75), AliasingLevel::Extreme);
        assert_eq!(AliasingLevel::from_sample_rate(8000.0), AliasingLevel::Extreme);
        assert_eq!(AliasingLevel::from_sample_rate(44100.0).label(), "None");
    }

    #[test]
    fn speech_threshold() {
        assert!(speech_aliasing_present(22050.0));
        assert!(speech_aliasing_present(39999.0));
        assert!(!speech_aliasing_present(40000.0));
    }
}
