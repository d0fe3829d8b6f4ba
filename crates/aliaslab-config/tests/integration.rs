//! Integration tests for aliaslab-config.
//!
//! These tests verify that configuration files drive the engine and the
//! accumulator end to end.

use aliaslab_analysis::{AliasEngine, SeverityTier, XorAccumulator};
use aliaslab_config::{AliasConfig, ConfigError};
use aliaslab_core::SignalBuffer;
use tempfile::TempDir;

#[test]
fn saved_config_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AliasConfig::default();
    config.tiers.aggressive_max_hz = 22050.0;
    config.tiers.extreme_max_hz = 11025.0;
    config.xor.similarity_threshold = Some(0.15);
    config.save(&path).unwrap();

    let loaded = AliasConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn config_moves_tier_boundaries() {
    let config = AliasConfig::from_toml(
        r#"
        [tiers]
        aggressive_max_hz = 24000.0
        extreme_max_hz = 12000.0
        "#,
    )
    .unwrap();
    let engine = AliasEngine::new(config.alias_params()).unwrap();
    assert_eq!(engine.request_for(20000.0).tier, SeverityTier::Aggressive);
    assert_eq!(engine.request_for(12000.0).tier, SeverityTier::Extreme);

    let input = SignalBuffer::mono(48000.0, vec![0.3; 960]).unwrap();
    let out = engine.simulate(&input, 20000.0).unwrap();
    assert_eq!(out.len(), input.len());
}

#[test]
fn config_drives_accumulator() {
    let config = AliasConfig::from_toml("[xor]\nwindow = 8\nscroll_speed = 4\nchunk_size = 10\n")
        .unwrap();
    let source = SignalBuffer::mono(1000.0, vec![0.5; 16]).unwrap();
    let mut acc = XorAccumulator::with_source(config.xor_config(), &source).unwrap();
    let image = acc.run_to_completion().unwrap();
    assert_eq!(image[0].len(), 8);
    // Constant input cancels after the first chunk scrolled out
    assert!(image[0].iter().all(|&c| c == 0.0));
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AliasConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn invalid_file_reports_every_problem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[pitch]\naggressive = 2.0\nextreme = -1.0\n").unwrap();

    let err = AliasConfig::load(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("pitch.aggressive"), "got: {msg}");
    assert!(msg.contains("pitch.extreme"), "got: {msg}");
}
