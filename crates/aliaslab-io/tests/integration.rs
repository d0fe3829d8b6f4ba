//! Integration tests for aliaslab-io WAV loading and export.

use aliaslab_core::SignalBuffer;
use aliaslab_io::{WavFormat, decode_wav, encode_wav, read_signal, read_wav_info, write_signal};
use tempfile::NamedTempFile;

/// Generate a sine wave at the given sample rate.
fn sine_wave(sample_rate: f32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

// ---------------------------------------------------------------------------
// Roundtrips
// ---------------------------------------------------------------------------

#[test]
fn stereo_channels_stay_separate() {
    let left = sine_wave(44100.0, 440.0, 4410);
    let right = vec![0.25; 4410];
    let buffer = SignalBuffer::new(44100.0, vec![left.clone(), right]).unwrap();

    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &buffer, 32).unwrap();

    let loaded = read_signal(file.path()).unwrap();
    assert_eq!(loaded.num_channels(), 2);
    assert_eq!(loaded.len(), 4410);
    assert_eq!(loaded.channel(0).unwrap(), left.as_slice());
    assert!(loaded.channel(1).unwrap().iter().all(|&x| x == 0.25));
}

#[test]
fn pcm24_roundtrip() {
    let samples = sine_wave(48000.0, 1000.0, 4800);
    let buffer = SignalBuffer::mono(48000.0, samples.clone()).unwrap();

    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &buffer, 24).unwrap();

    let loaded = read_signal(file.path()).unwrap();
    for (a, b) in samples.iter().zip(loaded.channel(0).unwrap()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn in_memory_matches_file() {
    let buffer = SignalBuffer::mono(8000.0, sine_wave(8000.0, 300.0, 800)).unwrap();
    let bytes = encode_wav(&buffer, 16).unwrap();

    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &buffer, 16).unwrap();
    assert_eq!(std::fs::read(file.path()).unwrap(), bytes);

    let decoded = decode_wav(&bytes).unwrap();
    assert_eq!(decoded.sample_rate(), 8000.0);
    assert_eq!(decoded.len(), 800);
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[test]
fn info_reports_header_fields() {
    let buffer = SignalBuffer::silent(22050.0, 2, 11025).unwrap();
    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &buffer, 16).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, 22050);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.num_frames, 11025);
    assert!((info.duration_secs - 0.5).abs() < 1e-9);
    assert_eq!(info.format, WavFormat::Pcm);
}

#[test]
fn garbage_is_rejected() {
    assert!(decode_wav(b"definitely not a wav file").is_err());
}
