//! Integration tests for aliaslab-analysis crate.
//!
//! Tests exercise the public API end to end: the aliasing engine on realistic
//! tones, the statistics it is judged by, and the comparison tools fed with an
//! original and its aliased rendering.

use std::f32::consts::PI;

use aliaslab_analysis::alias::{lower_pitch, zero_order_hold};
use aliaslab_analysis::{
    AccumulatorState, AliasEngine, AliasParams, AliasSession, AliasingLevel, ResampleRequest,
    SeverityTier, TickOutcome, TierThresholds, XorAccumulator, XorConfig, analyze,
    compute_adaptive_threshold, compute_recurrence, resample, rms, truncate_pair, will_alias,
};
use aliaslab_core::{SignalBuffer, moving_average, one_pole_cascade};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a sine wave at a given frequency and amplitude.
fn sine(freq_hz: f32, sample_rate: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

/// Population variance of the first difference of a signal.
fn diff_variance(signal: &[f32]) -> f64 {
    let diffs: Vec<f64> = signal
        .windows(2)
        .map(|w| f64::from(w[1]) - f64::from(w[0]))
        .collect();
    let n = diffs.len() as f64;
    let mean = diffs.iter().sum::<f64>() / n;
    diffs.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n
}

// ===========================================================================
// 1. Aliasing engine
// ===========================================================================

#[test]
fn ten_second_tone_at_telephone_rate() {
    let sr = 44100.0;
    let tone = sine(5000.0, sr, 441_000, 1.0);
    let input = SignalBuffer::mono(sr, tone.clone()).unwrap();

    let request = ResampleRequest::auto(8000.0);
    assert_eq!(request.tier, SeverityTier::Extreme);

    let out = resample(&input, &request).unwrap();
    assert_eq!(out.len(), input.len());
    assert_eq!(out.sample_rate(), sr);
    assert!((out.duration() - 10.0).abs() < 1e-9);

    let before = analyze(&input);
    let after = analyze(&out);
    assert!(
        after.rms < before.rms,
        "rms {} should drop below {}",
        after.rms,
        before.rms
    );
    assert!(after.peak <= 0.95 + 1e-5);

    // The smoothing stage must actually run: a smoothed staircase moves less
    // from sample to sample than a raw one.
    let factor = 6;
    let raw = zero_order_hold(&tone, factor);
    let smoothed = zero_order_hold(&moving_average(&tone, 15), factor);
    assert!(diff_variance(&smoothed) < diff_variance(&raw));
}

#[test]
fn aggressive_stereo_channels_processed_independently() {
    let sr = 48000.0;
    let left = sine(440.0, sr, 4800, 0.8);
    let right = sine(6000.0, sr, 4800, 0.3);
    let stereo = SignalBuffer::new(sr, vec![left.clone(), right]).unwrap();
    let mono_left = SignalBuffer::mono(sr, left.clone()).unwrap();

    let request = ResampleRequest::with_tier(12000.0, SeverityTier::Aggressive);
    let out = resample(&stereo, &request).unwrap();
    let out_left = resample(&mono_left, &request).unwrap();

    assert_eq!(out.num_channels(), 2);
    assert_eq!(out.channel(0), out_left.channel(0));

    // No trace of the original survives in the rendering
    let expected = lower_pitch(&zero_order_hold(&one_pole_cascade(&left, 0.25, 3), 4), 0.85);
    assert_eq!(out.channel(0).unwrap(), expected.as_slice());
}

#[test]
fn harsher_tiers_remove_more_treble() {
    let sr = 44100.0;
    let input = SignalBuffer::mono(sr, sine(7000.0, sr, 22050, 0.5)).unwrap();
    let standard = resample(&input, &ResampleRequest::with_tier(8000.0, SeverityTier::Standard))
        .unwrap();
    let extreme = resample(&input, &ResampleRequest::with_tier(8000.0, SeverityTier::Extreme))
        .unwrap();
    assert!(rms(extreme.channel(0).unwrap()) < rms(standard.channel(0).unwrap()));
}

#[test]
fn custom_engine_parameters_take_effect() {
    let params = AliasParams {
        thresholds: TierThresholds::new(30000.0, 20000.0).unwrap(),
        clip_ceiling: 0.5,
        ..AliasParams::default()
    };
    let engine = AliasEngine::new(params).unwrap();
    let input = SignalBuffer::mono(44100.0, sine(80.0, 44100.0, 44100, 0.99)).unwrap();

    let out = engine.simulate(&input, 16000.0).unwrap();
    assert_eq!(engine.request_for(16000.0).tier, SeverityTier::Extreme);
    assert!(analyze(&out).peak <= 0.5 + 1e-5);
}

// ===========================================================================
// 2. Statistics and severity
// ===========================================================================

#[test]
fn nyquist_and_severity_agree_on_speech_rates() {
    // 4 kHz speech harmonics survive at 8 kHz only at the Nyquist limit
    assert!(!will_alias(8000.0, 4000.0));
    assert!(will_alias(8000.0, 5000.0));
    assert_eq!(AliasingLevel::from_sample_rate(8000.0), AliasingLevel::Extreme);
    assert_eq!(AliasingLevel::from_sample_rate(44100.0), AliasingLevel::None);
}

// ===========================================================================
// 3. Comparison
// ===========================================================================

#[test]
fn original_vs_aliased_recurrence() {
    let sr = 44100.0;
    let input = SignalBuffer::mono(sr, sine(3000.0, sr, 4410, 0.9)).unwrap();
    let aliased = AliasEngine::default().simulate(&input, 8000.0).unwrap();

    let a = &input.channel(0).unwrap()[..300];
    let b = &aliased.channel(0).unwrap()[..280];
    let (a, b) = truncate_pair(a, b);
    assert_eq!(a.len(), 280);

    let threshold = compute_adaptive_threshold(a, b);
    assert!(threshold > 0.0 && threshold < 1.0);

    let self_plot = compute_recurrence(a, a, threshold).unwrap();
    let cross_plot = compute_recurrence(a, b, threshold).unwrap();
    assert_eq!(cross_plot.size(), 280);
    assert!((0..280).all(|i| self_plot.get(i, i) == Some(true)));
    assert!(cross_plot.recurrence_rate() <= 1.0);
}

#[test]
fn xor_of_periodic_signal_cancels() {
    // A 100 Hz tone at 1 kHz repeats every 10 samples; scrolling by the
    // period makes every chunk identical to the one it displaces.
    let sr = 1000.0;
    let period = 10;
    let source = SignalBuffer::mono(sr, sine(100.0, sr, 200, 1.0)).unwrap();
    let config = XorConfig::for_chunk_size(40, period, period);
    let mut acc = XorAccumulator::with_source(config, &source).unwrap();

    acc.play();
    let mut completions = 0;
    for _ in 0..100 {
        if acc.tick() == TickOutcome::Completed {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(acc.state(), AccumulatorState::Completed);

    let image = acc.image().unwrap();
    assert!(image[0].iter().all(|&c| c == 0.0), "image: {:?}", image[0]);
}

#[test]
fn xor_highlights_a_change() {
    let mut samples = vec![0.25; 64];
    for s in &mut samples[40..48] {
        *s = 0.9;
    }
    let source = SignalBuffer::mono(1000.0, samples).unwrap();
    let mut acc = XorAccumulator::with_source(XorConfig::for_chunk_size(64, 8, 32), &source).unwrap();

    let image = acc.run_to_completion().unwrap();
    let lit = image[0].iter().filter(|&&c| c > 0.0).count();
    // First chunk against silence, the step up and the step down
    assert_eq!(lit, 24);
}

// ===========================================================================
// 4. Session
// ===========================================================================

#[test]
fn session_sweeps_rates() {
    let sr = 44100.0;
    let original = SignalBuffer::mono(sr, sine(1000.0, sr, 8820, 0.7)).unwrap();
    let mut session = AliasSession::new(AliasEngine::default(), original);

    for (rate, tier) in [
        (22050.0, SeverityTier::Standard),
        (16000.0, SeverityTier::Aggressive),
        (8000.0, SeverityTier::Extreme),
    ] {
        let live = session.set_target_rate(rate).unwrap().clone();
        assert_eq!(session.tier(), tier);
        assert_eq!(live.len(), session.original().len());
        assert_eq!(live.sample_rate(), sr);
    }

    session.set_target_rate(sr).unwrap();
    assert_eq!(session.live(), session.original());
}
