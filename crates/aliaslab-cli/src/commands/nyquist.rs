//! Nyquist check for a sample rate and a frequency.

use aliaslab_analysis::{
    AliasingLevel, SeverityTier, aliasing_severity, nyquist_frequency, speech_aliasing_present,
    will_alias,
};
use aliaslab_config::AliasConfig;
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct NyquistArgs {
    /// Sample rate in Hz
    #[arg(short, long)]
    rate: f32,

    /// Highest frequency of the content in Hz
    #[arg(short, long)]
    freq: Option<f32>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct NyquistReport {
    sample_rate: f32,
    nyquist_frequency: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_frequency: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    will_alias: Option<bool>,
    severity: u8,
    level: AliasingLevel,
    tier: SeverityTier,
    speech_aliasing: bool,
}

pub fn run(args: NyquistArgs, config: &AliasConfig) -> anyhow::Result<()> {
    if !(args.rate.is_finite() && args.rate > 0.0) {
        anyhow::bail!("sample rate must be positive, got {}", args.rate);
    }

    let severity = aliasing_severity(args.rate);
    let report = NyquistReport {
        sample_rate: args.rate,
        nyquist_frequency: nyquist_frequency(args.rate),
        max_frequency: args.freq,
        will_alias: args.freq.map(|f| will_alias(args.rate, f)),
        severity,
        level: AliasingLevel::from_severity(severity),
        tier: config.alias_params().thresholds.select(args.rate),
        speech_aliasing: speech_aliasing_present(args.rate),
    };

    if args.json {
        return super::common::print_json(&report);
    }

    println!("Sample rate:  {} Hz", report.sample_rate);
    println!("Nyquist:      {} Hz", report.nyquist_frequency);
    if let (Some(freq), Some(aliases)) = (report.max_frequency, report.will_alias) {
        if aliases {
            println!("{freq} Hz content: ALIASES (above Nyquist)");
        } else {
            println!("{freq} Hz content: ok (at or below Nyquist)");
        }
    }
    println!(
        "Severity:     {}/100 ({}: {})",
        report.severity,
        report.level,
        report.level.description()
    );
    println!("Tier:         {}", report.tier);
    println!(
        "Speech:       {}",
        if report.speech_aliasing {
            "harmonics alias"
        } else {
            "full quality"
        }
    );

    Ok(())
}
