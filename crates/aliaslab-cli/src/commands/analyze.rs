//! Level statistics of a WAV file.

use aliaslab_analysis::{AliasingLevel, BufferAnalysis, aliasing_severity, amplitude_profile, analyze};
use aliaslab_io::read_signal;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Include an amplitude profile of this many samples from the middle
    #[arg(long)]
    bins: Option<usize>,
}

#[derive(Serialize)]
struct AnalyzeReport {
    file: String,
    #[serde(flatten)]
    analysis: BufferAnalysis,
    severity: u8,
    level: AliasingLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    amplitude_profile: Option<Vec<f32>>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let signal = read_signal(&args.input)?;
    let analysis = analyze(&signal);
    let severity = aliasing_severity(analysis.sample_rate);

    let report = AnalyzeReport {
        file: args.input.to_string_lossy().into_owned(),
        analysis,
        severity,
        level: AliasingLevel::from_severity(severity),
        amplitude_profile: args.bins.map(|bins| amplitude_profile(&signal, bins)),
    };

    if args.json {
        return super::common::print_json(&report);
    }

    println!("File:        {}", report.file);
    println!("Channels:    {}", analysis.num_channels);
    println!("Sample Rate: {} Hz", analysis.sample_rate);
    println!("Nyquist:     {} Hz", analysis.nyquist_frequency);
    println!("Duration:    {:.3}s ({} samples)", analysis.duration, analysis.length);
    println!("RMS:         {:.4}", analysis.rms);
    println!("Peak:        {:.4}", analysis.peak);
    println!(
        "Aliasing:    {}/100 ({}: {})",
        severity,
        report.level,
        report.level.description()
    );

    if let Some(profile) = &report.amplitude_profile {
        println!("\nAmplitude profile ({} samples):", profile.len());
        for (i, value) in profile.iter().enumerate() {
            let bar = "#".repeat((value * 40.0).round() as usize);
            println!("  {i:4} {value:.3} {bar}");
        }
    }

    Ok(())
}
