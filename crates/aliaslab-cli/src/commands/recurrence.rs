//! Cross-recurrence plot of two signals.

use super::common::{channel, print_json, write_csv};
use aliaslab_analysis::{AliasEngine, compute_adaptive_threshold, compute_recurrence, truncate_pair};
use aliaslab_config::AliasConfig;
use aliaslab_io::read_signal;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct RecurrenceArgs {
    /// First WAV file
    #[arg(value_name = "A")]
    a: PathBuf,

    /// Second WAV file (omit and pass --rate to compare A with its aliased rendering)
    #[arg(value_name = "B")]
    b: Option<PathBuf>,

    /// Compare A with itself rendered at this rate
    #[arg(long, conflicts_with = "b")]
    rate: Option<f32>,

    /// Similarity threshold in [0, 1] (default: config, else adaptive)
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Number of samples compared (default: config max_window)
    #[arg(short, long)]
    window: Option<usize>,

    /// First sample of the window
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Channel to compare
    #[arg(long, default_value = "0")]
    channel: usize,

    /// Write the matrix as CSV rows of 0/1
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RecurrenceReport {
    size: usize,
    threshold: f32,
    adaptive: bool,
    recurrence_rate: f32,
    diagonal_rate: f32,
}

pub fn run(args: RecurrenceArgs, config: &AliasConfig) -> anyhow::Result<()> {
    let first = read_signal(&args.a)?;
    let second = match (&args.b, args.rate) {
        (Some(path), _) => read_signal(path)?,
        (None, Some(rate)) => AliasEngine::new(config.alias_params())?.simulate(&first, rate)?,
        (None, None) => anyhow::bail!("pass a second file or --rate"),
    };

    let window = args.window.unwrap_or(config.recurrence.max_window);
    let slice = |samples: &[f32]| -> Vec<f32> {
        samples.iter().skip(args.offset).take(window).copied().collect()
    };
    let a = slice(channel(&first, args.channel)?);
    let b = slice(channel(&second, args.channel)?);
    let (a, b) = truncate_pair(&a, &b);
    if a.is_empty() {
        anyhow::bail!("no samples to compare at offset {}", args.offset);
    }

    let (threshold, adaptive) = match args.threshold.or(config.recurrence.threshold) {
        Some(t) => (t, false),
        None => (compute_adaptive_threshold(a, b).min(1.0), true),
    };
    let matrix = compute_recurrence(a, b, threshold)?;

    let size = matrix.size();
    let diagonal = (0..size).filter(|&i| matrix.get(i, i) == Some(true)).count();
    let report = RecurrenceReport {
        size,
        threshold,
        adaptive,
        recurrence_rate: matrix.recurrence_rate(),
        diagonal_rate: diagonal as f32 / size as f32,
    };

    if let Some(path) = &args.output {
        write_csv(path, matrix.to_rows())?;
    }

    if args.json {
        return print_json(&report);
    }

    println!("Compared {size} samples (offset {})", args.offset);
    println!(
        "Threshold:       {:.4}{}",
        report.threshold,
        if report.adaptive { " (adaptive)" } else { "" }
    );
    println!("Recurrence rate: {:.1}%", report.recurrence_rate * 100.0);
    println!("Diagonal:        {:.1}%", report.diagonal_rate * 100.0);
    if let Some(path) = &args.output {
        println!("Wrote matrix to {}", path.display());
    }

    Ok(())
}
