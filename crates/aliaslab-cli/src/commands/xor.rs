//! Run the XOR difference accumulator over a WAV file.

use super::common::{print_json, write_csv};
use aliaslab_analysis::{TickOutcome, XorAccumulator, XorConfig};
use aliaslab_config::AliasConfig;
use aliaslab_io::read_signal;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct XorArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Rolling window length in samples
    #[arg(short, long)]
    window: Option<usize>,

    /// Samples consumed per tick
    #[arg(short, long)]
    scroll: Option<usize>,

    /// Chunk size selecting the threshold (10, 32 or other)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Explicit similarity threshold
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Write the final image as CSV, one row per channel
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ChannelSummary {
    channel: usize,
    lit_cells: usize,
    mean: f32,
    max: f32,
}

#[derive(Serialize)]
struct XorReport {
    config: XorConfig,
    ticks: u64,
    channels: Vec<ChannelSummary>,
}

fn resolve_config(args: &XorArgs, config: &AliasConfig) -> XorConfig {
    let mut section = config.xor.clone();
    if let Some(window) = args.window {
        section.window = window;
    }
    if let Some(scroll) = args.scroll {
        section.scroll_speed = scroll;
    }
    if let Some(chunk) = args.chunk_size {
        section.chunk_size = chunk;
        // An explicit chunk size picks its own threshold
        section.similarity_threshold = None;
    }
    if args.threshold.is_some() {
        section.similarity_threshold = args.threshold;
    }
    AliasConfig {
        xor: section,
        ..AliasConfig::default()
    }
    .xor_config()
}

pub fn run(args: XorArgs, config: &AliasConfig) -> anyhow::Result<()> {
    let signal = read_signal(&args.input)?;
    let xor_config = resolve_config(&args, config);
    let mut acc = XorAccumulator::with_source(xor_config, &signal)?;

    let total_ticks = signal.len().div_ceil(xor_config.scroll_speed).max(1) as u64;
    let pb = ProgressBar::new(total_ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    if args.json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    acc.play();
    let mut ticks = 0u64;
    loop {
        let outcome = acc.tick();
        ticks += 1;
        pb.inc(1);
        match outcome {
            TickOutcome::Advanced(_) => {}
            TickOutcome::Completed => break,
            other => anyhow::bail!("accumulator stopped unexpectedly: {other:?}"),
        }
    }
    pb.finish_and_clear();

    let image = acc
        .image()
        .ok_or_else(|| anyhow::anyhow!("accumulator did not complete"))?;

    let channels: Vec<ChannelSummary> = image
        .iter()
        .enumerate()
        .map(|(channel, cells)| ChannelSummary {
            channel,
            lit_cells: cells.iter().filter(|&&c| c != 0.0).count(),
            mean: cells.iter().sum::<f32>() / cells.len().max(1) as f32,
            max: cells.iter().fold(0.0f32, |m, &c| m.max(c)),
        })
        .collect();

    if let Some(path) = &args.output {
        write_csv(path, image.iter().map(|row| row.iter().copied()))?;
    }

    let report = XorReport {
        config: xor_config,
        ticks,
        channels,
    };

    if args.json {
        return print_json(&report);
    }

    println!(
        "XOR image: window {}, scroll {}, threshold {}",
        xor_config.window, xor_config.scroll_speed, xor_config.similarity_threshold
    );
    println!("  {} ticks over {} samples", report.ticks, signal.len());
    for ch in &report.channels {
        println!(
            "  channel {}: {}/{} cells lit, mean {:.4}, max {:.4}",
            ch.channel, ch.lit_cells, xor_config.window, ch.mean, ch.max
        );
    }
    if let Some(path) = &args.output {
        println!("Wrote image to {}", path.display());
    }

    Ok(())
}
