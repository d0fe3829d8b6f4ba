//! Render a WAV file at lower sample rates.

use super::common::CliTier;
use aliaslab_analysis::{
    AliasEngine, AliasSession, AliasingLevel, ResampleRequest, aliasing_severity, analyze,
};
use aliaslab_config::AliasConfig;
use aliaslab_io::{read_signal, write_signal};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct SimulateArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Target sample rate in Hz (repeat or comma-separate for several)
    #[arg(short, long = "rate", required = true, value_delimiter = ',', num_args = 1..)]
    rates: Vec<f32>,

    /// Force a tier instead of choosing it from the rate
    #[arg(long, value_enum)]
    tier: Option<CliTier>,

    /// Output WAV file (single rate only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the rendered files (default: next to the input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output bit depth (16 or 24 PCM, 32 float)
    #[arg(long, default_value = "16")]
    bits: u16,

    /// Mix down to mono before rendering
    #[arg(long)]
    mono: bool,
}

pub fn run(args: SimulateArgs, config: &AliasConfig) -> anyhow::Result<()> {
    if args.output.is_some() && args.rates.len() > 1 {
        anyhow::bail!("--output accepts a single --rate; use --out-dir for several");
    }

    let mut original = read_signal(&args.input)?;
    if args.mono {
        original = original.to_mono();
    }
    let before = analyze(&original);

    println!("Loaded {}", args.input.display());
    println!(
        "  {} channel(s), {} Hz, {:.2}s, RMS {:.4}",
        before.num_channels, before.sample_rate, before.duration, before.rms
    );

    let engine = AliasEngine::new(config.alias_params())?;
    let mut session = AliasSession::new(engine.clone(), original);

    let stem = args
        .input
        .file_stem()
        .map_or_else(|| "signal".to_string(), |s| s.to_string_lossy().into_owned());
    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| args.input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let pb = if args.rates.len() > 1 {
        let pb = ProgressBar::new(args.rates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("##-"),
        );
        Some(pb)
    } else {
        None
    };

    for &rate in &args.rates {
        let request = match args.tier {
            Some(tier) => ResampleRequest::with_tier(rate, tier.into()),
            None => engine.request_for(rate),
        };
        let live = session.apply(request)?;
        let after = analyze(live);

        let path = match &args.output {
            Some(path) => path.clone(),
            None => out_dir.join(session.export_file_name(&stem)),
        };
        write_signal(&path, session.live(), args.bits)?;

        let severity = aliasing_severity(rate);
        let line = format!(
            "{} Hz: {} tier, severity {}/100 ({}), RMS {:.4} -> {}",
            rate,
            session.tier(),
            severity,
            AliasingLevel::from_severity(severity),
            after.rms,
            path.display()
        );
        match &pb {
            Some(pb) => {
                pb.suspend(|| println!("{line}"));
                pb.inc(1);
            }
            None => println!("{line}"),
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    Ok(())
}
