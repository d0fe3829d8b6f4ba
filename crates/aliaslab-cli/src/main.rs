//! aliaslab CLI - hear and measure what a lower sample rate does to audio.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aliaslab")]
#[command(author, version, about = "Sample-rate aliasing simulator and analyzer", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config file when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file as it would sound at lower sample rates
    Simulate(commands::simulate::SimulateArgs),

    /// Print level statistics of a WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Check whether a frequency aliases at a sample rate
    Nyquist(commands::nyquist::NyquistArgs),

    /// Cross-recurrence plot of two signals
    Recurrence(commands::recurrence::RecurrenceArgs),

    /// Run the XOR difference accumulator over a signal
    Xor(commands::xor::XorArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::common::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args, &config),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Nyquist(args) => commands::nyquist::run(args, &config),
        Commands::Recurrence(args) => commands::recurrence::run(args, &config),
        Commands::Xor(args) => commands::xor::run(args, &config),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
