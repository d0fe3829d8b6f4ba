//! Shared CLI helpers used across multiple commands.

use aliaslab_analysis::SeverityTier;
use aliaslab_config::AliasConfig;
use aliaslab_core::SignalBuffer;
use clap::ValueEnum;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Severity tiers as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliTier {
    Standard,
    Aggressive,
    Extreme,
}

impl From<CliTier> for SeverityTier {
    fn from(t: CliTier) -> Self {
        match t {
            CliTier::Standard => SeverityTier::Standard,
            CliTier::Aggressive => SeverityTier::Aggressive,
            CliTier::Extreme => SeverityTier::Extreme,
        }
    }
}

/// Load the configuration named on the command line, or the user default.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AliasConfig> {
    let config = match path {
        Some(path) => AliasConfig::load(path)?,
        None => AliasConfig::load_or_default()?,
    };
    tracing::debug!(?path, "configuration loaded");
    Ok(config)
}

/// Borrow one channel of a buffer, with a readable error when it is missing.
pub fn channel(buffer: &SignalBuffer, index: usize) -> anyhow::Result<&[f32]> {
    buffer.channel(index).ok_or_else(|| {
        anyhow::anyhow!(
            "channel {} requested but the signal has {} channel(s)",
            index,
            buffer.num_channels()
        )
    })
}

/// Write rows of values as comma-separated lines.
pub fn write_csv<T, R>(path: &Path, rows: R) -> anyhow::Result<()>
where
    T: Display,
    R: IntoIterator,
    R::Item: IntoIterator<Item = T>,
{
    let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
    for row in rows {
        let line: Vec<String> = row.into_iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// Print a serializable record as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
