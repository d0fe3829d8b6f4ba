//! Show or create the configuration file.

use aliaslab_config::{AliasConfig, default_config_path, ensure_user_config_dir, paths};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the user configuration file
    Path,

    /// Write the default configuration to a file
    Init {
        /// Destination (default: the user configuration file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config: &AliasConfig) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigCommand::Path => {
            println!("{}", default_config_path().display());
        }
        ConfigCommand::Init { output, force } => {
            let path = match output {
                Some(path) => path,
                None => ensure_user_config_dir()?.join(paths::CONFIG_FILE_NAME),
            };
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (pass --force to overwrite)",
                    path.display()
                );
            }
            AliasConfig::default().save(&path)?;
            tracing::info!(path = %path.display(), "default configuration written");
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
