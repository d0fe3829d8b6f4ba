//! Platform-specific configuration paths.
//!
//! - **User config**: `~/.config/aliaslab/` (Linux), `~/Library/Application Support/aliaslab/` (macOS), `%APPDATA%\aliaslab\` (Windows)
//! - **Default config file**: `config.toml` inside the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use aliaslab_config::paths;
//!
//! println!("Config file: {:?}", paths::default_config_path());
//! ```

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "aliaslab";

/// File name of the configuration inside [`user_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the default configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("aliaslab/config.toml"));
        assert_eq!(path.parent(), Some(user_config_dir().as_path()));
    }
}
