//! Locating and reading the TOML configuration.
//!
//! `--config` wins; otherwise `wallsheet/config.toml` under the working
//! directory, then `config.toml` in the platform config directory. With no
//! file anywhere the built-in defaults apply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use wallsheet::{WallSheetError, config::AppConfig};

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{path} is not a valid configuration: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for WallSheetError {
    fn from(err: ConfigError) -> Self {
        WallSheetError::Config(err.to_string())
    }
}

/// Loads the first configuration found, or the defaults.
///
/// # Errors
///
/// Returns [`WallSheetError::Config`] when `explicit_path` does not exist or
/// the file found cannot be parsed, and [`WallSheetError::Io`] when it cannot
/// be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WallSheetError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("wallsheet/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "wallsheet", "wallsheet") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("No platform config directory");
    }

    debug!("No configuration file, using defaults");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, WallSheetError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err: toml::de::Error| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use wallsheet::config::OutputFormat;

    use super::*;

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"svg\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output().format(), OutputFormat::Svg);
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, WallSheetError::Config(ref message) if message.contains("Missing")));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[mesh]\npitch = \"wide\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, WallSheetError::Config(_)));
    }
}
