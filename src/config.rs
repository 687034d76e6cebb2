//! User settings for the command-line front end.
//!
//! Stored in `~/.lsbhide/config.toml`. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default upper bound on carrier input size (64 MiB).
pub const DEFAULT_MAX_CARRIER_BYTES: u64 = 64 * 1024 * 1024;

/// Default suffix appended to the carrier file stem when encoding.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_encoded";

/// Errors that can occur when loading or saving settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Front-end settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Carriers larger than this many bytes are refused before decoding.
    pub max_carrier_bytes: u64,

    /// Appended to the input file stem when `encode` gets no output path.
    pub output_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_carrier_bytes: DEFAULT_MAX_CARRIER_BYTES,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads settings from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Saves settings to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        log::info!("Saved settings to {}", path.display());
        Ok(path)
    }

    /// Saves settings to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the settings file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Default output path for an encoded carrier: `<stem><suffix>.<extension>`
    /// next to the input.
    pub fn output_path_for(&self, input: &Path, extension: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "carrier".to_string());
        input.with_file_name(format!("{}{}.{}", stem, self.output_suffix, extension))
    }
}

/// Get the lsbhide config directory (`~/.lsbhide`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".lsbhide"))
        .ok_or(ConfigError::NoConfigDir)
}
