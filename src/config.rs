//! Configuration file handling for ascii-mosaic.
//!
//! Loads configuration from `<config dir>/ascii-mosaic/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ascii::{ConvertError, ConvertOptions, DEFAULT_BLOCK_SIZE, DEFAULT_GRAIN};

/// Configuration file structure for ascii-mosaic.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub mosaic: MosaicConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Block side length in pixels
    #[serde(default = "default_block_size")]
    pub block_size: u32,
    /// Rows per parallel strip
    #[serde(default = "default_grain")]
    pub grain: u32,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            grain: DEFAULT_GRAIN,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Worker threads; 0 lets rayon decide
    #[serde(default)]
    pub threads: usize,
}

fn default_block_size() -> u32 {
    DEFAULT_BLOCK_SIZE
}

fn default_grain() -> u32 {
    DEFAULT_GRAIN
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a path the user named explicitly.
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from_explicit(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        Self::load(Some(path))
    }

    /// Validated conversion options from the `[mosaic]` section.
    pub fn convert_options(&self) -> Result<ConvertOptions, ConvertError> {
        ConvertOptions::new(self.mosaic.block_size, self.mosaic.grain)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-mosaic").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-mosaic/config.toml")
        })
}

/// Commented default config written by `ascii-mosaic config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# ascii-mosaic configuration

[mosaic]
# Side length of each square block, in pixels
block_size = 16
# Rows handed to each parallel worker (rounded down to whole blocks)
grain = 500

[runtime]
# Worker threads (0 = one per core)
threads = 0
"#;
