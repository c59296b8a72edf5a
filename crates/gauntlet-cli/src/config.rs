//! Optional `gauntlet.toml` configuration
//!
//! A host binary may keep harness defaults in a `gauntlet.toml` next to
//! where it runs. CLI flags and their environment variables take precedence
//! over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML syntax in {file}: {error}")]
    TomlParse {
        file: PathBuf,
        error: toml::de::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Harness configuration from `gauntlet.toml`
///
/// Both sections are optional; an absent file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Console output configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Run configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,
}

/// Console output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Colorize the console report (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Default test filter, `"Suite"` or `"Suite.Test"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl HarnessConfig {
    /// Load `gauntlet.toml` from `dir`, or defaults when no file exists.
    pub fn load_from_directory(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join("gauntlet.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load a specific configuration file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io(e)
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
            file: path.to_path_buf(),
            error: e,
        })
    }

    /// Default test filter from the file, if any.
    pub fn filter(&self) -> Option<&str> {
        self.run.as_ref()?.filter.as_deref()
    }

    /// Whether the console report should be colorized (default: true).
    pub fn color(&self) -> bool {
        self.output.as_ref().and_then(|o| o.color).unwrap_or(true)
    }
}
