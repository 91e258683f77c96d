//! Engine configuration (`rpn15c.toml`).
//!
//! ```toml
//! [display]
//! format = "sci"
//! digits = 6
//!
//! [angle]
//! unit = "rad"
//!
//! [engine]
//! overflow = "error"
//! begin = false
//! seed = 0.5
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::mode::{AngleUnit, DisplayFormat, MAX_FORMAT_DIGITS};

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for '{field}' in {path}: {reason}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// What happens when a result exceeds ±9.999999999 × 10⁹⁹.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Clamp to the largest displayable value and set flag 9.
    #[default]
    Saturate,
    /// Fail the operation with `Error 0`.
    Error,
}

/// Display notation name, as written in the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatName {
    #[default]
    Fix,
    Sci,
    Eng,
}

/// A parsed configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySection,
    pub angle: AngleSection,
    pub engine: EngineSection,
}

/// The `[display]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub format: FormatName,
    pub digits: u8,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            format: FormatName::Fix,
            digits: 4,
        }
    }
}

/// The `[angle]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AngleSection {
    pub unit: AngleUnit,
}

/// The `[engine]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub overflow: OverflowPolicy,
    /// Initial BEGIN annunciator.
    pub begin: bool,
    /// Initial RAN# seed; only its fractional part is used.
    pub seed: f64,
}

impl Config {
    /// Load a configuration from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_str(&content, path)
    }

    /// Parse a configuration from a string.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.display.digits > MAX_FORMAT_DIGITS {
            return Err(ConfigError::Invalid {
                path: path.to_owned(),
                field: "display.digits",
                reason: format!("{} is more than {}", self.display.digits, MAX_FORMAT_DIGITS),
            });
        }
        if !self.engine.seed.is_finite() {
            return Err(ConfigError::Invalid {
                path: path.to_owned(),
                field: "engine.seed",
                reason: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }

    /// Load the file at `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The configured display format.
    pub fn display_format(&self) -> DisplayFormat {
        let digits = self.display.digits;
        match self.display.format {
            FormatName::Fix => DisplayFormat::Fix(digits),
            FormatName::Sci => DisplayFormat::Sci(digits),
            FormatName::Eng => DisplayFormat::Eng(digits),
        }
    }
}

/// Default config file: `<config dir>/rpn15c/rpn15c.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rpn15c").join("rpn15c.toml"))
}
