//! Environment- and file-backed configuration.
//!
//! [`Config`] holds the batch binary's I/O settings (`VHTAG_*` environment variables on top of
//! defaults). [`TaggerConfig`] bundles the per-module settings and can be read from a JSON file.

pub mod error;


pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::leptonic::ZhLeptonicConfig;
use crate::scoring::DnnConfig;
use crate::selection::JetSelectionConfig;

/// Batch binary configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file holding an array of events. Default: `./events.json`.
    pub events_path: PathBuf,

    /// Where to write JSON lines; stdout when unset.
    pub output_path: Option<PathBuf>,

    /// Optional [`TaggerConfig`] JSON file.
    pub tagger_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("./events.json"),
            output_path: None,
            tagger_config_path: None,
        }
    }
}

impl Config {
    const ENV_EVENTS_PATH: &'static str = "VHTAG_EVENTS_PATH";
    const ENV_OUTPUT_PATH: &'static str = "VHTAG_OUTPUT_PATH";
    const ENV_TAGGER_CONFIG: &'static str = "VHTAG_TAGGER_CONFIG";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            events_path: env::var(Self::ENV_EVENTS_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.events_path),
            output_path: parse_optional_path_from_env(Self::ENV_OUTPUT_PATH),
            tagger_config_path: parse_optional_path_from_env(Self::ENV_TAGGER_CONFIG),
        }
    }

    /// Checks that input paths exist (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file(&self.events_path)?;

        if let Some(ref path) = self.tagger_config_path {
            require_file(path)?;
        }

        if let Some(ref path) = self.output_path
            && path.is_dir()
        {
            return Err(ConfigError::NotAFile { path: path.clone() });
        }

        Ok(())
    }
}

/// Settings of every tagger in the crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    pub selection: JetSelectionConfig,
    pub dnn: DnnConfig,
    pub leptonic: ZhLeptonicConfig,
}

impl TaggerConfig {
    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        require_file(path)?;

        let bytes = std::fs::read(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults with `VHTAG_*` overrides applied per section.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            selection: JetSelectionConfig::from_env()?,
            dnn: DnnConfig::from_env()?,
            leptonic: ZhLeptonicConfig::default(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selection.validate()?;
        self.dnn.validate()?;
        self.leptonic.validate()?;
        Ok(())
    }
}

pub(crate) fn require_file(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ConfigError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

pub(crate) fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn parse_f64_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|source| ConfigError::ParseFloat {
                name,
                value,
                source,
            }),
        Err(_) => Ok(default),
    }
}

pub(crate) fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool { name, value }),
        },
        Err(_) => Ok(default),
    }
}
