//! Layered CLI configuration.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. `sift.toml` in the working directory, or the file given by `--config`
//! 3. `SIFT_*` environment variables (`SIFT_PRETTY=true`, `SIFT_LOG_FORMAT=json`, ...)
//! 4. command line flags

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "sift.toml";

/// Prefix of the environment variables read into [`Config`].
pub const ENV_PREFIX: &str = "SIFT_";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Multi-line human readable output.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Effective CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log filter, used when neither `SIFT_LOG` nor `RUST_LOG` is set.
    pub log_level: String,
    pub log_format: LogFormat,
    /// Treat keys no input claims as a validation failure.
    pub reject_unknown: bool,
    /// Pretty-print the JSON report.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
            reject_unknown: false,
            pretty: false,
        }
    }
}

/// Values given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_unknown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl Config {
    /// Loads the configuration from every layer.
    ///
    /// An explicit `config_file` must exist; the implicit `sift.toml` is
    /// optional.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        Self::figment(config_file, overrides)?
            .extract()
            .context("invalid configuration")
    }

    fn figment(config_file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Figment> {
        let file = match config_file {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file `{}` not found", path.display());
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
            .merge(Serialized::defaults(overrides)))
    }
}
