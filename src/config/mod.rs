mod defaults;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use io::*;
pub use types::*;
pub use validation::*;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::media::{resolve_options, SizingOptions};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(PathBuf::from).or_else(find_config_file);

        let mut config = match config_path {
            Some(config_path) if config_path.exists() => {
                info!("Loading config from {}", config_path.display());
                load_config_file(&config_path)?
            }
            Some(config_path) => {
                anyhow::bail!("Config file '{}' does not exist", config_path.display());
            }
            None => {
                info!("No config file found, using defaults");
                Config::default()
            }
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Write default configuration to a file.
    pub fn write_default(path: &str) -> Result<()> {
        let value = serde_json::to_value(Config::default())?;
        write_config_file(Path::new(path), &value)
    }

    /// Sizing options derived from the media section.
    pub fn sizing_options(&self) -> SizingOptions {
        resolve_options(Some(&self.media))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Values that do not parse are logged, left unapplied and returned.
    pub fn apply_env_overrides(&mut self) -> Vec<RejectedOverride> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Vec<RejectedOverride> {
        let mut rejected = Vec::new();

        if let Some(scale) = lookup(ENV_RETINA_SCALE) {
            match scale.trim().parse() {
                Ok(scale) => self.media.retina_scale = scale,
                Err(e) => rejected.push(RejectedOverride::new(ENV_RETINA_SCALE, &scale, e)),
            }
        }

        if let Some(aggregate) = lookup(ENV_AGGREGATE) {
            match aggregate.parse() {
                Ok(aggregate) => self.media.resize_aggregate = aggregate,
                Err(e) => rejected.push(RejectedOverride::new(ENV_AGGREGATE, &aggregate, e)),
            }
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            match level.parse() {
                Ok(level) => self.logging.level = level,
                Err(e) => rejected.push(RejectedOverride::new(ENV_LOG_LEVEL, &level, e)),
            }
        }

        for override_ in &rejected {
            warn!("Ignoring {override_}");
        }

        rejected
    }
}

/// An environment override whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}

impl RejectedOverride {
    fn new(variable: &'static str, value: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            variable,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for RejectedOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}: {}", self.variable, self.value, self.reason)
    }
}

/// Find the configuration file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for ext in ["json", "yaml", "yml", "toml"] {
        let path = PathBuf::from(format!("{DEFAULT_CONFIG_STEM}.{ext}"));
        if path.exists() {
            return Some(path);
        }
    }

    // Check home directory
    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(DEFAULT_HOME_DIR).join("config.json");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

/// Load configuration from a file path.
fn load_config_file(path: &Path) -> Result<Config> {
    let value = read_config_with_includes(path, 0)?;
    let config = serde_json::from_value(value)
        .with_context(|| format!("Invalid configuration in '{}'", path.display()))?;
    Ok(config)
}
