use serde::{Deserialize, Serialize};

use crate::media::{ResizeAggregate, DEFAULT_RETINA_SCALE};

// ============================================================================
// Media Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaConfig {
    /// Aggregate used when computing resize dimensions.
    #[serde(default)]
    pub resize_aggregate: ResizeAggregate,
    /// Pixel density multiplier applied to resize requests.
    #[serde(default = "default_retina_scale")]
    pub retina_scale: u32,
    /// Warn when an element lacks usable size constraints.
    #[serde(default = "default_true")]
    pub warn_on_missing_constraints: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            resize_aggregate: ResizeAggregate::default(),
            retina_scale: default_retina_scale(),
            warn_on_missing_constraints: true,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Silent,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    /// Directive value understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LoggingLevel::Silent => "off",
            LoggingLevel::Error => "error",
            LoggingLevel::Warn => "warn",
            LoggingLevel::Info => "info",
            LoggingLevel::Debug => "debug",
            LoggingLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LoggingLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" | "off" => Ok(Self::Silent),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!("invalid logging level: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LoggingLevel,
}

fn default_true() -> bool {
    true
}

fn default_retina_scale() -> u32 {
    DEFAULT_RETINA_SCALE
}
