/// Default configuration constants.

/// Default config file stem looked up in the working directory.
pub const DEFAULT_CONFIG_STEM: &str = "attachment-sizing";

/// Directory under the home directory holding the user config.
pub const DEFAULT_HOME_DIR: &str = ".attachment-sizing";

/// Smallest accepted pixel density multiplier.
pub const MIN_RETINA_SCALE: u32 = 1;

/// Largest accepted pixel density multiplier.
pub const MAX_RETINA_SCALE: u32 = 4;

/// Environment variable overriding `media.retinaScale`.
pub const ENV_RETINA_SCALE: &str = "ATTACHMENT_SIZING_RETINA_SCALE";

/// Environment variable overriding `media.resizeAggregate`.
pub const ENV_AGGREGATE: &str = "ATTACHMENT_SIZING_AGGREGATE";

/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "ATTACHMENT_SIZING_LOG_LEVEL";
