use super::{Config, MAX_RETINA_SCALE, MIN_RETINA_SCALE};
use anyhow::Result;
use tracing::warn;

/// Validation errors for configuration.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a configuration object.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    let scale = config.media.retina_scale;
    if !(MIN_RETINA_SCALE..=MAX_RETINA_SCALE).contains(&scale) {
        errors.push(ConfigValidationError {
            path: "media.retinaScale".to_string(),
            message: format!(
                "Retina scale must be between {MIN_RETINA_SCALE} and {MAX_RETINA_SCALE}, got {scale}"
            ),
        });
    }

    if !config.media.warn_on_missing_constraints {
        warn!("Missing size constraint warnings are disabled");
    }

    errors
}

/// Validate configuration and return Result.
pub fn validate_config_object(config: &Config) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Configuration validation failed:\n{}", messages.join("\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_empty());
        assert!(validate_config_object(&Config::default()).is_ok());
    }

    #[test]
    fn zero_retina_scale_rejected() {
        let mut config = Config::default();
        config.media.retina_scale = 0;
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "media.retinaScale");
    }

    #[test]
    fn oversized_retina_scale_rejected() {
        let mut config = Config::default();
        config.media.retina_scale = 9;
        let err = validate_config_object(&config).unwrap_err();
        assert!(err.to_string().contains("media.retinaScale"));
    }
}
