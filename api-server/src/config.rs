//! Configuration module

use std::env;

use cardio_core::constants;
use cardio_core::AdvisoryConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding scaler, classifier and label artifacts
    pub artifact_dir: String,

    /// Environment (development, production)
    pub environment: String,

    /// Advisory service settings (key is redacted in Debug)
    pub advisory: AdvisoryConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            artifact_dir: constants::get_artifact_dir(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            advisory: AdvisoryConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_production() {
        let mut config = Config {
            port: 5000,
            artifact_dir: "artifacts".into(),
            environment: "development".into(),
            advisory: AdvisoryConfig::default(),
        };
        assert!(!config.is_production());

        config.environment = "production".into();
        assert!(config.is_production());
    }

    #[test]
    fn test_debug_never_prints_key() {
        let config = Config {
            port: 5000,
            artifact_dir: "artifacts".into(),
            environment: "development".into(),
            advisory: AdvisoryConfig {
                api_key: Some("not-for-logs".into()),
                ..Default::default()
            },
        };
        assert!(!format!("{:?}", config).contains("not-for-logs"));
    }
}
