//! Advisory Configuration
//!
//! Built once at startup and passed explicitly to the advisory generator.

use std::time::Duration;

use crate::constants;

/// Settings for the external text-generation service
#[derive(Clone)]
pub struct AdvisoryConfig {
    /// `None` ⇒ every advisory uses the fallback
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub timeout_seconds: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: constants::DEFAULT_GEMINI_MODEL.to_string(),
            api_url: constants::DEFAULT_GEMINI_API_URL.to_string(),
            timeout_seconds: constants::DEFAULT_ADVISORY_TIMEOUT_SECS,
        }
    }
}

impl AdvisoryConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: constants::get_gemini_api_key(),
            model: constants::get_gemini_model(),
            api_url: constants::get_gemini_api_url(),
            timeout_seconds: constants::get_advisory_timeout(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

// Never print the key
impl std::fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
