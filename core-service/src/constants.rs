//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Credentials never have a default here; they only come from the environment.

/// Default advisory model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST base URL
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default bound on one advisory call (seconds)
pub const DEFAULT_ADVISORY_TIMEOUT_SECS: u64 = 20;

/// Default artifact directory, relative to the working directory
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Cardiac Risk Service";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the advisory API key, if one is configured
pub fn get_gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Get advisory model name from environment or use default
pub fn get_gemini_model() -> String {
    std::env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}

/// Get advisory base URL from environment or use default
pub fn get_gemini_api_url() -> String {
    std::env::var("GEMINI_API_URL")
        .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string())
}

/// Get advisory timeout from environment or use default
pub fn get_advisory_timeout() -> u64 {
    std::env::var("ADVISORY_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_ADVISORY_TIMEOUT_SECS)
}

/// Get artifact directory from environment or use default
pub fn get_artifact_dir() -> String {
    std::env::var("ARTIFACT_DIR")
        .unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string())
}
