//! Advisory Types

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::parser::{ParseError, ParsedAdvisory};

// ============================================================================
// ADVISORY RESULT
// ============================================================================

/// Where an advisory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySource {
    /// Parsed from the text-generation service
    Generated,
    /// Deterministic substitute
    Fallback,
}

/// Structured clinical explanation attached to a prediction.
///
/// Only built by the parser or by the fallback, so `risk_score` is always
/// in 1..=10 and `review` / `tips` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResult {
    risk_score: u8,
    review: String,
    tips: Vec<String>,
    source: AdvisorySource,
}

impl AdvisoryResult {
    pub(crate) fn generated(parsed: ParsedAdvisory) -> Self {
        Self {
            risk_score: parsed.risk_score,
            review: parsed.review,
            tips: parsed.tips,
            source: AdvisorySource::Generated,
        }
    }

    pub(crate) fn fallback(risk_score: u8, review: &str, tips: &[&str]) -> Self {
        Self {
            risk_score,
            review: review.to_string(),
            tips: tips.iter().map(|t| t.to_string()).collect(),
            source: AdvisorySource::Fallback,
        }
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn source(&self) -> AdvisorySource {
        self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == AdvisorySource::Fallback
    }

    /// Render in the line format the advisory service is asked to produce
    pub fn to_text(&self) -> String {
        format!(
            "SCORE: {}/10\nREVIEW: {}\nTIPS: {}",
            self.risk_score,
            self.review,
            self.tips.join(", ")
        )
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// External dependency failure. Always absorbed by the fallback policy.
#[derive(Debug, Error)]
pub enum AdvisoryServiceError {
    #[error("Advisory service not configured")]
    NotConfigured,

    #[error("Advisory service timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Advisory service returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Advisory service returned no text")]
    EmptyResponse,

    #[error("Failed to build advisory client: {0}")]
    Client(String),

    #[error("Unparseable advisory response: {0}")]
    Parse(#[from] ParseError),
}
