//! Advisory Generator
//!
//! prompt → external service (bounded by a timeout) → parse → result.
//! Any failure along the way ends in the fallback; `advise` cannot fail.

use std::sync::Arc;
use std::time::Duration;

use super::client::{GeminiClient, TextGenerator};
use super::fallback::fallback_advisory;
use super::parser::parse_advisory;
use super::prompts::build_advisory_prompt;
use super::types::{AdvisoryResult, AdvisoryServiceError};
use crate::logic::config::AdvisoryConfig;
use crate::logic::features::FeatureVector;
use crate::logic::model::PredictionResult;

#[derive(Clone)]
pub struct AdvisoryGenerator {
    backend: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl AdvisoryGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            timeout,
        }
    }

    /// Generator that always answers with the fallback
    pub fn disabled() -> Self {
        Self {
            backend: None,
            timeout: Duration::ZERO,
        }
    }

    /// Gemini-backed generator, or a disabled one when no key is configured
    pub fn from_config(config: &AdvisoryConfig) -> Result<Self, AdvisoryServiceError> {
        if !config.has_credentials() {
            log::warn!("GEMINI_API_KEY not set - advisories will use the fallback response");
            return Ok(Self::disabled());
        }

        let client = GeminiClient::new(config)?;
        log::info!(
            "Advisory client ready (model: {}, timeout: {}s)",
            config.model,
            config.timeout_seconds
        );
        Ok(Self::new(Arc::new(client), config.timeout()))
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Produce an advisory for one prediction. Never fails.
    pub async fn advise(&self, features: &FeatureVector, prediction: &PredictionResult) -> AdvisoryResult {
        match self.try_generate(features, prediction).await {
            Ok(advisory) => advisory,
            Err(AdvisoryServiceError::NotConfigured) => fallback_advisory(&prediction.label),
            Err(e) => {
                log::warn!("Advisory fallback for '{}': {}", prediction.label, e);
                fallback_advisory(&prediction.label)
            }
        }
    }

    async fn try_generate(
        &self,
        features: &FeatureVector,
        prediction: &PredictionResult,
    ) -> Result<AdvisoryResult, AdvisoryServiceError> {
        let backend = self.backend.as_ref().ok_or(AdvisoryServiceError::NotConfigured)?;
        let prompt = build_advisory_prompt(features, prediction);

        // Single attempt, no retries
        let text = tokio::time::timeout(self.timeout, backend.generate(&prompt))
            .await
            .map_err(|_| AdvisoryServiceError::Timeout(self.timeout))??;

        let parsed = parse_advisory(&text)?;

        let expected = if prediction.is_presence() { 8..=10 } else { 1..=3 };
        if !expected.contains(&parsed.risk_score) {
            log::debug!(
                "Advisory score {} is outside the suggested band for '{}'",
                parsed.risk_score,
                prediction.label
            );
        }

        Ok(AdvisoryResult::generated(parsed))
    }
}

impl std::fmt::Debug for AdvisoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryGenerator")
            .field("enabled", &self.is_enabled())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logic::advisory::fallback::{FALLBACK_REVIEW, FALLBACK_TIPS};
    use crate::logic::advisory::AdvisorySource;
    use crate::logic::features::FEATURE_COUNT;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed response and counts calls
    pub struct StaticGenerator {
        pub text: String,
        pub calls: AtomicUsize,
    }

    impl StaticGenerator {
        pub fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    /// Always fails like an unreachable service
    pub struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryServiceError> {
            Err(AdvisoryServiceError::Http {
                status: 429,
                body: "RESOURCE_EXHAUSTED".into(),
            })
        }
    }

    /// Never answers within any reasonable timeout
    pub struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryServiceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("SCORE: 9/10\nREVIEW: late\nTIPS: late".into())
        }
    }

    fn features() -> FeatureVector {
        FeatureVector::from_values([1.0; FEATURE_COUNT])
    }

    fn assert_fallback(advisory: &AdvisoryResult, score: u8) {
        assert_eq!(advisory.source(), AdvisorySource::Fallback);
        assert_eq!(advisory.risk_score(), score);
        assert_eq!(advisory.review(), FALLBACK_REVIEW);
        assert_eq!(advisory.tips(), FALLBACK_TIPS);
    }

    #[tokio::test]
    async fn test_generated_advisory_is_parsed() {
        let backend = Arc::new(StaticGenerator::new(
            "SCORE: 8/10\nREVIEW: Age and BP raise risk.\nTIPS: [Cardiology referral, Echo, DASH diet]",
        ));
        let generator = AdvisoryGenerator::new(backend.clone(), Duration::from_secs(5));

        let advisory = generator
            .advise(&features(), &PredictionResult::new("Presence", 1))
            .await;

        assert_eq!(advisory.source(), AdvisorySource::Generated);
        assert_eq!(advisory.risk_score(), 8);
        assert_eq!(advisory.tips().len(), 3);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let generator = AdvisoryGenerator::new(Arc::new(FailingGenerator), Duration::from_secs(5));

        let presence = generator.advise(&features(), &PredictionResult::new("Presence", 1)).await;
        let absence = generator.advise(&features(), &PredictionResult::new("Absence", 0)).await;

        assert_fallback(&presence, 9);
        assert_fallback(&absence, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let generator = AdvisoryGenerator::new(Arc::new(SlowGenerator), Duration::from_secs(2));

        let advisory = generator.advise(&features(), &PredictionResult::new("Presence", 1)).await;
        assert_fallback(&advisory, 9);
    }

    #[tokio::test]
    async fn test_unparseable_response_falls_back() {
        let generator = AdvisoryGenerator::new(
            Arc::new(StaticGenerator::new("The patient should see a doctor.")),
            Duration::from_secs(5),
        );

        let advisory = generator.advise(&features(), &PredictionResult::new("Absence", 0)).await;
        assert_fallback(&advisory, 2);
    }

    #[tokio::test]
    async fn test_off_band_score_is_kept() {
        let generator = AdvisoryGenerator::new(
            Arc::new(StaticGenerator::new("SCORE: 2/10\nREVIEW: Mild.\nTIPS: Rest")),
            Duration::from_secs(5),
        );

        let advisory = generator.advise(&features(), &PredictionResult::new("Presence", 1)).await;
        assert_eq!(advisory.source(), AdvisorySource::Generated);
        assert_eq!(advisory.risk_score(), 2);
    }

    #[tokio::test]
    async fn test_disabled_generator_uses_fallback() {
        let generator = AdvisoryGenerator::from_config(&AdvisoryConfig::default()).unwrap();
        assert!(!generator.is_enabled());

        let advisory = generator.advise(&features(), &PredictionResult::new("Presence", 1)).await;
        assert_fallback(&advisory, 9);
    }
}
