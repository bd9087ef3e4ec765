//! Pipeline Orchestrator
//!
//! One request: `Validating → Scaling → Classifying → Decoding →
//! GeneratingAdvice → Done`. Validation and artifact errors stop the run;
//! advisory problems never do, the generator absorbs them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::advisory::{AdvisoryGenerator, AdvisoryResult};
use super::features::{FeatureVector, ValidationError};
use super::model::{ArtifactError, InferenceEngine, PredictionResult};


// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Validating,
    Scaling,
    Classifying,
    Decoding,
    GeneratingAdvice,
    Done,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "validating"),
            Self::Scaling => write!(f, "scaling"),
            Self::Classifying => write!(f, "classifying"),
            Self::Decoding => write!(f, "decoding"),
            Self::GeneratingAdvice => write!(f, "generating_advice"),
            Self::Done => write!(f, "done"),
        }
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum FailureKind {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Terminal `Failed` state: where the run stopped and why
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    pub kind: FailureKind,
}

impl PipelineError {
    fn validation(err: ValidationError) -> Self {
        Self {
            stage: PipelineStage::Validating,
            kind: FailureKind::Validation(err),
        }
    }

    fn artifact(stage: PipelineStage, err: ArtifactError) -> Self {
        Self {
            stage,
            kind: FailureKind::Artifact(err),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, FailureKind::Validation(_))
    }

    /// Short machine-readable kind for error envelopes
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FailureKind::Validation(_) => "validation",
            FailureKind::Artifact(_) => "artifact",
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// `Done`: a decoded prediction plus its advisory
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub prediction: PredictionResult,
    pub advisory: AdvisoryResult,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Shared, read-only request processor
#[derive(Debug, Clone)]
pub struct Pipeline {
    engine: InferenceEngine,
    advisor: AdvisoryGenerator,
}

impl Pipeline {
    pub fn new(engine: InferenceEngine, advisor: AdvisoryGenerator) -> Self {
        Self { engine, advisor }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn advisor(&self) -> &AdvisoryGenerator {
        &self.advisor
    }

    /// Run one request end to end
    pub async fn run(&self, payload: &Map<String, Value>) -> Result<PipelineOutput, PipelineError> {
        log::debug!("pipeline: {}", PipelineStage::Validating);
        let features = FeatureVector::from_payload(payload).map_err(PipelineError::validation)?;
        log::debug!("pipeline: validated ({})", features.log_summary());
        log::trace!("pipeline: record {}", features.to_log_entry());

        let prediction = self.classify(&features)?;

        log::debug!("pipeline: {} ({})", PipelineStage::GeneratingAdvice, prediction.label);
        let advisory = self.advisor.advise(&features, &prediction).await;

        log::debug!(
            "pipeline: {} (label={}, score={}, source={:?})",
            PipelineStage::Done,
            prediction.label,
            advisory.risk_score(),
            advisory.source()
        );

        Ok(PipelineOutput { prediction, advisory })
    }

    /// Scaling → Classifying → Decoding for an already validated vector
    pub fn classify(&self, features: &FeatureVector) -> Result<PredictionResult, PipelineError> {
        log::debug!("pipeline: {}", PipelineStage::Scaling);
        let scaled = self
            .engine
            .scaler()
            .transform(features)
            .map_err(|e| PipelineError::artifact(PipelineStage::Scaling, e))?;

        log::debug!("pipeline: {}", PipelineStage::Classifying);
        let class_index = self
            .engine
            .classifier()
            .predict(&scaled)
            .map_err(|e| PipelineError::artifact(PipelineStage::Classifying, e))?;

        log::debug!("pipeline: {} (index {})", PipelineStage::Decoding, class_index);
        let label = self
            .engine
            .labels()
            .decode(class_index)
            .map_err(|e| PipelineError::artifact(PipelineStage::Decoding, e))?;

        Ok(PredictionResult::new(label, class_index))
    }
}
