//! Cardiac Risk Core
//!
//! Inference and advisory engine behind the HTTP service: validate a
//! patient record, classify it with the pre-trained artifacts, then attach
//! a clinical advisory (generated or fallback).

pub mod constants;
pub mod logic;

pub use logic::advisory::{AdvisoryGenerator, AdvisoryResult, AdvisorySource};
pub use logic::config::AdvisoryConfig;
pub use logic::features::{FeatureVector, ValidationError, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::model::{ArtifactError, InferenceEngine, ModelInfo, PredictionResult};
pub use logic::pipeline::{FailureKind, Pipeline, PipelineError, PipelineOutput, PipelineStage};
