//! Inference Engine - Scaler + Classifier + Label Decoder
//!
//! Holds the three read-only artifacts behind their traits so the model
//! family can be swapped without touching the pipeline. Built once at
//! startup, then shared across requests through `Arc`.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::artifacts::{
    read_artifact, ArtifactError, ArtifactManifest, CLASSIFIER_FILE, LABEL_MAP_FILE, SCALER_FILE,
};
use super::classifier::{Classifier, LinearClassifier, LinearModelParams};
use super::labels::{LabelDecoder, LabelMap, LabelParams};
use super::scaler::{FeatureScaler, ScalerParams, StandardScaler};
use crate::logic::features::{LayoutInfo, FEATURE_COUNT};

/// Label that denotes disease presence
pub const PRESENCE_LABEL: &str = "Presence";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    pub class_index: usize,
}

impl PredictionResult {
    pub fn new(label: impl Into<String>, class_index: usize) -> Self {
        Self {
            label: label.into(),
            class_index,
        }
    }

    /// True when the label denotes disease presence
    pub fn is_presence(&self) -> bool {
        is_presence_label(&self.label)
    }
}

pub fn is_presence_label(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(PRESENCE_LABEL)
}

/// Model description for the info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub layout: LayoutInfo,
    pub labels: Vec<String>,
    pub manifest: Option<ArtifactManifest>,
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Clone)]
pub struct InferenceEngine {
    scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn Classifier>,
    labels: Arc<dyn LabelDecoder>,
    manifest: Option<ArtifactManifest>,
}

impl InferenceEngine {
    /// Assemble an engine from already-built components
    pub fn new(
        scaler: impl FeatureScaler + 'static,
        classifier: impl Classifier + 'static,
        labels: impl LabelDecoder + 'static,
    ) -> Self {
        Self {
            scaler: Arc::new(scaler),
            classifier: Arc::new(classifier),
            labels: Arc::new(labels),
            manifest: None,
        }
    }

    /// Load all three artifacts from `dir` and cross-check them.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let mut manifest = ArtifactManifest::new(dir);

        let scaler_params: ScalerParams = read_artifact(dir, SCALER_FILE, &mut manifest)?;
        let model_params: LinearModelParams = read_artifact(dir, CLASSIFIER_FILE, &mut manifest)?;
        let label_params: LabelParams = read_artifact(dir, LABEL_MAP_FILE, &mut manifest)?;

        let scaler = StandardScaler::from_params(scaler_params)?;
        let classifier = LinearClassifier::from_params(model_params)?;
        let labels = LabelMap::from_params(label_params)?;

        if scaler.dimension() != FEATURE_COUNT {
            return Err(ArtifactError::DimensionMismatch {
                artifact: "scaler",
                expected: FEATURE_COUNT,
                actual: scaler.dimension(),
            });
        }

        if classifier.n_features() != FEATURE_COUNT {
            return Err(ArtifactError::DimensionMismatch {
                artifact: "classifier",
                expected: FEATURE_COUNT,
                actual: classifier.n_features(),
            });
        }

        // Version skew between model and label encoder
        for &class in classifier.classes() {
            labels.decode(class)?;
        }

        log::info!(
            "Artifacts loaded from {} ({} features, labels: {:?})",
            manifest.directory,
            FEATURE_COUNT,
            labels.labels()
        );

        let mut engine = Self::new(scaler, classifier, labels);
        engine.manifest = Some(manifest);
        Ok(engine)
    }

    pub fn scaler(&self) -> &dyn FeatureScaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn labels(&self) -> &dyn LabelDecoder {
        self.labels.as_ref()
    }

    pub fn manifest(&self) -> Option<&ArtifactManifest> {
        self.manifest.as_ref()
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            layout: LayoutInfo::current(),
            labels: self.labels.labels().to_vec(),
            manifest: self.manifest.clone(),
        }
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("labels", &self.labels.labels())
            .field("manifest", &self.manifest)
            .finish()
    }
}
