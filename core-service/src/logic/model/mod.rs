//! Model Module - Inference Engine
//!
//! Scaling, classification and label decoding over pre-trained artifacts.
//! Each stage sits behind a trait; `InferenceEngine` bundles them.

pub mod artifacts;
pub mod scaler;
pub mod classifier;
pub mod labels;
pub mod inference;

// Re-export common types
pub use artifacts::{ArtifactError, ArtifactManifest};
pub use scaler::{FeatureScaler, ScaledVector, StandardScaler};
pub use classifier::{Classifier, LinearClassifier};
pub use labels::{LabelDecoder, LabelMap};
pub use inference::{InferenceEngine, ModelInfo, PredictionResult};
