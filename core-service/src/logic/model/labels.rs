//! Label Decoder - class index → category label

use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactError;

/// Trait for index → label decoding
pub trait LabelDecoder: Send + Sync {
    fn decode(&self, index: usize) -> Result<&str, ArtifactError>;

    /// Every label in index order
    fn labels(&self) -> &[String];
}

/// Persisted form of the label encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelParams {
    pub classes: Vec<String>,
}

/// Ordered label list; the position of a label is its class index
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn from_params(params: LabelParams) -> Result<Self, ArtifactError> {
        if params.classes.is_empty() {
            return Err(ArtifactError::invalid("label map", "no classes"));
        }

        if let Some(i) = params.classes.iter().position(|l| l.trim().is_empty()) {
            return Err(ArtifactError::invalid("label map", format!("class {} is blank", i)));
        }

        for (i, label) in params.classes.iter().enumerate() {
            if params.classes[..i].contains(label) {
                return Err(ArtifactError::invalid(
                    "label map",
                    format!("duplicate label '{}'", label),
                ));
            }
        }

        Ok(Self { labels: params.classes })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LabelDecoder for LabelMap {
    fn decode(&self, index: usize) -> Result<&str, ArtifactError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(ArtifactError::UnknownIndex {
                index,
                known: self.labels.len(),
            })
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
