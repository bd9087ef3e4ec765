//! Feature Scaler - Fitted standardisation transform
//!
//! Maps a raw `FeatureVector` into the space the classifier was trained in.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactError;
use crate::logic::features::{layout, FeatureVector, FEATURE_COUNT};

// ============================================================================
// SCALED VECTOR
// ============================================================================

/// Feature vector after scaling. Same order and cardinality as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledVector(Array1<f64>);

impl ScaledVector {
    pub fn new(values: Array1<f64>) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for ScaledVector {
    fn from(values: Vec<f64>) -> Self {
        Self(Array1::from(values))
    }
}

// ============================================================================
// SCALER TRAIT
// ============================================================================

/// Trait for fitted input transforms (standard, min-max, ...)
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, vector: &FeatureVector) -> Result<ScaledVector, ArtifactError>;
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// Persisted form of the scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    /// Attribute names the scaler was fitted with, if the exporter kept them
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

/// `(x - mean) / scale`, per attribute
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn from_params(params: ScalerParams) -> Result<Self, ArtifactError> {
        if params.mean.len() != params.scale.len() {
            return Err(ArtifactError::invalid(
                "scaler",
                format!("mean has {} values but scale has {}", params.mean.len(), params.scale.len()),
            ));
        }

        if let Some(i) = params.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(ArtifactError::invalid(
                "scaler",
                format!("scale[{}] must be finite and non-zero", i),
            ));
        }

        if let Some(i) = params.mean.iter().position(|m| !m.is_finite()) {
            return Err(ArtifactError::invalid("scaler", format!("mean[{}] is not finite", i)));
        }

        if let Some(names) = &params.feature_names {
            if !layout::matches_layout(names) {
                return Err(ArtifactError::invalid(
                    "scaler",
                    format!("feature_names {:?} do not match the service layout", names),
                ));
            }
        }

        Ok(Self {
            mean: Array1::from(params.mean),
            scale: Array1::from(params.scale),
        })
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, vector: &FeatureVector) -> Result<ScaledVector, ArtifactError> {
        if self.dimension() != FEATURE_COUNT {
            return Err(ArtifactError::DimensionMismatch {
                artifact: "scaler",
                expected: FEATURE_COUNT,
                actual: self.dimension(),
            });
        }

        let raw = Array1::from(vector.as_slice().to_vec());
        Ok(ScaledVector((&raw - &self.mean) / &self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mean: f64, scale: f64, n: usize) -> ScalerParams {
        ScalerParams {
            mean: vec![mean; n],
            scale: vec![scale; n],
            feature_names: None,
        }
    }

    #[test]
    fn test_transform_standardises() {
        let mut p = params(0.0, 1.0, FEATURE_COUNT);
        p.mean[0] = 50.0;
        p.scale[0] = 10.0;
        let scaler = StandardScaler::from_params(p).unwrap();

        let mut values = [1.0; FEATURE_COUNT];
        values[0] = 63.0;
        let scaled = scaler.transform(&FeatureVector::from_values(values)).unwrap();

        assert_eq!(scaled.len(), FEATURE_COUNT);
        assert!((scaled.as_array()[0] - 1.3).abs() < 1e-12);
        assert_eq!(scaled.as_array()[1], 1.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let scaler = StandardScaler::from_params(params(2.0, 4.0, FEATURE_COUNT)).unwrap();
        let vector = FeatureVector::from_values([6.0; FEATURE_COUNT]);

        let a = scaler.transform(&vector).unwrap();
        let b = scaler.transform(&vector).unwrap();
        assert_eq!(a, b);
        assert!(a.as_array().iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::from_params(params(0.0, 1.0, 12)).unwrap();
        let err = scaler
            .transform(&FeatureVector::from_values([0.0; FEATURE_COUNT]))
            .unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::DimensionMismatch { expected: 13, actual: 12, .. }
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut p = params(0.0, 1.0, FEATURE_COUNT);
        p.scale[4] = 0.0;
        assert!(StandardScaler::from_params(p).is_err());
    }

    #[test]
    fn test_length_disagreement_rejected() {
        let mut p = params(0.0, 1.0, FEATURE_COUNT);
        p.scale.pop();
        assert!(StandardScaler::from_params(p).is_err());
    }

    #[test]
    fn test_feature_names_checked() {
        let mut p = params(0.0, 1.0, FEATURE_COUNT);
        p.feature_names = Some(layout::FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect());
        assert!(StandardScaler::from_params(p.clone()).is_ok());

        if let Some(names) = p.feature_names.as_mut() {
            names.swap(3, 4);
        }
        assert!(StandardScaler::from_params(p).is_err());
    }
}
