//! Classifier - Pre-trained linear decision function
//!
//! Logistic-regression style: `decision = W·x + b`. Binary models carry a
//! single coefficient row, multiclass models one row per class.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactError;
use super::scaler::ScaledVector;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for classifiers (linear, tree ensembles, ONNX, ...)
///
/// Must be deterministic: the same input always yields the same index.
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &ScaledVector) -> Result<usize, ArtifactError>;
}

// ============================================================================
// LINEAR CLASSIFIER
// ============================================================================

/// Persisted form of the linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelParams {
    /// One row (binary) or one row per class (multiclass)
    pub coefficients: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    /// Encoded class index for each decision outcome
    pub classes: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coefficients: Array2<f64>,
    intercept: Array1<f64>,
    classes: Vec<usize>,
}

impl LinearClassifier {
    pub fn from_params(params: LinearModelParams) -> Result<Self, ArtifactError> {
        let rows = params.coefficients.len();
        if rows == 0 {
            return Err(ArtifactError::invalid("classifier", "no coefficient rows"));
        }

        let cols = params.coefficients[0].len();
        if params.coefficients.iter().any(|row| row.len() != cols) {
            return Err(ArtifactError::invalid("classifier", "ragged coefficient matrix"));
        }

        if params.intercept.len() != rows {
            return Err(ArtifactError::invalid(
                "classifier",
                format!("{} coefficient rows but {} intercepts", rows, params.intercept.len()),
            ));
        }

        let expected_classes = if rows == 1 { 2 } else { rows };
        if rows == 2 || params.classes.len() != expected_classes {
            return Err(ArtifactError::invalid(
                "classifier",
                format!(
                    "{} coefficient rows cannot decide between {} classes",
                    rows,
                    params.classes.len()
                ),
            ));
        }

        let flat: Vec<f64> = params.coefficients.into_iter().flatten().collect();
        if flat.iter().chain(params.intercept.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::invalid("classifier", "non-finite parameter"));
        }

        let coefficients = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| ArtifactError::invalid("classifier", e.to_string()))?;

        Ok(Self {
            coefficients,
            intercept: Array1::from(params.intercept),
            classes: params.classes,
        })
    }

    /// Number of input attributes the model expects
    pub fn n_features(&self) -> usize {
        self.coefficients.ncols()
    }

    /// Encoded class indices this model can emit
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Raw decision values, one per coefficient row
    pub fn decision_function(&self, input: &ScaledVector) -> Result<Array1<f64>, ArtifactError> {
        if input.len() != self.n_features() {
            return Err(ArtifactError::DimensionMismatch {
                artifact: "classifier",
                expected: self.n_features(),
                actual: input.len(),
            });
        }

        Ok(self.coefficients.dot(input.as_array()) + &self.intercept)
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, input: &ScaledVector) -> Result<usize, ArtifactError> {
        let decision = self.decision_function(input)?;

        let winner = if decision.len() == 1 {
            usize::from(decision[0] > 0.0)
        } else {
            // Strict comparison keeps the lowest row on ties
            let mut best = 0;
            for (i, value) in decision.iter().enumerate().skip(1) {
                if *value > decision[best] {
                    best = i;
                }
            }
            best
        };

        Ok(self.classes[winner])
    }
}
