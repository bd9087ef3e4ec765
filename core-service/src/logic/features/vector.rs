//! Feature Vector - Core data structure for model input
//!
//! **Validated, versioned feature vector**
//!
//! A `FeatureVector` can only be built from a request payload through
//! [`FeatureVector::from_payload`], which checks every attribute of the
//! layout before anything downstream runs.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::layout::{layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Client input error. Always names the offending attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' must be numeric")]
    NonNumeric { field: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } | Self::NonNumeric { field } => field,
        }
    }
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Attribute values in order defined by FEATURE_LAYOUT
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Validate a raw payload and build the vector in canonical order.
    ///
    /// Attributes are checked in layout order; the first absent or
    /// non-convertible one is reported.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut values = [0.0f64; FEATURE_COUNT];

        for (slot, &name) in values.iter_mut().zip(FEATURE_LAYOUT) {
            let raw = payload.get(name).ok_or_else(|| ValidationError::MissingField {
                field: name.to_string(),
            })?;

            *slot = to_number(raw).ok_or_else(|| ValidationError::NonNumeric {
                field: name.to_string(),
            })?;
        }

        Ok(Self::from_values(values))
    }

    /// Create from already-typed values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Layout identity only, no patient values
    pub fn log_summary(&self) -> String {
        format!("v{} layout {:08x}", self.version, self.layout_hash)
    }

    /// Full record including values. Trace level only.
    pub fn to_log_entry(&self) -> Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Convert one raw payload value to a finite real number.
///
/// Numbers pass through, strings are parsed after trimming, booleans map
/// to 1/0. Everything else (null, arrays, objects) is rejected.
fn to_number(raw: &Value) -> Option<f64> {
    let number = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => {
            if *b { 1.0 } else { 0.0 }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    number.is_finite().then_some(number)
}

// ============================================================================
// TESTS
// ============================================================================
