//! Artifact Loading - Pre-trained parameter files
//!
//! Scaler, classifier and label map are persisted as JSON next to the
//! service. They are read once at startup; any problem here is fatal for
//! the process, never for a single request.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

// ============================================================================
// FILE LOCATIONS
// ============================================================================

/// Standardisation parameters (mean/scale per attribute)
pub const SCALER_FILE: &str = "scaler.json";

/// Linear decision function (coefficients/intercept/classes)
pub const CLASSIFIER_FILE: &str = "heart_disease_model.json";

/// Class index → label strings
pub const LABEL_MAP_FILE: &str = "label_encoder.json";

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Corrupted or mismatched model state. Operator-fatal.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{artifact} dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        artifact: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Class index {index} is outside the trained label space ({known} labels)")]
    UnknownIndex { index: usize, known: usize },

    #[error("Invalid {artifact} artifact: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactError {
    pub fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            artifact,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// MANIFEST
// ============================================================================

/// Fingerprint of one loaded artifact file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFingerprint {
    pub name: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// What was loaded, from where, and when
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub directory: String,
    pub loaded_at: DateTime<Utc>,
    pub files: Vec<ArtifactFingerprint>,
}

impl ArtifactManifest {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.display().to_string(),
            loaded_at: Utc::now(),
            files: Vec::new(),
        }
    }
}

// ============================================================================
// READING
// ============================================================================

/// Read and deserialize one artifact, recording its fingerprint.
pub fn read_artifact<T: DeserializeOwned>(
    dir: &Path,
    file_name: &str,
    manifest: &mut ArtifactManifest,
) -> Result<T, ArtifactError> {
    let path = dir.join(file_name);
    log::info!("Loading artifact from: {}", path.display());

    let bytes = std::fs::read(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;

    let parsed = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.clone(),
        source,
    })?;

    let fingerprint = ArtifactFingerprint {
        name: file_name.to_string(),
        sha256: hex::encode(Sha256::digest(&bytes)),
        size_bytes: bytes.len(),
    };
    log::debug!("{} sha256={}", fingerprint.name, fingerprint.sha256);
    manifest.files.push(fingerprint);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: u32,
    }

    #[test]
    fn test_read_artifact_records_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("probe.json"), br#"{"value": 7}"#).unwrap();

        let mut manifest = ArtifactManifest::new(dir.path());
        let probe: Probe = read_artifact(dir.path(), "probe.json", &mut manifest).unwrap();

        assert_eq!(probe.value, 7);
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files[0].name, "probe.json");
        assert_eq!(manifest.files[0].sha256.len(), 64);
        assert_eq!(manifest.files[0].size_bytes, 12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = ArtifactManifest::new(dir.path());

        let err = read_artifact::<Probe>(dir.path(), "absent.json", &mut manifest).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("probe.json"), b"{not json").unwrap();
        let mut manifest = ArtifactManifest::new(dir.path());

        let err = read_artifact::<Probe>(dir.path(), "probe.json", &mut manifest).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
        assert!(err.to_string().contains("probe.json"));
    }
}
