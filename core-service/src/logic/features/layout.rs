//! Patient Attribute Layout
//!
//! The scaler and classifier were fitted on the 13 attributes below, in this
//! order. Request payloads are keyed by the exact names.
//!
//! Reordering, renaming, adding or dropping an attribute bumps
//! `FEATURE_VERSION`; the CRC of version + names goes out with every vector
//! and on `/api/v1/model`, so a stale artifact set shows up in the logs.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const FEATURE_VERSION: u8 = 1;

pub const FEATURE_LAYOUT: &[&str] = &[
    // === Demographics (0-1) ===
    "Age",                      // 0: Years
    "Sex",                      // 1: 1 = male, 0 = female

    // === Presentation (2-5) ===
    "Chest pain type",          // 2: 1-4
    "BP",                       // 3: Resting blood pressure (mmHg)
    "Cholesterol",              // 4: Serum cholesterol (mg/dL)
    "FBS over 120",             // 5: Fasting blood sugar > 120 mg/dL (0/1)

    // === Exercise test (6-10) ===
    "EKG results",              // 6: Resting ECG result (0-2)
    "Max HR",                   // 7: Maximum heart rate achieved (bpm)
    "Exercise angina",          // 8: Exercise induced angina (0/1)
    "ST depression",            // 9: ST depression induced by exercise
    "Slope of ST",              // 10: Slope of peak exercise ST segment

    // === Imaging (11-12) ===
    "Number of vessels fluro",  // 11: Major vessels coloured by fluoroscopy (0-3)
    "Thallium",                 // 12: Thallium stress test result
];

/// Must equal `FEATURE_LAYOUT.len()`
pub const FEATURE_COUNT: usize = 13;

// Positions quoted in the advisory prompt
pub const AGE: usize = 0;
pub const BP: usize = 3;
pub const CHOLESTEROL: usize = 4;
pub const MAX_HR: usize = 7;

static LAYOUT_HASH: Lazy<u32> = Lazy::new(|| {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
});

/// CRC32 over the version byte and NUL-separated attribute names
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Layout description served by the model-info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// True when an artifact's `feature_names` list is the canonical layout
pub fn matches_layout<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_LAYOUT).all(|(a, b)| a.as_ref() == *b)
}

/// Exact, case-sensitive lookup
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}
