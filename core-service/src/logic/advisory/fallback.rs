//! Fallback Advisory
//!
//! Last line of defense when the advisory service is unavailable or its
//! answer cannot be parsed. Total over every label; never fails.

use super::types::AdvisoryResult;
use crate::logic::model::inference::is_presence_label;

pub const FALLBACK_SCORE_PRESENCE: u8 = 9;
pub const FALLBACK_SCORE_ABSENCE: u8 = 2;

pub const FALLBACK_REVIEW: &str = "Deep analysis currently unavailable.";

pub const FALLBACK_TIPS: [&str; 5] = [
    "Consult a specialist immediately",
    "Conduct an EKG/ECG",
    "Monitor sodium intake",
    "Regular cardio exercise",
    "Avoid tobacco",
];

/// Deterministic advisory for a predicted label
pub fn fallback_advisory(label: &str) -> AdvisoryResult {
    let score = if is_presence_label(label) {
        FALLBACK_SCORE_PRESENCE
    } else {
        FALLBACK_SCORE_ABSENCE
    };

    AdvisoryResult::fallback(score, FALLBACK_REVIEW, &FALLBACK_TIPS)
}
