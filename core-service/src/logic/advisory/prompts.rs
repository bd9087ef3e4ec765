//! Advisory prompts for the text-generation service.
//!
//! The response format below is what `parser.rs` expects. Change both
//! together.

use crate::logic::features::layout::{AGE, BP, CHOLESTEROL, MAX_HR};
use crate::logic::features::FeatureVector;
use crate::logic::model::PredictionResult;

/// Persona line opening every prompt
pub const ROLE_FRAMING: &str = "Role: Senior Consultant Cardiologist.";

/// Mandatory response shape
pub const RESPONSE_FORMAT: &str = "SCORE: [Number]/10
REVIEW: [Deep Clinical Analysis]
TIPS: [Tip 1, Tip 2, Tip 3, Tip 4, Tip 5]";

/// Suggested score band for a label. A hint only; never enforced.
pub fn score_hint(prediction: &PredictionResult) -> &'static str {
    if prediction.is_presence() {
        "8-10"
    } else {
        "1-3"
    }
}

/// Build the advisory prompt for one patient and prediction.
pub fn build_advisory_prompt(features: &FeatureVector, prediction: &PredictionResult) -> String {
    let metric = |index: usize| {
        features
            .get(index)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    };
    let (age, bp, cholesterol, max_hr) = (metric(AGE), metric(BP), metric(CHOLESTEROL), metric(MAX_HR));
    let label = &prediction.label;

    format!(
        r#"{ROLE_FRAMING}
ML Prediction: The patient has been screened for heart disease with a result of '{label}'.

Patient Metrics:
- Age: {age}
- Blood Pressure: {bp} mmHg
- Cholesterol: {cholesterol} mg/dL
- Max Heart Rate: {max_hr} bpm

Task: Provide a highly detailed and professional medical review.
1. Determine a RISK SCORE (1-10). (Presence: 8-10, Absence: 1-3). For this '{label}' result, use the {hint} range.
2. Provide a 'REVIEW' which is a deep analysis. Explain how the combination of Age {age} and BP {bp} affects this patient's cardiovascular risk profile given the {label} result.
3. Provide 'TIPS' as a detailed action plan: clinical follow-up (e.g. further tests), dietary adjustments and physical activity guidelines.

YOU MUST RETURN THE RESPONSE IN THIS EXACT FORMAT, one line per section:
{RESPONSE_FORMAT}"#,
        hint = score_hint(prediction),
    )
}
