//! `/predict` response body

use serde::Serialize;

use cardio_core::{AdvisoryResult, PipelineOutput};

/// Success envelope
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Decoded label, e.g. "Presence"
    pub prediction: String,
    pub advisory: AdvisoryResult,
    /// Advisory in the SCORE / REVIEW / TIPS text form
    pub ai_data: String,
    pub status: &'static str,
}

impl From<PipelineOutput> for PredictionResponse {
    fn from(output: PipelineOutput) -> Self {
        let ai_data = output.advisory.to_text();
        Self {
            prediction: output.prediction.label,
            advisory: output.advisory,
            ai_data,
            status: "success",
        }
    }
}
