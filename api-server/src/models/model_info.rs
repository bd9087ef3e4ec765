//! `/api/v1/model` response body

use serde::Serialize;

use cardio_core::ModelInfo;

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    #[serde(flatten)]
    pub model: ModelInfo,
    pub advisory_enabled: bool,
    pub advisory_model: String,
}
