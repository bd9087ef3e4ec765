//! Error handling
//!
//! Every failure leaves the service as `{"error", "kind", "status": "error"}`.

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use cardio_core::{PipelineError, PipelineStage};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or non-numeric attribute
    #[error("{0}")]
    Validation(String),

    /// Malformed body: not JSON, or not a JSON object
    #[error("{0}")]
    BadRequest(String),

    /// Loaded artifacts disagree with each other or with the input
    #[error("{0}")]
    Artifact(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::BadRequest(_) => "bad_request",
            AppError::Artifact(_) => "artifact",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Artifact(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Artifact(msg) => tracing::error!("Artifact error: {}", msg),
            other => tracing::debug!("Rejected request ({}): {}", other.kind(), other),
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": "error"
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        if err.is_validation() {
            AppError::Validation(err.to_string())
        } else {
            AppError::Artifact(format!("{} failed: {}", stage_name(err.stage), err))
        }
    }
}

fn stage_name(stage: PipelineStage) -> &'static str {
    match stage {
        PipelineStage::Scaling => "Scaling",
        PipelineStage::Classifying => "Classification",
        PipelineStage::Decoding => "Label decoding",
        _ => "Inference",
    }
}
