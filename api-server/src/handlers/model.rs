//! Model info handler

use axum::{extract::State, Json};

use crate::models::ModelInfoResponse;
use crate::AppState;

/// Layout, labels and artifact fingerprints of the loaded model
pub async fn info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        model: state.pipeline.engine().info(),
        advisory_enabled: state.pipeline.advisor().is_enabled(),
        advisory_model: state.config.advisory.model.clone(),
    })
}
