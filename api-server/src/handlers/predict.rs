//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::models::PredictionResponse;
use crate::{AppError, AppResult, AppState};

/// Classify one patient record and attach an advisory
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    async move {
        let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

        let Value::Object(record) = body else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object of patient attributes".to_string(),
            ));
        };

        let output = state.pipeline.run(&record).await?;

        tracing::info!(
            label = %output.prediction.label,
            risk_score = output.advisory.risk_score(),
            source = ?output.advisory.source(),
            "Prediction served"
        );

        Ok(Json(PredictionResponse::from(output)))
    }
    .instrument(span)
    .await
}
