use axum::{Json, extract::{State, rejection::JsonRejection}};

use crate::{
    error::{AppError, AppResult},
    message::{ChartData, PredictionRequest, PredictionResponse},
    services::predictor::{VALIDATION_MESSAGE, format_hundredths, validate},
    state::SharedState,
};

pub async fn predict_handler(
    State(state): State<SharedState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(payload) = payload?;

    let Some(inputs) = validate(&payload) else {
        tracing::debug!(?payload, "prediction input rejected");
        return Err(AppError::BadRequest(VALIDATION_MESSAGE.to_string()));
    };

    // Simulated model latency; yields the worker instead of blocking it.
    if !state.predict_delay.is_zero() {
        tokio::time::sleep(state.predict_delay).await;
    }

    let Some(estimate) = state.model.estimate(&inputs, state.random.as_ref()) else {
        tracing::warn!(?inputs, "estimate out of representable range");
        return Err(AppError::BadRequest(VALIDATION_MESSAGE.to_string()));
    };
    tracing::info!(
        crop = %inputs.crop,
        soil = %inputs.soil,
        estimated_yield = %estimate.estimated_yield,
        "yield estimated"
    );

    let your_field = format_hundredths(estimate.estimated_yield);
    Ok(Json(PredictionResponse {
        result: format!("Estimated Yield: {} tons per hectare", your_field),
        chart_data: ChartData {
            your_field,
            avg_region: format_hundredths(estimate.avg_region),
        },
    }))
}
