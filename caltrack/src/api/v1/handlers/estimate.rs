//! v1 Estimation handler.

use axum::extract::State;

use crate::api::v1::dto::{EstimateRequest, EstimateResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/estimate`
///
/// Estimate calories for a free-text meal description without persisting
/// anything. Rate-limited requests are retried with bounded exponential
/// backoff before giving up.
#[utoipa::path(
    post,
    path = "/api/v1/estimate",
    tag = "estimate",
    operation_id = "estimate.meal",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Calories estimated", body = EstimateResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 412, description = "Missing or malformed API key", body = ApiError),
        (status = 422, description = "Estimate could not be extracted", body = ApiError),
        (status = 429, description = "Upstream rate limit, retries exhausted", body = ApiError),
        (status = 502, description = "Upstream failure", body = ApiError),
    )
)]
pub async fn estimate_meal(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<EstimateRequest>,
) -> ApiResponse<EstimateResponse> {
    if req.user_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "userId cannot be empty");
    }

    match state
        .meals
        .estimate_description(&req.user_id, &req.description)
        .await
    {
        Ok(estimate) => ApiResponse::success(EstimateResponse::from(estimate)),
        Err(e) => e.into(),
    }
}
