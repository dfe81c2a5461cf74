//! v1 Settings handlers.

use axum::extract::State;
use axum_extra::extract::Query;

use crate::api::v1::dto::{GetSettingsQuery, SettingsResponse, UpdateSettingsRequest};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `GET /api/v1/settings`
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "settings",
    operation_id = "settings.get",
    params(GetSettingsQuery),
    responses(
        (status = 200, description = "Settings (API key masked)", body = SettingsResponse),
        (status = 400, description = "Missing userId", body = ApiError),
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    Query(query): Query<GetSettingsQuery>,
) -> ApiResponse<SettingsResponse> {
    let user_id = match query.user_id {
        Some(ref uid) if !uid.is_empty() => uid.clone(),
        _ => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "userId query parameter is required",
            );
        }
    };

    match state.settings.get(&user_id).await {
        Ok(settings) => ApiResponse::success(SettingsResponse::from(settings)),
        Err(e) => e.into(),
    }
}

/// `PUT /api/v1/settings`
///
/// Writes go to the store first, then refresh the in-process mirror.
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "settings",
    operation_id = "settings.update",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated (API key masked)", body = SettingsResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<UpdateSettingsRequest>,
) -> ApiResponse<SettingsResponse> {
    if req.user_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "userId cannot be empty");
    }

    match state
        .settings
        .update(&req.user_id, req.calorie_goal, req.api_key)
        .await
    {
        Ok(settings) => ApiResponse::success(SettingsResponse::from(settings)),
        Err(e) => e.into(),
    }
}
