//! v1 Meal handlers.

use axum::extract::{Path, State};
use axum_extra::extract::Query;
use chrono::Local;

use crate::api::v1::dto::{
    DailySummaryResponse, DeleteMealResponse, ListMealsQuery, ListMealsResponse, LogAgainRequest,
    LogMealRequest, LogMealResponse, MealResponse, UpdateMealRequest, UserScopedQuery,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;

/// `POST /api/v1/meals`
#[utoipa::path(
    post,
    path = "/api/v1/meals",
    tag = "meals",
    operation_id = "meals.log",
    request_body = LogMealRequest,
    responses(
        (status = 201, description = "Meal logged", body = LogMealResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 412, description = "Missing or malformed API key", body = ApiError),
        (status = 422, description = "Estimate could not be extracted", body = ApiError),
        (status = 429, description = "Upstream rate limit, retries exhausted", body = ApiError),
    )
)]
pub async fn log_meal(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<LogMealRequest>,
) -> ApiResponse<LogMealResponse> {
    if req.user_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "userId cannot be empty");
    }
    if req.description.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Description cannot be empty");
    }

    match state.meals.log_meal(req.into()).await {
        Ok((meal, breakdown)) => ApiResponse::created(LogMealResponse {
            meal: MealResponse::from(meal),
            breakdown,
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/meals`
///
/// Lists meals with offset pagination dressed as an opaque cursor. Scoped to
/// one calendar date (default today) unless `allDates=true`.
#[utoipa::path(
    get,
    path = "/api/v1/meals",
    tag = "meals",
    operation_id = "meals.list",
    params(ListMealsQuery),
    responses(
        (status = 200, description = "Meals listed", body = ListMealsResponse),
        (status = 400, description = "Missing userId", body = ApiError),
    )
)]
pub async fn list_meals(
    State(state): State<AppState>,
    Query(query): Query<ListMealsQuery>,
) -> ApiResponse<ListMealsResponse> {
    let user_id = match query.user_id {
        Some(ref id) if !id.is_empty() => id.clone(),
        _ => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "userId query parameter is required",
            );
        }
    };

    // Cursor encodes a page number (1-based)
    let page: u32 = query
        .cursor
        .as_ref()
        .and_then(|c| c.parse::<u32>().ok())
        .unwrap_or(1);

    let result = if query.all_dates.unwrap_or(false) {
        state.meals.list_all(&user_id, page, query.limit).await
    } else {
        let date = query.date.unwrap_or_else(|| Local::now().date_naive());
        state
            .meals
            .list_by_date(&user_id, date, page, query.limit)
            .await
    };

    match result {
        Ok((meals, pagination)) => {
            let next_cursor = pagination.has_more().then(|| (page + 1).to_string());
            let meta = ResponseMeta {
                next_cursor,
                total: Some(pagination.total_items as u64),
            };
            ApiResponse::success_with_meta(
                ListMealsResponse {
                    meals: meals.into_iter().map(MealResponse::from).collect(),
                },
                meta,
            )
        }
        Err(e) => e.into(),
    }
}

/// `PATCH /api/v1/meals/{mealId}`
#[utoipa::path(
    patch,
    path = "/api/v1/meals/{mealId}",
    tag = "meals",
    operation_id = "meals.update",
    params(("mealId" = String, Path, description = "Meal ID")),
    request_body = UpdateMealRequest,
    responses(
        (status = 200, description = "Meal updated", body = MealResponse),
        (status = 404, description = "Meal not found", body = ApiError),
    )
)]
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Json(req): axum::Json<UpdateMealRequest>,
) -> ApiResponse<MealResponse> {
    match state
        .meals
        .update_meal(&id, &req.user_id, &req.description, req.calories)
        .await
    {
        Ok(meal) => ApiResponse::success(MealResponse::from(meal)),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/meals/{mealId}`
#[utoipa::path(
    delete,
    path = "/api/v1/meals/{mealId}",
    tag = "meals",
    operation_id = "meals.delete",
    params(("mealId" = String, Path, description = "Meal ID"), UserScopedQuery),
    responses(
        (status = 200, description = "Meal deleted", body = DeleteMealResponse),
        (status = 404, description = "Meal not found", body = ApiError),
    )
)]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserScopedQuery>,
) -> ApiResponse<DeleteMealResponse> {
    let user_id = match query.user_id {
        Some(ref uid) if !uid.is_empty() => uid.clone(),
        _ => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "userId query parameter is required",
            );
        }
    };

    match state.meals.delete_meal(&id, &user_id).await {
        Ok(()) => ApiResponse::success(DeleteMealResponse {
            meal_id: id,
            deleted: true,
        }),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/meals:log-again`
///
/// Re-log a past meal or saved recipe as a fresh entry for today.
#[utoipa::path(
    post,
    path = "/api/v1/meals:log-again",
    tag = "meals",
    operation_id = "meals.logAgain",
    request_body = LogAgainRequest,
    responses(
        (status = 201, description = "Meal re-logged", body = MealResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Source meal or recipe not found", body = ApiError),
    )
)]
pub async fn log_again(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<LogAgainRequest>,
) -> ApiResponse<MealResponse> {
    if req.user_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "userId cannot be empty");
    }

    match state
        .meals
        .log_again(&req.user_id, req.meal_id.as_deref(), req.recipe_id.as_deref())
        .await
    {
        Ok(meal) => ApiResponse::created(MealResponse::from(meal)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/summary`
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "meals",
    operation_id = "meals.summary",
    params(UserScopedQuery),
    responses(
        (status = 200, description = "Daily summary", body = DailySummaryResponse),
        (status = 400, description = "Missing userId", body = ApiError),
    )
)]
pub async fn daily_summary(
    State(state): State<AppState>,
    Query(query): Query<UserScopedQuery>,
) -> ApiResponse<DailySummaryResponse> {
    let user_id = match query.user_id {
        Some(ref uid) if !uid.is_empty() => uid.clone(),
        _ => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "userId query parameter is required",
            );
        }
    };

    let date = query.date.unwrap_or_else(|| Local::now().date_naive());

    match state.meals.daily_summary(&user_id, date).await {
        Ok(summary) => ApiResponse::success(DailySummaryResponse::from(summary)),
        Err(e) => e.into(),
    }
}
