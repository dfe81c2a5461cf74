//! Meal request/response DTOs for the v1 API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/meals`.
///
/// Omit `calories` to have them estimated from the description; supply them
/// to log a custom entry with no network call.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogMealRequest {
    /// Row scope for this meal.
    pub user_id: String,
    /// Free-text description of what was eaten.
    pub description: String,
    /// Caller-supplied calorie count; absent means "estimate it".
    pub calories: Option<i64>,
    /// Marks the entry as a custom-recipe log. Defaults to whether
    /// `calories` was supplied.
    pub is_custom_recipe: Option<bool>,
    /// Recipe this meal was logged from, if any.
    pub recipe_id: Option<String>,
}

impl From<LogMealRequest> for models::LogMealRequest {
    fn from(req: LogMealRequest) -> Self {
        let is_custom_recipe = req.is_custom_recipe.unwrap_or(req.calories.is_some());
        Self {
            user_id: req.user_id,
            description: req.description,
            calories: req.calories,
            is_custom_recipe,
            recipe_id: req.recipe_id,
        }
    }
}

/// Request body for `PATCH /v1/meals/{mealId}` (inline edit).
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub user_id: String,
    pub description: String,
    pub calories: i64,
}

/// Request body for `POST /v1/meals:log-again`. Exactly one of `mealId` or
/// `recipeId` must be provided.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogAgainRequest {
    pub user_id: String,
    pub meal_id: Option<String>,
    pub recipe_id: Option<String>,
}

/// Query parameters for `GET /v1/meals`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListMealsQuery {
    /// Row scope. Required.
    pub user_id: Option<String>,
    /// Calendar date to list (YYYY-MM-DD). Defaults to today. Pass
    /// `allDates=true` to list across dates instead.
    #[schema(value_type = Option<String>)]
    #[param(value_type = Option<String>)]
    pub date: Option<NaiveDate>,
    /// List across all dates (saved-items view) instead of one day.
    pub all_dates: Option<bool>,
    /// Maximum results per page (default 10, max 100).
    pub limit: Option<u32>,
    /// Opaque cursor for pagination.
    pub cursor: Option<String>,
}

/// Query parameters for `GET /v1/summary` and `DELETE /v1/meals/{mealId}`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserScopedQuery {
    pub user_id: Option<String>,
    /// Calendar date (YYYY-MM-DD). Defaults to today where applicable.
    #[schema(value_type = Option<String>)]
    #[param(value_type = Option<String>)]
    pub date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A logged meal on the wire.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    /// Unique meal ID (nanoid, 21 chars).
    pub meal_id: String,
    pub user_id: String,
    pub description: String,
    pub calories: i64,
    /// Creation instant.
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    /// Calendar date the meal counts toward (YYYY-MM-DD).
    #[schema(value_type = String)]
    pub date: NaiveDate,
    pub is_custom_recipe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

impl From<models::Meal> for MealResponse {
    fn from(meal: models::Meal) -> Self {
        Self {
            meal_id: meal.id,
            user_id: meal.user_id,
            description: meal.description,
            calories: meal.calories,
            timestamp: meal.timestamp,
            date: meal.date,
            is_custom_recipe: meal.is_custom_recipe,
            recipe_id: meal.recipe_id,
        }
    }
}

/// Response for `POST /v1/meals`: the stored meal plus the model's
/// free-text breakdown when estimation ran.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogMealResponse {
    pub meal: MealResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
}

/// Response for `DELETE /v1/meals/{mealId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMealResponse {
    pub meal_id: String,
    pub deleted: bool,
}

/// Meal list response wrapper.
///
/// Pagination is handled by the envelope's `meta.nextCursor` / `meta.total`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMealsResponse {
    pub meals: Vec<MealResponse>,
}

/// Response for `GET /v1/summary`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryResponse {
    #[schema(value_type = String)]
    pub date: NaiveDate,
    pub total_calories: i64,
    pub calorie_goal: i64,
    pub remaining: i64,
    pub over_goal: bool,
}

impl From<models::DailySummary> for DailySummaryResponse {
    fn from(summary: models::DailySummary) -> Self {
        Self {
            date: summary.date,
            total_calories: summary.total_calories,
            calorie_goal: summary.calorie_goal,
            remaining: summary.remaining,
            over_goal: summary.over_goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_response_from_domain() {
        let meal = models::Meal::new("user_1", "chicken burrito bowl", 650);
        let resp: MealResponse = meal.clone().into();
        assert_eq!(resp.meal_id, meal.id);
        assert_eq!(resp.description, "chicken burrito bowl");
        assert_eq!(resp.calories, 650);
        assert!(!resp.is_custom_recipe);
    }

    #[test]
    fn meal_response_serializes_camel_case() {
        let resp: MealResponse = models::Meal::new("user_1", "toast", 120).into();
        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("mealId").is_some());
        assert!(json.get("meal_id").is_none());
        assert!(json.get("isCustomRecipe").is_some());
        // recipe_id is absent, so the key is omitted entirely
        assert!(json.get("recipeId").is_none());
    }

    #[test]
    fn log_meal_request_custom_flag_defaults_from_calories() {
        let json = r#"{"userId":"u1","description":"my stew","calories":420}"#;
        let req: LogMealRequest = serde_json::from_str(json).expect("deserialize");
        let internal: models::LogMealRequest = req.into();
        assert!(internal.is_custom_recipe);
        assert_eq!(internal.calories, Some(420));
    }

    #[test]
    fn log_meal_request_estimation_path_is_not_custom() {
        let json = r#"{"userId":"u1","description":"two eggs and toast"}"#;
        let req: LogMealRequest = serde_json::from_str(json).expect("deserialize");
        let internal: models::LogMealRequest = req.into();
        assert!(!internal.is_custom_recipe);
        assert!(internal.calories.is_none());
    }

    #[test]
    fn list_meals_query_parses_date() {
        let json = r#"{"userId":"u1","date":"2025-06-01"}"#;
        let query: ListMealsQuery = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            query.date,
            Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        );
    }

    #[test]
    fn daily_summary_response_from_domain() {
        let summary = models::DailySummary::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            1800,
            2000,
        );
        let resp: DailySummaryResponse = summary.into();
        assert_eq!(resp.remaining, 200);
        assert!(!resp.over_goal);

        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("totalCalories").is_some());
        assert!(json.get("calorieGoal").is_some());
        assert!(json.get("overGoal").is_some());
    }
}
