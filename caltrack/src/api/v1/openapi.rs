use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Caltrack API",
        version = "1.0.0",
        description = "Self-hostable calorie tracker. REST API for meal logging, recipes, and LLM-backed calorie estimation.",
    ),
    paths(
        handlers::health::health_check,
        handlers::meals::log_meal,
        handlers::meals::list_meals,
        handlers::meals::update_meal,
        handlers::meals::delete_meal,
        handlers::meals::log_again,
        handlers::meals::daily_summary,
        handlers::recipes::create_recipe,
        handlers::recipes::list_recipes,
        handlers::recipes::update_recipe,
        handlers::recipes::delete_recipe,
        handlers::recipes::estimate_recipe,
        handlers::estimate::estimate_meal,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Meals
        dto::meals::LogMealRequest,
        dto::meals::UpdateMealRequest,
        dto::meals::LogAgainRequest,
        dto::meals::ListMealsQuery,
        dto::meals::UserScopedQuery,
        dto::meals::MealResponse,
        dto::meals::LogMealResponse,
        dto::meals::DeleteMealResponse,
        dto::meals::ListMealsResponse,
        dto::meals::DailySummaryResponse,
        // Recipes
        dto::recipes::CreateRecipeRequest,
        dto::recipes::UpdateRecipeRequest,
        dto::recipes::EstimateRecipeRequest,
        dto::recipes::ListRecipesQuery,
        dto::recipes::RecipeResponse,
        dto::recipes::CreateRecipeResponse,
        dto::recipes::DeleteRecipeResponse,
        dto::recipes::ListRecipesResponse,
        // Estimation
        dto::estimate::EstimateRequest,
        dto::estimate::EstimateResponse,
        // Settings
        dto::settings::GetSettingsQuery,
        dto::settings::UpdateSettingsRequest,
        dto::settings::SettingsResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "meals", description = "Meal logging, history, and daily summary"),
        (name = "recipes", description = "Saved recipes and recipe estimation"),
        (name = "estimate", description = "Free-text calorie estimation"),
        (name = "settings", description = "Per-user credential and calorie goal"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
