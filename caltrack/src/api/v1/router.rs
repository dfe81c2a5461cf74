use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let meals = Router::new()
        .route(
            "/",
            get(handlers::meals::list_meals).post(handlers::meals::log_meal),
        )
        .route(
            "/{mealId}",
            axum::routing::patch(handlers::meals::update_meal)
                .delete(handlers::meals::delete_meal),
        );

    let recipes = Router::new()
        .route(
            "/",
            get(handlers::recipes::list_recipes).post(handlers::recipes::create_recipe),
        )
        .route(
            "/{recipeId}",
            axum::routing::patch(handlers::recipes::update_recipe)
                .delete(handlers::recipes::delete_recipe),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .nest("/meals", meals)
        .route("/meals:log-again", post(handlers::meals::log_again))
        .route("/summary", get(handlers::meals::daily_summary))
        .nest("/recipes", recipes)
        .route(
            "/recipes:estimate",
            post(handlers::recipes::estimate_recipe),
        )
        .route("/estimate", post(handlers::estimate::estimate_meal))
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
