//! v1 Recipe handlers.

use axum::extract::{Path, State};
use axum_extra::extract::Query;

use crate::api::v1::dto::{
    CreateRecipeRequest, CreateRecipeResponse, DeleteRecipeResponse, EstimateRecipeRequest,
    EstimateResponse, ListRecipesQuery, ListRecipesResponse, MealResponse, RecipeResponse,
    UpdateRecipeRequest, UserScopedQuery,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;

/// `POST /api/v1/recipes`
///
/// Persists the recipe and logs a meal referencing it.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    tag = "recipes",
    operation_id = "recipes.create",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe saved and meal logged", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateRecipeRequest>,
) -> ApiResponse<CreateRecipeResponse> {
    if req.user_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "userId cannot be empty");
    }

    match state
        .recipes
        .save_recipe(
            &req.user_id,
            &req.name,
            &req.description,
            req.ingredients,
            req.instructions,
            req.calories,
        )
        .await
    {
        Ok((recipe, meal)) => ApiResponse::created(CreateRecipeResponse {
            recipe: RecipeResponse::from(recipe),
            meal: MealResponse::from(meal),
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/recipes`
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "recipes",
    operation_id = "recipes.list",
    params(ListRecipesQuery),
    responses(
        (status = 200, description = "Recipes listed", body = ListRecipesResponse),
        (status = 400, description = "Missing userId", body = ApiError),
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListRecipesQuery>,
) -> ApiResponse<ListRecipesResponse> {
    let user_id = match query.user_id {
        Some(ref id) if !id.is_empty() => id.clone(),
        _ => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "userId query parameter is required",
            );
        }
    };

    let page: u32 = query
        .cursor
        .as_ref()
        .and_then(|c| c.parse::<u32>().ok())
        .unwrap_or(1);

    match state.recipes.list(&user_id, page, query.limit).await {
        Ok((recipes, pagination)) => {
            let next_cursor = pagination.has_more().then(|| (page + 1).to_string());
            let meta = ResponseMeta {
                next_cursor,
                total: Some(pagination.total_items as u64),
            };
            ApiResponse::success_with_meta(
                ListRecipesResponse {
                    recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
                },
                meta,
            )
        }
        Err(e) => e.into(),
    }
}

/// `PATCH /api/v1/recipes/{recipeId}`
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{recipeId}",
    tag = "recipes",
    operation_id = "recipes.update",
    params(("recipeId" = String, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ApiError),
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Json(req): axum::Json<UpdateRecipeRequest>,
) -> ApiResponse<RecipeResponse> {
    match state
        .recipes
        .update_recipe(&id, &req.user_id, &req.name, req.calories)
        .await
    {
        Ok(recipe) => ApiResponse::success(RecipeResponse::from(recipe)),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/recipes/{recipeId}`
///
/// Meals logged from the recipe are left untouched.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{recipeId}",
    tag = "recipes",
    operation_id = "recipes.delete",
    params(("recipeId" = String, Path, description = "Recipe ID"), UserScopedQuery),
    responses(
        (status = 200, description = "Recipe deleted", body = DeleteRecipeResponse),
        (status = 404, description = "Recipe not found", body = ApiError),
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserScopedQuery>,
) -> ApiResponse<DeleteRecipeResponse> {
    let user_id = match query.user_id {
        Some(ref uid) if !uid.is_empty() => uid.clone(),
        _ => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "userId query parameter is required",
            );
        }
    };

    match state.recipes.delete_recipe(&id, &user_id).await {
        Ok(()) => ApiResponse::success(DeleteRecipeResponse {
            recipe_id: id,
            deleted: true,
        }),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/recipes:estimate`
///
/// Estimate total calories of a recipe text. Single request: rate limiting
/// is terminal on this path.
#[utoipa::path(
    post,
    path = "/api/v1/recipes:estimate",
    tag = "recipes",
    operation_id = "recipes.estimate",
    request_body = EstimateRecipeRequest,
    responses(
        (status = 200, description = "Calories estimated", body = EstimateResponse),
        (status = 412, description = "Missing or malformed API key", body = ApiError),
        (status = 422, description = "Estimate could not be extracted", body = ApiError),
    )
)]
pub async fn estimate_recipe(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<EstimateRecipeRequest>,
) -> ApiResponse<EstimateResponse> {
    if req.user_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "userId cannot be empty");
    }

    match state.recipes.estimate(&req.user_id, &req.recipe).await {
        Ok(estimate) => ApiResponse::success(EstimateResponse::from(estimate)),
        Err(e) => e.into(),
    }
}
