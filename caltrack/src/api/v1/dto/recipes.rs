//! Recipe request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meals::MealResponse;
use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/recipes`.
///
/// Blank and whitespace-only ingredient/instruction entries are dropped
/// before persisting. Saving a recipe also logs a meal referencing it.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub user_id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub calories: i64,
}

/// Request body for `PATCH /v1/recipes/{recipeId}` (inline edit).
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub user_id: String,
    pub name: String,
    pub calories: i64,
}

/// Request body for `POST /v1/recipes:estimate`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRecipeRequest {
    pub user_id: String,
    /// The recipe text (ingredients with quantities, instructions).
    pub recipe: String,
}

/// Query parameters for `GET /v1/recipes`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesQuery {
    pub user_id: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A saved recipe on the wire.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    /// Unique recipe ID (nanoid, 21 chars).
    pub recipe_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub calories: i64,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::Recipe> for RecipeResponse {
    fn from(recipe: models::Recipe) -> Self {
        Self {
            recipe_id: recipe.id,
            user_id: recipe.user_id,
            name: recipe.name,
            description: recipe.description,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            calories: recipe.calories,
            created_at: recipe.created_at,
        }
    }
}

/// Response for `POST /v1/recipes`: the recipe plus the meal that was
/// logged alongside it.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeResponse {
    pub recipe: RecipeResponse,
    pub meal: MealResponse,
}

/// Response for `DELETE /v1/recipes/{recipeId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecipeResponse {
    pub recipe_id: String,
    pub deleted: bool,
}

/// Recipe list response wrapper.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}
