use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::error::{CaltrackError, Result};
use crate::llm::{CalorieEstimator, Estimate};
use crate::models::{Meal, Pagination, Recipe};
use crate::services::SettingsService;

/// Saved recipes: creation (which also logs a meal), editing, listing, and
/// the recipe-calorie estimation variant.
#[derive(Clone)]
pub struct RecipeService {
    db: Arc<dyn DatabaseBackend>,
    estimator: CalorieEstimator,
    settings: SettingsService,
    page_size: u32,
}

impl RecipeService {
    pub fn new(
        db: Arc<dyn DatabaseBackend>,
        estimator: CalorieEstimator,
        settings: SettingsService,
        page_size: u32,
    ) -> Self {
        Self {
            db,
            estimator,
            settings,
            page_size,
        }
    }

    /// Persist a recipe and log a meal referencing it, mirroring the
    /// save-recipe flow: saving a recipe always counts it for today.
    pub async fn save_recipe(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        ingredients: Vec<String>,
        instructions: Vec<String>,
        calories: i64,
    ) -> Result<(Recipe, Meal)> {
        if name.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Recipe name is required".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Recipe description is required".to_string(),
            ));
        }
        if calories <= 0 {
            return Err(CaltrackError::Validation(
                "Calories must be a positive number".to_string(),
            ));
        }

        let recipe = Recipe::new(user_id, name, description, ingredients, instructions, calories);
        self.db.create_recipe(&recipe).await?;

        let meal = Meal::from_recipe(user_id, &recipe.name, recipe.calories, &recipe.id);
        self.db.create_meal(&meal).await?;

        tracing::info!(recipe_id = %recipe.id, meal_id = %meal.id, "Recipe saved and logged");

        Ok((recipe, meal))
    }

    pub async fn update_recipe(
        &self,
        id: &str,
        user_id: &str,
        name: &str,
        calories: i64,
    ) -> Result<Recipe> {
        if name.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Recipe name is required".to_string(),
            ));
        }
        if calories < 0 {
            return Err(CaltrackError::Validation(
                "Calories must not be negative".to_string(),
            ));
        }

        let affected = self.db.update_recipe(id, user_id, name, calories).await?;
        if affected == 0 {
            return Err(CaltrackError::NotFound(format!("Recipe {id} not found")));
        }

        self.db
            .get_recipe_by_id(id, user_id)
            .await?
            .ok_or_else(|| CaltrackError::NotFound(format!("Recipe {id} not found")))
    }

    /// Delete a recipe. Meals logged from it keep their dangling
    /// `recipe_id` on purpose.
    pub async fn delete_recipe(&self, id: &str, user_id: &str) -> Result<()> {
        if !self.db.delete_recipe(id, user_id).await? {
            return Err(CaltrackError::NotFound(format!("Recipe {id} not found")));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        user_id: &str,
        page: u32,
        limit: Option<u32>,
    ) -> Result<(Vec<Recipe>, Pagination)> {
        let limit = limit.unwrap_or(self.page_size).clamp(1, 100);
        let page = page.max(1);
        let offset = (page - 1) * limit;

        let total = self.db.count_recipes(user_id).await?;
        let recipes = self.db.list_recipes(user_id, limit, offset).await?;

        Ok((recipes, Pagination::new(page, limit, total)))
    }

    /// Estimate total calories of a recipe text. Single request: rate
    /// limiting is terminal on this path.
    pub async fn estimate(&self, user_id: &str, recipe_text: &str) -> Result<Estimate> {
        let api_key = self.settings.api_key(user_id).await?.unwrap_or_default();
        self.estimator.estimate_recipe(recipe_text, &api_key).await
    }
}
