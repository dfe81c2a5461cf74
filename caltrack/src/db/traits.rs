use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Meal, Recipe, UserSettings};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// CRUD and query operations for meals. All operations are scoped by
/// `user_id`; a row belonging to another user behaves as if it did not exist.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn create_meal(&self, meal: &Meal) -> Result<()>;
    async fn get_meal_by_id(&self, id: &str, user_id: &str) -> Result<Option<Meal>>;
    /// Update description and calories in place. Returns the number of rows
    /// affected (0 when the meal does not exist for this user).
    async fn update_meal(
        &self,
        id: &str,
        user_id: &str,
        description: &str,
        calories: i64,
    ) -> Result<u64>;
    async fn delete_meal(&self, id: &str, user_id: &str) -> Result<bool>;
    /// Meals for one user and calendar date, newest first, offset-paginated.
    async fn list_meals_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Meal>>;
    /// All meals for a user regardless of date, newest first (saved-items view).
    async fn list_meals(&self, user_id: &str, limit: u32, offset: u32) -> Result<Vec<Meal>>;
    async fn count_meals_by_date(&self, user_id: &str, date: NaiveDate) -> Result<u32>;
    async fn count_meals(&self, user_id: &str) -> Result<u32>;
    /// Sum of calories over all rows for a user/date, independent of paging.
    async fn total_calories_for_date(&self, user_id: &str, date: NaiveDate) -> Result<i64>;
}

/// CRUD operations for saved recipes.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create_recipe(&self, recipe: &Recipe) -> Result<()>;
    async fn get_recipe_by_id(&self, id: &str, user_id: &str) -> Result<Option<Recipe>>;
    /// Update name and calories in place (the inline-edit surface). Returns
    /// rows affected.
    async fn update_recipe(
        &self,
        id: &str,
        user_id: &str,
        name: &str,
        calories: i64,
    ) -> Result<u64>;
    async fn delete_recipe(&self, id: &str, user_id: &str) -> Result<bool>;
    async fn list_recipes(&self, user_id: &str, limit: u32, offset: u32) -> Result<Vec<Recipe>>;
    async fn count_recipes(&self, user_id: &str) -> Result<u32>;
}

/// Per-user settings storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>>;
    async fn upsert_settings(&self, settings: &UserSettings) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete database backend combining all store traits plus lifecycle
/// operations.
#[async_trait]
pub trait DatabaseBackend: MealStore + RecipeStore + SettingsStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
