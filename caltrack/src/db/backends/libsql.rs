use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::connection::Database;
use crate::db::repository::{MealRepository, RecipeRepository, SettingsRepository};
use crate::db::traits::{DatabaseBackend, MealStore, RecipeStore, SettingsStore};
use crate::error::Result;
use crate::models::{Meal, Recipe, UserSettings};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealStore for LibSqlBackend {
    async fn create_meal(&self, meal: &Meal) -> Result<()> {
        let conn = self.db.connect()?;
        MealRepository::create(&conn, meal).await
    }
    async fn get_meal_by_id(&self, id: &str, user_id: &str) -> Result<Option<Meal>> {
        let conn = self.db.connect()?;
        MealRepository::get_by_id(&conn, id, user_id).await
    }
    async fn update_meal(
        &self,
        id: &str,
        user_id: &str,
        description: &str,
        calories: i64,
    ) -> Result<u64> {
        let conn = self.db.connect()?;
        MealRepository::update(&conn, id, user_id, description, calories).await
    }
    async fn delete_meal(&self, id: &str, user_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        MealRepository::delete(&conn, id, user_id).await
    }
    async fn list_meals_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Meal>> {
        let conn = self.db.connect()?;
        MealRepository::list_by_date(&conn, user_id, date, limit, offset).await
    }
    async fn list_meals(&self, user_id: &str, limit: u32, offset: u32) -> Result<Vec<Meal>> {
        let conn = self.db.connect()?;
        MealRepository::list(&conn, user_id, limit, offset).await
    }
    async fn count_meals_by_date(&self, user_id: &str, date: NaiveDate) -> Result<u32> {
        let conn = self.db.connect()?;
        MealRepository::count_by_date(&conn, user_id, date).await
    }
    async fn count_meals(&self, user_id: &str) -> Result<u32> {
        let conn = self.db.connect()?;
        MealRepository::count(&conn, user_id).await
    }
    async fn total_calories_for_date(&self, user_id: &str, date: NaiveDate) -> Result<i64> {
        let conn = self.db.connect()?;
        MealRepository::total_calories_for_date(&conn, user_id, date).await
    }
}

#[async_trait]
impl RecipeStore for LibSqlBackend {
    async fn create_recipe(&self, recipe: &Recipe) -> Result<()> {
        let conn = self.db.connect()?;
        RecipeRepository::create(&conn, recipe).await
    }
    async fn get_recipe_by_id(&self, id: &str, user_id: &str) -> Result<Option<Recipe>> {
        let conn = self.db.connect()?;
        RecipeRepository::get_by_id(&conn, id, user_id).await
    }
    async fn update_recipe(
        &self,
        id: &str,
        user_id: &str,
        name: &str,
        calories: i64,
    ) -> Result<u64> {
        let conn = self.db.connect()?;
        RecipeRepository::update(&conn, id, user_id, name, calories).await
    }
    async fn delete_recipe(&self, id: &str, user_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        RecipeRepository::delete(&conn, id, user_id).await
    }
    async fn list_recipes(&self, user_id: &str, limit: u32, offset: u32) -> Result<Vec<Recipe>> {
        let conn = self.db.connect()?;
        RecipeRepository::list(&conn, user_id, limit, offset).await
    }
    async fn count_recipes(&self, user_id: &str) -> Result<u32> {
        let conn = self.db.connect()?;
        RecipeRepository::count(&conn, user_id).await
    }
}

#[async_trait]
impl SettingsStore for LibSqlBackend {
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>> {
        let conn = self.db.connect()?;
        SettingsRepository::get(&conn, user_id).await
    }
    async fn upsert_settings(&self, settings: &UserSettings) -> Result<()> {
        let conn = self.db.connect()?;
        SettingsRepository::upsert(&conn, settings).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
