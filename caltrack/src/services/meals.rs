use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::DatabaseBackend;
use crate::error::{CaltrackError, Result};
use crate::llm::{CalorieEstimator, Estimate};
use crate::models::{DailySummary, LogMealRequest, Meal, Pagination};
use crate::services::SettingsService;

/// Meal logging, editing, and history.
#[derive(Clone)]
pub struct MealService {
    db: Arc<dyn DatabaseBackend>,
    estimator: CalorieEstimator,
    settings: SettingsService,
    page_size: u32,
}

impl MealService {
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

    /// Log a meal. Free-text entries go through the estimator; custom
    /// entries take the caller's calorie count verbatim. Returns the stored
    /// meal plus the model's breakdown text when estimation ran.
    pub async fn log_meal(&self, req: LogMealRequest) -> Result<(Meal, Option<String>)> {
        if req.description.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Description cannot be empty".to_string(),
            ));
        }

        let (calories, breakdown) = match req.calories {
            Some(calories) => {
                if calories < 0 {
                    return Err(CaltrackError::Validation(
                        "Calories must not be negative".to_string(),
                    ));
                }
                (calories, None)
            }
            None => {
                let estimate = self.estimate_description(&req.user_id, &req.description).await?;
                (estimate.calories, Some(estimate.breakdown))
            }
        };

        let mut meal = Meal::new(&req.user_id, &req.description, calories);
        meal.is_custom_recipe = req.is_custom_recipe;
        meal.recipe_id = req.recipe_id;

        self.db.create_meal(&meal).await?;
        tracing::info!(meal_id = %meal.id, calories, "Meal logged");

        Ok((meal, breakdown))
    }

    /// Estimate calories for a description without persisting anything.
    pub async fn estimate_description(&self, user_id: &str, description: &str) -> Result<Estimate> {
        let api_key = self.settings.api_key(user_id).await?.unwrap_or_default();
        self.estimator.estimate_meal(description, &api_key).await
    }

    /// Re-log a past meal or a saved recipe as a fresh entry for today.
    pub async fn log_again(
        &self,
        user_id: &str,
        meal_id: Option<&str>,
        recipe_id: Option<&str>,
    ) -> Result<Meal> {
        let meal = match (meal_id, recipe_id) {
            (Some(id), None) => {
                let source = self
                    .db
                    .get_meal_by_id(id, user_id)
                    .await?
                    .ok_or_else(|| CaltrackError::NotFound(format!("Meal {id} not found")))?;

                let mut meal = Meal::new(user_id, &source.description, source.calories);
                meal.is_custom_recipe = source.is_custom_recipe;
                meal.recipe_id = source.recipe_id;
                meal
            }
            (None, Some(id)) => {
                let source = self
                    .db
                    .get_recipe_by_id(id, user_id)
                    .await?
                    .ok_or_else(|| CaltrackError::NotFound(format!("Recipe {id} not found")))?;

                Meal::from_recipe(user_id, &source.name, source.calories, &source.id)
            }
            _ => {
                return Err(CaltrackError::Validation(
                    "Provide exactly one of mealId or recipeId".to_string(),
                ));
            }
        };

        self.db.create_meal(&meal).await?;
        tracing::info!(meal_id = %meal.id, "Meal re-logged");

        Ok(meal)
    }

    pub async fn update_meal(
        &self,
        id: &str,
        user_id: &str,
        description: &str,
        calories: i64,
    ) -> Result<Meal> {
        if description.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Description cannot be empty".to_string(),
            ));
        }
        if calories < 0 {
            return Err(CaltrackError::Validation(
                "Calories must not be negative".to_string(),
            ));
        }

        let affected = self
            .db
            .update_meal(id, user_id, description, calories)
            .await?;
        if affected == 0 {
            return Err(CaltrackError::NotFound(format!("Meal {id} not found")));
        }

        self.db
            .get_meal_by_id(id, user_id)
            .await?
            .ok_or_else(|| CaltrackError::NotFound(format!("Meal {id} not found")))
    }

    pub async fn delete_meal(&self, id: &str, user_id: &str) -> Result<()> {
        if !self.db.delete_meal(id, user_id).await? {
            return Err(CaltrackError::NotFound(format!("Meal {id} not found")));
        }
        Ok(())
    }

    /// Meals for one calendar date, newest first. `page` is 1-based.
    pub async fn list_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
        page: u32,
        limit: Option<u32>,
    ) -> Result<(Vec<Meal>, Pagination)> {
        let limit = limit.unwrap_or(self.page_size).clamp(1, 100);
        let page = page.max(1);
        let offset = (page - 1) * limit;

        let total = self.db.count_meals_by_date(user_id, date).await?;
        let meals = self
            .db
            .list_meals_by_date(user_id, date, limit, offset)
            .await?;

        Ok((meals, Pagination::new(page, limit, total)))
    }

    /// All meals for a user regardless of date (the saved-items view).
    pub async fn list_all(
        &self,
        user_id: &str,
        page: u32,
        limit: Option<u32>,
    ) -> Result<(Vec<Meal>, Pagination)> {
        let limit = limit.unwrap_or(self.page_size).clamp(1, 100);
        let page = page.max(1);
        let offset = (page - 1) * limit;

        let total = self.db.count_meals(user_id).await?;
        let meals = self.db.list_meals(user_id, limit, offset).await?;

        Ok((meals, Pagination::new(page, limit, total)))
    }

    /// Total consumed on a date vs. the goal, over all rows for that date.
    pub async fn daily_summary(&self, user_id: &str, date: NaiveDate) -> Result<DailySummary> {
        let total = self.db.total_calories_for_date(user_id, date).await?;
        let goal = self.settings.get(user_id).await?.calorie_goal;
        Ok(DailySummary::new(date, total, goal))
    }
}
