use chrono::{DateTime, Local, NaiveDate, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

/// A single logged meal.
///
/// `date` is the calendar date of `timestamp` in the server's local zone at
/// creation time and is what listing and the daily summary are scoped by.
/// It is derived once in [`Meal::new`], never recomputed on edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub calories: i64,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    pub is_custom_recipe: bool,
    /// Back-reference to the recipe this meal was logged from. Deleting the
    /// recipe does not touch this field; there is no enforced referential
    /// integrity between meals and recipes.
    pub recipe_id: Option<String>,
}

impl Meal {
    pub fn new(user_id: &str, description: &str, calories: i64) -> Self {
        let now = Utc::now();
        Self {
            id: nanoid!(),
            user_id: user_id.to_string(),
            description: description.to_string(),
            calories,
            timestamp: now,
            date: now.with_timezone(&Local).date_naive(),
            is_custom_recipe: false,
            recipe_id: None,
        }
    }

    pub fn from_recipe(user_id: &str, recipe_name: &str, calories: i64, recipe_id: &str) -> Self {
        let mut meal = Self::new(user_id, recipe_name, calories);
        meal.is_custom_recipe = true;
        meal.recipe_id = Some(recipe_id.to_string());
        meal
    }
}

/// Input for logging a meal. `calories: None` selects the estimation path;
/// `Some(_)` is the custom path where the caller supplies the count and no
/// network call is made.
#[derive(Debug, Clone)]
pub struct LogMealRequest {
    pub user_id: String,
    pub description: String,
    pub calories: Option<i64>,
    pub is_custom_recipe: bool,
    pub recipe_id: Option<String>,
}

/// Calories consumed on a date versus the user's goal, computed over all
/// rows for that date rather than the currently loaded page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_calories: i64,
    pub calorie_goal: i64,
    pub remaining: i64,
    pub over_goal: bool,
}

impl DailySummary {
    pub fn new(date: NaiveDate, total_calories: i64, calorie_goal: i64) -> Self {
        Self {
            date,
            total_calories,
            calorie_goal,
            remaining: (calorie_goal - total_calories).max(0),
            over_goal: total_calories > calorie_goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_date_matches_local_calendar_date() {
        let meal = Meal::new("user_1", "chicken burrito bowl", 650);
        let expected = meal.timestamp.with_timezone(&Local).date_naive();
        assert_eq!(meal.date, expected);
    }

    #[test]
    fn test_meal_new_is_not_a_recipe() {
        let meal = Meal::new("user_1", "toast", 120);
        assert!(!meal.is_custom_recipe);
        assert!(meal.recipe_id.is_none());
    }

    #[test]
    fn test_meal_from_recipe_carries_back_reference() {
        let meal = Meal::from_recipe("user_1", "Lentil soup", 430, "rcp_1");
        assert!(meal.is_custom_recipe);
        assert_eq!(meal.recipe_id.as_deref(), Some("rcp_1"));
        assert_eq!(meal.description, "Lentil soup");
    }

    #[test]
    fn test_daily_summary_under_goal() {
        let summary = DailySummary::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), 1500, 2000);
        assert_eq!(summary.remaining, 500);
        assert!(!summary.over_goal);
    }

    #[test]
    fn test_daily_summary_over_goal_clamps_remaining() {
        let summary = DailySummary::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), 2300, 2000);
        assert_eq!(summary.remaining, 0);
        assert!(summary.over_goal);
    }

    #[test]
    fn test_daily_summary_exactly_at_goal() {
        let summary = DailySummary::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), 2000, 2000);
        assert_eq!(summary.remaining, 0);
        assert!(!summary.over_goal);
    }
}
