mod common;

use chrono::{Duration, Local};
use pretty_assertions::assert_eq;

use caltrack::error::CaltrackError;
use caltrack::models::{LogMealRequest, Meal};

fn custom_meal(user_id: &str, description: &str, calories: i64) -> LogMealRequest {
    LogMealRequest {
        user_id: user_id.to_string(),
        description: description.to_string(),
        calories: Some(calories),
        is_custom_recipe: true,
        recipe_id: None,
    }
}

#[tokio::test]
async fn custom_meal_is_persisted_without_estimation() {
    let ctx = common::test_context().await;

    let (meal, breakdown) = ctx
        .meals
        .log_meal(custom_meal("u1", "leftover stew", 420))
        .await
        .expect("log should succeed");

    assert!(breakdown.is_none());
    assert_eq!(meal.calories, 420);
    assert_eq!(meal.date, meal.timestamp.with_timezone(&Local).date_naive());

    let stored = ctx
        .db
        .get_meal_by_id(&meal.id, "u1")
        .await
        .expect("query")
        .expect("meal should exist");
    assert_eq!(stored.description, "leftover stew");
    assert!(stored.is_custom_recipe);
}

#[tokio::test]
async fn log_meal_rejects_blank_description_and_negative_calories() {
    let ctx = common::test_context().await;

    let result = ctx.meals.log_meal(custom_meal("u1", "   ", 200)).await;
    assert!(matches!(result, Err(CaltrackError::Validation(_))));

    let result = ctx.meals.log_meal(custom_meal("u1", "soup", -5)).await;
    assert!(matches!(result, Err(CaltrackError::Validation(_))));
}

#[tokio::test]
async fn estimation_path_without_any_key_is_a_credential_error() {
    let ctx = common::test_context().await;

    let result = ctx
        .meals
        .log_meal(LogMealRequest {
            user_id: "u1".to_string(),
            description: "two eggs and toast".to_string(),
            calories: None,
            is_custom_recipe: false,
            recipe_id: None,
        })
        .await;

    assert!(matches!(result, Err(CaltrackError::Credential(_))));
}

#[tokio::test]
async fn update_meal_changes_description_and_calories() {
    let ctx = common::test_context().await;
    let (meal, _) = ctx
        .meals
        .log_meal(custom_meal("u1", "salad", 150))
        .await
        .expect("log");

    let updated = ctx
        .meals
        .update_meal(&meal.id, "u1", "salad with dressing", 220)
        .await
        .expect("update should succeed");

    assert_eq!(updated.description, "salad with dressing");
    assert_eq!(updated.calories, 220);
    // Date scope is untouched by edits.
    assert_eq!(updated.date, meal.date);
}

#[tokio::test]
async fn update_meal_is_scoped_by_user() {
    let ctx = common::test_context().await;
    let (meal, _) = ctx
        .meals
        .log_meal(custom_meal("u1", "salad", 150))
        .await
        .expect("log");

    let result = ctx
        .meals
        .update_meal(&meal.id, "someone-else", "stolen", 1)
        .await;
    assert!(matches!(result, Err(CaltrackError::NotFound(_))));
}

#[tokio::test]
async fn delete_meal_removes_row_and_second_delete_is_not_found() {
    let ctx = common::test_context().await;
    let (meal, _) = ctx
        .meals
        .log_meal(custom_meal("u1", "snack", 90))
        .await
        .expect("log");

    ctx.meals
        .delete_meal(&meal.id, "u1")
        .await
        .expect("delete should succeed");

    let result = ctx.meals.delete_meal(&meal.id, "u1").await;
    assert!(matches!(result, Err(CaltrackError::NotFound(_))));
}

#[tokio::test]
async fn listing_pages_by_offset_with_has_more_signal() {
    let ctx = common::test_context().await;
    for i in 0..15 {
        ctx.meals
            .log_meal(custom_meal("u1", &format!("meal {i}"), 100 + i))
            .await
            .expect("log");
    }

    let today = Local::now().date_naive();

    let (page1, pagination) = ctx
        .meals
        .list_by_date("u1", today, 1, None)
        .await
        .expect("list");
    assert_eq!(page1.len(), 10);
    assert_eq!(pagination.total_items, 15);
    assert!(pagination.has_more());

    let (page2, pagination) = ctx
        .meals
        .list_by_date("u1", today, 2, None)
        .await
        .expect("list");
    assert_eq!(page2.len(), 5);
    assert!(!pagination.has_more());

    // No overlap between pages.
    for meal in &page2 {
        assert!(page1.iter().all(|m| m.id != meal.id));
    }
}

#[tokio::test]
async fn listing_is_scoped_to_the_requested_date() {
    let ctx = common::test_context().await;
    ctx.meals
        .log_meal(custom_meal("u1", "today's lunch", 500))
        .await
        .expect("log");

    // Insert a row dated yesterday directly through the store.
    let mut yesterday_meal = Meal::new("u1", "yesterday's dinner", 700);
    yesterday_meal.date -= Duration::days(1);
    ctx.db.create_meal(&yesterday_meal).await.expect("insert");

    let today = Local::now().date_naive();
    let (meals, pagination) = ctx
        .meals
        .list_by_date("u1", today, 1, None)
        .await
        .expect("list");

    assert_eq!(pagination.total_items, 1);
    assert_eq!(meals[0].description, "today's lunch");

    let (meals, _) = ctx
        .meals
        .list_by_date("u1", today - Duration::days(1), 1, None)
        .await
        .expect("list");
    assert_eq!(meals[0].description, "yesterday's dinner");
}

#[tokio::test]
async fn list_all_spans_dates_newest_first() {
    let ctx = common::test_context().await;
    let mut old_meal = Meal::new("u1", "old breakfast", 300);
    old_meal.date -= Duration::days(3);
    old_meal.timestamp -= Duration::days(3);
    ctx.db.create_meal(&old_meal).await.expect("insert");

    ctx.meals
        .log_meal(custom_meal("u1", "fresh lunch", 500))
        .await
        .expect("log");

    let (meals, pagination) = ctx.meals.list_all("u1", 1, None).await.expect("list");
    assert_eq!(pagination.total_items, 2);
    assert_eq!(meals[0].description, "fresh lunch");
    assert_eq!(meals[1].description, "old breakfast");
}

#[tokio::test]
async fn log_again_from_meal_copies_fields_with_fresh_timestamp() {
    let ctx = common::test_context().await;
    let (original, _) = ctx
        .meals
        .log_meal(custom_meal("u1", "burrito", 650))
        .await
        .expect("log");

    let relogged = ctx
        .meals
        .log_again("u1", Some(&original.id), None)
        .await
        .expect("log again");

    assert_ne!(relogged.id, original.id);
    assert_eq!(relogged.description, "burrito");
    assert_eq!(relogged.calories, 650);
    assert_eq!(relogged.date, Local::now().date_naive());
}

#[tokio::test]
async fn log_again_from_recipe_references_the_recipe() {
    let ctx = common::test_context().await;
    let (recipe, _) = ctx
        .recipes
        .save_recipe(
            "u1",
            "Lentil soup",
            "Hearty lentil soup",
            vec!["lentils".to_string()],
            vec!["simmer".to_string()],
            430,
        )
        .await
        .expect("save recipe");

    let relogged = ctx
        .meals
        .log_again("u1", None, Some(&recipe.id))
        .await
        .expect("log again");

    assert_eq!(relogged.description, "Lentil soup");
    assert_eq!(relogged.calories, 430);
    assert!(relogged.is_custom_recipe);
    assert_eq!(relogged.recipe_id.as_deref(), Some(recipe.id.as_str()));
}

#[tokio::test]
async fn log_again_requires_exactly_one_source() {
    let ctx = common::test_context().await;

    let result = ctx.meals.log_again("u1", None, None).await;
    assert!(matches!(result, Err(CaltrackError::Validation(_))));

    let result = ctx.meals.log_again("u1", Some("m1"), Some("r1")).await;
    assert!(matches!(result, Err(CaltrackError::Validation(_))));

    let result = ctx.meals.log_again("u1", Some("missing"), None).await;
    assert!(matches!(result, Err(CaltrackError::NotFound(_))));
}

#[tokio::test]
async fn daily_summary_sums_all_rows_independent_of_paging() {
    let ctx = common::test_context().await;
    for i in 0..12 {
        ctx.meals
            .log_meal(custom_meal("u1", &format!("meal {i}"), 100))
            .await
            .expect("log");
    }

    let today = Local::now().date_naive();
    let summary = ctx
        .meals
        .daily_summary("u1", today)
        .await
        .expect("summary");

    assert_eq!(summary.total_calories, 1200);
    assert_eq!(summary.calorie_goal, 2000);
    assert_eq!(summary.remaining, 800);
    assert!(!summary.over_goal);
}

#[tokio::test]
async fn daily_summary_uses_the_updated_goal() {
    let ctx = common::test_context().await;
    ctx.meals
        .log_meal(custom_meal("u1", "big dinner", 1500))
        .await
        .expect("log");

    ctx.settings
        .update("u1", Some(1200), None)
        .await
        .expect("settings update");

    let summary = ctx
        .meals
        .daily_summary("u1", Local::now().date_naive())
        .await
        .expect("summary");

    assert_eq!(summary.calorie_goal, 1200);
    assert!(summary.over_goal);
    assert_eq!(summary.remaining, 0);
}
