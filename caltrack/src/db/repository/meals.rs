use chrono::{DateTime, NaiveDate, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::Meal;

pub struct MealRepository;

impl MealRepository {
    pub async fn create(conn: &Connection, meal: &Meal) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO meals (
                id, user_id, description, calories, timestamp, date,
                is_custom_recipe, recipe_id
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
            )
            "#,
            params![
                meal.id.clone(),
                meal.user_id.clone(),
                meal.description.clone(),
                meal.calories,
                meal.timestamp.to_rfc3339(),
                meal.date.to_string(),
                meal.is_custom_recipe as i32,
                meal.recipe_id.clone(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str, user_id: &str) -> Result<Option<Meal>> {
        let mut rows = conn
            .query(
                "SELECT id, user_id, description, calories, timestamp, date,
                        is_custom_recipe, recipe_id
                 FROM meals WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_meal(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update(
        conn: &Connection,
        id: &str,
        user_id: &str,
        description: &str,
        calories: i64,
    ) -> Result<u64> {
        let affected = conn
            .execute(
                "UPDATE meals SET description = ?3, calories = ?4 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id, description, calories],
            )
            .await?;

        Ok(affected)
    }

    pub async fn delete(conn: &Connection, id: &str, user_id: &str) -> Result<bool> {
        let rows_affected = conn
            .execute(
                "DELETE FROM meals WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .await?;

        Ok(rows_affected > 0)
    }

    pub async fn list_by_date(
        conn: &Connection,
        user_id: &str,
        date: NaiveDate,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Meal>> {
        let mut rows = conn
            .query(
                "SELECT id, user_id, description, calories, timestamp, date,
                        is_custom_recipe, recipe_id
                 FROM meals WHERE user_id = ?1 AND date = ?2
                 ORDER BY timestamp DESC
                 LIMIT ?3 OFFSET ?4",
                params![user_id, date.to_string(), limit as i64, offset as i64],
            )
            .await?;

        let mut meals = Vec::new();
        while let Some(row) = rows.next().await? {
            meals.push(Self::row_to_meal(&row)?);
        }
        Ok(meals)
    }

    pub async fn list(
        conn: &Connection,
        user_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Meal>> {
        let mut rows = conn
            .query(
                "SELECT id, user_id, description, calories, timestamp, date,
                        is_custom_recipe, recipe_id
                 FROM meals WHERE user_id = ?1
                 ORDER BY timestamp DESC
                 LIMIT ?2 OFFSET ?3",
                params![user_id, limit as i64, offset as i64],
            )
            .await?;

        let mut meals = Vec::new();
        while let Some(row) = rows.next().await? {
            meals.push(Self::row_to_meal(&row)?);
        }
        Ok(meals)
    }

    pub async fn count_by_date(conn: &Connection, user_id: &str, date: NaiveDate) -> Result<u32> {
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM meals WHERE user_id = ?1 AND date = ?2",
                params![user_id, date.to_string()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row.get::<i64>(0)? as u32)
        } else {
            Ok(0)
        }
    }

    pub async fn count(conn: &Connection, user_id: &str) -> Result<u32> {
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM meals WHERE user_id = ?1",
                params![user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row.get::<i64>(0)? as u32)
        } else {
            Ok(0)
        }
    }

    pub async fn total_calories_for_date(
        conn: &Connection,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<i64> {
        let mut rows = conn
            .query(
                "SELECT COALESCE(SUM(calories), 0) FROM meals WHERE user_id = ?1 AND date = ?2",
                params![user_id, date.to_string()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row.get(0)?)
        } else {
            Ok(0)
        }
    }

    fn row_to_meal(row: &libsql::Row) -> Result<Meal> {
        Ok(Meal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            description: row.get(2)?,
            calories: row.get(3)?,
            timestamp: DateTime::parse_from_rfc3339(&row.get::<String>(4)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            date: row
                .get::<String>(5)?
                .parse()
                .unwrap_or_else(|_| Utc::now().date_naive()),
            is_custom_recipe: row.get::<i64>(6)? != 0,
            recipe_id: row.get(7)?,
        })
    }
}
