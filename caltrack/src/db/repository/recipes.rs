use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::Recipe;

pub struct RecipeRepository;

impl RecipeRepository {
    pub async fn create(conn: &Connection, recipe: &Recipe) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO recipes (
                id, user_id, name, description, ingredients, instructions,
                calories, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
            )
            "#,
            params![
                recipe.id.clone(),
                recipe.user_id.clone(),
                recipe.name.clone(),
                recipe.description.clone(),
                serde_json::to_string(&recipe.ingredients)?,
                serde_json::to_string(&recipe.instructions)?,
                recipe.calories,
                recipe.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str, user_id: &str) -> Result<Option<Recipe>> {
        let mut rows = conn
            .query(
                "SELECT id, user_id, name, description, ingredients, instructions,
                        calories, created_at
                 FROM recipes WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_recipe(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update(
        conn: &Connection,
        id: &str,
        user_id: &str,
        name: &str,
        calories: i64,
    ) -> Result<u64> {
        let affected = conn
            .execute(
                "UPDATE recipes SET name = ?3, calories = ?4 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id, name, calories],
            )
            .await?;

        Ok(affected)
    }

    pub async fn delete(conn: &Connection, id: &str, user_id: &str) -> Result<bool> {
        let rows_affected = conn
            .execute(
                "DELETE FROM recipes WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .await?;

        Ok(rows_affected > 0)
    }

    pub async fn list(
        conn: &Connection,
        user_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Recipe>> {
        let mut rows = conn
            .query(
                "SELECT id, user_id, name, description, ingredients, instructions,
                        calories, created_at
                 FROM recipes WHERE user_id = ?1
                 ORDER BY created_at DESC
                 LIMIT ?2 OFFSET ?3",
                params![user_id, limit as i64, offset as i64],
            )
            .await?;

        let mut recipes = Vec::new();
        while let Some(row) = rows.next().await? {
            recipes.push(Self::row_to_recipe(&row)?);
        }
        Ok(recipes)
    }

    pub async fn count(conn: &Connection, user_id: &str) -> Result<u32> {
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM recipes WHERE user_id = ?1",
                params![user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row.get::<i64>(0)? as u32)
        } else {
            Ok(0)
        }
    }

    fn row_to_recipe(row: &libsql::Row) -> Result<Recipe> {
        Ok(Recipe {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            ingredients: serde_json::from_str(&row.get::<String>(4)?).unwrap_or_default(),
            instructions: serde_json::from_str(&row.get::<String>(5)?).unwrap_or_default(),
            calories: row.get(6)?,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(7)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
