use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Meal log. `date` is the local calendar date of `timestamp` at
        -- creation, stored denormalized because every list/summary query is
        -- scoped by it.
        CREATE TABLE IF NOT EXISTS meals (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            description TEXT NOT NULL,
            calories INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            date TEXT NOT NULL,
            is_custom_recipe INTEGER NOT NULL DEFAULT 0,
            -- Deliberately no FOREIGN KEY: deleting a recipe must not
            -- cascade to or invalidate meals logged from it.
            recipe_id TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_meals_user_timestamp ON meals(user_id, timestamp);

        -- Saved recipes. Ingredient and instruction sequences are stored as
        -- JSON arrays of strings.
        CREATE TABLE IF NOT EXISTS recipes (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            ingredients TEXT NOT NULL DEFAULT '[]',
            instructions TEXT NOT NULL DEFAULT '[]',
            calories INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_recipes_user_created_at ON recipes(user_id, created_at);

        -- Per-user settings: estimation credential + daily calorie goal.
        CREATE TABLE IF NOT EXISTS user_settings (
            user_id TEXT PRIMARY KEY,
            calorie_goal INTEGER NOT NULL DEFAULT 2000,
            api_key TEXT,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .await?;

    Ok(())
}
