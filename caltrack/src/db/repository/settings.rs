use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::UserSettings;

pub struct SettingsRepository;

impl SettingsRepository {
    pub async fn get(conn: &Connection, user_id: &str) -> Result<Option<UserSettings>> {
        let mut rows = conn
            .query(
                "SELECT user_id, calorie_goal, api_key, updated_at
                 FROM user_settings WHERE user_id = ?1",
                params![user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_settings(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn upsert(conn: &Connection, settings: &UserSettings) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO user_settings (user_id, calorie_goal, api_key, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                calorie_goal = excluded.calorie_goal,
                api_key = excluded.api_key,
                updated_at = excluded.updated_at
            "#,
            params![
                settings.user_id.clone(),
                settings.calorie_goal,
                settings.api_key.clone(),
                settings.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    fn row_to_settings(row: &libsql::Row) -> Result<UserSettings> {
        Ok(UserSettings {
            user_id: row.get(0)?,
            calorie_goal: row.get(1)?,
            api_key: row.get(2)?,
            updated_at: DateTime::parse_from_rfc3339(&row.get::<String>(3)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
