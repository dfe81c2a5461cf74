use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::error::{CaltrackError, Result};
use crate::models::{is_valid_api_key, UserSettings, API_KEY_PREFIX};

/// Explicit configuration service for per-user settings.
///
/// The database row is authoritative; an in-process mirror serves repeated
/// reads (the estimation credential is looked up on every estimate call).
/// Writes go store-then-cache, so a failed upsert never poisons the mirror.
/// There is no cross-instance conflict resolution: last write wins.
#[derive(Clone)]
pub struct SettingsService {
    db: Arc<dyn DatabaseBackend>,
    default_calorie_goal: i64,
    fallback_api_key: Option<String>,
    cache: Arc<RwLock<HashMap<String, UserSettings>>>,
}

impl SettingsService {
    pub fn new(db: Arc<dyn DatabaseBackend>, config: &Config) -> Self {
        Self {
            db,
            default_calorie_goal: config.tracker.default_calorie_goal,
            fallback_api_key: config.llm.api_key.clone(),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Settings for a user, defaulting when no row exists yet.
    pub async fn get(&self, user_id: &str) -> Result<UserSettings> {
        if let Some(cached) = self.cache.read().await.get(user_id) {
            return Ok(cached.clone());
        }

        let settings = self
            .db
            .get_settings(user_id)
            .await?
            .unwrap_or_else(|| UserSettings::new(user_id, self.default_calorie_goal));

        self.cache
            .write()
            .await
            .insert(user_id.to_string(), settings.clone());

        Ok(settings)
    }

    /// Update goal and/or key. `api_key: Some("")` clears the stored key.
    pub async fn update(
        &self,
        user_id: &str,
        calorie_goal: Option<i64>,
        api_key: Option<String>,
    ) -> Result<UserSettings> {
        let mut settings = self.get(user_id).await?;

        if let Some(goal) = calorie_goal {
            if goal <= 0 {
                return Err(CaltrackError::Validation(
                    "Calorie goal must be a positive number".to_string(),
                ));
            }
            settings.calorie_goal = goal;
        }

        if let Some(key) = api_key {
            if key.is_empty() {
                settings.api_key = None;
            } else if !is_valid_api_key(&key) {
                return Err(CaltrackError::Validation(format!(
                    "Invalid API key format. It should start with '{API_KEY_PREFIX}'."
                )));
            } else {
                settings.api_key = Some(key);
            }
        }

        settings.updated_at = Utc::now();

        self.db.upsert_settings(&settings).await?;
        self.cache
            .write()
            .await
            .insert(user_id.to_string(), settings.clone());

        Ok(settings)
    }

    /// Credential for estimation calls: the user's stored key, else the
    /// server-wide fallback. Absence is handled by the estimator's
    /// precondition check, not here.
    pub async fn api_key(&self, user_id: &str) -> Result<Option<String>> {
        let settings = self.get(user_id).await?;
        Ok(settings.api_key.or_else(|| self.fallback_api_key.clone()))
    }

    /// Drop the cached row; the next read goes back to the store.
    pub async fn invalidate(&self, user_id: &str) {
        self.cache.write().await.remove(user_id);
    }
}
