//! Settings request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;

/// Query parameters for `GET /v1/settings`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GetSettingsQuery {
    pub user_id: Option<String>,
}

/// Request body for `PUT /v1/settings`.
///
/// Omitted fields are left unchanged. `apiKey: ""` clears the stored key.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub user_id: String,
    pub calorie_goal: Option<i64>,
    pub api_key: Option<String>,
}

/// Settings on the wire. The API key is always masked (first four and last
/// four characters); the full key is never returned once stored.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub user_id: String,
    pub calorie_goal: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl From<models::UserSettings> for SettingsResponse {
    fn from(settings: models::UserSettings) -> Self {
        let api_key = settings.masked_key();
        Self {
            user_id: settings.user_id,
            calorie_goal: settings.calorie_goal,
            api_key,
            updated_at: settings.updated_at,
        }
    }
}
