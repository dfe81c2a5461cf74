use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recognized prefix of a chat-completion API credential. Keys that do not
/// start with this are rejected before any request is sent.
pub const API_KEY_PREFIX: &str = "sk-";

pub fn is_valid_api_key(key: &str) -> bool {
    key.starts_with(API_KEY_PREFIX)
}

/// Per-user settings: the estimation credential and the daily calorie goal.
/// The authoritative copy lives in the database; `SettingsService` keeps a
/// write-through in-process mirror for low-latency reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    pub calorie_goal: i64,
    pub api_key: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    pub fn new(user_id: &str, calorie_goal: i64) -> Self {
        Self {
            user_id: user_id.to_string(),
            calorie_goal,
            api_key: None,
            updated_at: Utc::now(),
        }
    }

    /// Masked rendering of the stored key for read responses: first four and
    /// last four characters with the middle elided. Keys too short to mask
    /// meaningfully are fully elided.
    pub fn masked_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            if key.len() <= 8 {
                "****".to_string()
            } else {
                format!("{}...{}", &key[..4], &key[key.len() - 4..])
            }
        })
    }
}
