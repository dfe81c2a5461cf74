use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

/// A saved recipe. `ingredients` and `instructions` are ordered and hold the
/// caller's entries verbatim, minus blank and whitespace-only lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub calories: i64,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(
        user_id: &str,
        name: &str,
        description: &str,
        ingredients: Vec<String>,
        instructions: Vec<String>,
        calories: i64,
    ) -> Self {
        Self {
            id: nanoid!(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            ingredients: filter_blank_entries(ingredients),
            instructions: filter_blank_entries(instructions),
            calories,
            created_at: Utc::now(),
        }
    }
}

/// Drop blank and whitespace-only entries; surviving entries are untouched.
pub fn filter_blank_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}
