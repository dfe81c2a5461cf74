use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;

use crate::config::LlmConfig;
use crate::error::{CaltrackError, Result};
use crate::llm::api::LlmApiClient;
use crate::llm::prompts;
use crate::models::{is_valid_api_key, API_KEY_PREFIX};

/// A successful estimation: the extracted calorie count plus the model's
/// free-text breakdown for display.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub calories: i64,
    pub breakdown: String,
}

/// Turns free-text meal descriptions into calorie counts via a
/// chat-completion endpoint.
///
/// The credential is resolved per call (it is per-user state, see
/// `SettingsService`) and validated before any request leaves the process.
/// Rate-limited meal estimations are retried on an exponential backoff
/// schedule owned entirely by this struct; every other failure is terminal.
#[derive(Clone)]
pub struct CalorieEstimator {
    config: Arc<LlmConfig>,
}

impl CalorieEstimator {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }

    /// Estimate calories for a free-text meal description.
    ///
    /// Retries up to `max_retries` times on rate limiting, sleeping
    /// `retry_backoff_ms * 2^n` after the n-th failed attempt (1s, 2s, 4s
    /// with defaults), then gives up with a rate-limit error.
    pub async fn estimate_meal(&self, description: &str, api_key: &str) -> Result<Estimate> {
        if description.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Meal description cannot be empty".to_string(),
            ));
        }

        check_credential(api_key)?;

        let prompt = prompts::meal_estimation_prompt(description);
        let client = LlmApiClient::new(&self.config, api_key)?;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = retry_delay(self.config.retry_backoff_ms, attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited by LLM endpoint, backing off"
                );
                tokio::time::sleep(delay).await;
            }

            match client.complete(&prompt).await {
                Ok(content) => return Self::finish(content),
                Err(CaltrackError::LlmRateLimit { .. }) if attempt < self.config.max_retries => {
                    continue;
                }
                Err(error) => return Err(error),
            }
        }

        Err(CaltrackError::LlmRateLimit { retry_after: None })
    }

    /// Estimate total calories for a structured recipe.
    ///
    /// Same request/parse shape as [`estimate_meal`](Self::estimate_meal)
    /// but a single request: rate limiting is terminal here.
    pub async fn estimate_recipe(&self, recipe: &str, api_key: &str) -> Result<Estimate> {
        if recipe.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Recipe cannot be empty".to_string(),
            ));
        }

        check_credential(api_key)?;

        let prompt = prompts::recipe_estimation_prompt(recipe);
        let client = LlmApiClient::new(&self.config, api_key)?;
        let content = client.complete(&prompt).await?;
        Self::finish(content)
    }

    fn finish(content: String) -> Result<Estimate> {
        match parse_calories(&content) {
            Some(calories) => Ok(Estimate {
                calories,
                breakdown: content,
            }),
            None => Err(CaltrackError::AmbiguousEstimate(
                "Could not extract a calorie count from the response. Try describing the meal more specifically.".to_string(),
            )),
        }
    }
}

fn check_credential(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(CaltrackError::Credential(
            "No API key configured. Add one in settings.".to_string(),
        ));
    }

    if !is_valid_api_key(api_key) {
        return Err(CaltrackError::Credential(format!(
            "Invalid API key: it should start with '{API_KEY_PREFIX}'. Update it in settings."
        )));
    }

    Ok(())
}

/// Backoff delay before the given (1-based) retry attempt.
fn retry_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms * 2_u64.pow(attempt - 1))
}

/// Extract a calorie count from free-text model output.
///
/// A labeled `Total: <n> [kcal|calories]` match wins; otherwise the last
/// number (optionally unit-suffixed) in the text is taken. Zero is never a
/// valid estimate, since it is indistinguishable from "could not parse", so
/// an explicit zero yields `None`.
pub fn parse_calories(content: &str) -> Option<i64> {
    static TOTAL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)total:\s*(\d+)\s*(?:kcal|calories)?").unwrap());
    static NUMBER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:kcal|calories)?").unwrap());

    TOTAL
        .captures(content)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .or_else(|| {
            NUMBER
                .captures_iter(content)
                .filter_map(|caps| caps[1].parse::<i64>().ok())
                .last()
        })
        .filter(|calories| *calories > 0)
}
