use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub tracker: TrackerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// Tracker-level defaults applied when a user has no settings row yet.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    pub default_calorie_goal: i64,
    pub page_size: u32,
}

/// Configuration for the chat-completion endpoint used for calorie estimation.
///
/// `api_key` is a server-wide fallback; the per-user key stored in
/// `user_settings` takes precedence (see `SettingsService`).
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// Extra attempts after a rate-limited request. With the default
    /// backoff base the schedule is 1s, 2s, 4s.
    pub max_retries: u32,
    /// Base unit of the exponential backoff schedule in milliseconds.
    pub retry_backoff_ms: u64,
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("CALTRACK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CALTRACK_PORT", 3000),
                api_keys: env::var("CALTRACK_API_KEYS")
                    .map(|keys| keys.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:caltrack.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            tracker: TrackerConfig {
                default_calorie_goal: parse_env_or("DEFAULT_CALORIE_GOAL", 2000),
                page_size: parse_env_or("PAGE_SIZE", 10),
            },
            llm: LlmConfig {
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "openai/gpt-3.5-turbo".to_string()),
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
                retry_backoff_ms: parse_env_or("LLM_RETRY_BACKOFF_MS", 1000),
                temperature: parse_env_or("LLM_TEMPERATURE", 0.3),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_llm_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_MAX_RETRIES");
        std::env::remove_var("LLM_RETRY_BACKOFF_MS");
        std::env::remove_var("LLM_TEMPERATURE");

        let config = Config::default();
        assert_eq!(config.llm.model, "openai/gpt-3.5-turbo");
        assert_eq!(config.llm.max_retries, 3);
        assert_eq!(config.llm.retry_backoff_ms, 1000);
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.llm.timeout_secs, 30);
    }

    #[test]
    fn test_llm_config_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("LLM_MODEL", "openrouter/openai/gpt-4o-mini");
        std::env::set_var("LLM_MAX_RETRIES", "5");
        std::env::set_var("LLM_TEMPERATURE", "0.7");

        let config = Config::default();
        assert_eq!(config.llm.model, "openrouter/openai/gpt-4o-mini");
        assert_eq!(config.llm.max_retries, 5);
        assert_eq!(config.llm.temperature, 0.7);

        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_MAX_RETRIES");
        std::env::remove_var("LLM_TEMPERATURE");
    }

    #[test]
    fn test_tracker_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("DEFAULT_CALORIE_GOAL");
        std::env::remove_var("PAGE_SIZE");

        let config = Config::default();
        assert_eq!(config.tracker.default_calorie_goal, 2000);
        assert_eq!(config.tracker.page_size, 10);
    }

    #[test]
    fn test_api_keys_parsed_from_csv() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("CALTRACK_API_KEYS", "alpha, beta,gamma");
        let config = Config::default();
        assert_eq!(config.server.api_keys, vec!["alpha", "beta", "gamma"]);
        std::env::remove_var("CALTRACK_API_KEYS");
    }

    #[test]
    fn test_parse_env_or_invalid_value_falls_back() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("__TEST_PARSE_PORT", "not-a-number");
        let result: u16 = parse_env_or("__TEST_PARSE_PORT", 3000);
        assert_eq!(result, 3000);
        std::env::remove_var("__TEST_PARSE_PORT");
    }

    #[test]
    fn test_parse_provider_model_known_prefix() {
        assert_eq!(
            parse_llm_provider_model("openai/gpt-3.5-turbo"),
            ("openai", "gpt-3.5-turbo")
        );
        assert_eq!(
            parse_llm_provider_model("ollama/llama3.2"),
            ("ollama", "llama3.2")
        );
    }

    #[test]
    fn test_parse_provider_model_unknown_prefix_is_local() {
        assert_eq!(
            parse_llm_provider_model("my-finetune/v2"),
            ("local", "my-finetune/v2")
        );
    }
}
