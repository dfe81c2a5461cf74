use std::sync::Arc;

use caltrack::config::{Config, DatabaseConfig, LlmConfig, ServerConfig, TrackerConfig};
use caltrack::db::{Database, DatabaseBackend, LibSqlBackend};
use caltrack::llm::CalorieEstimator;
use caltrack::services::{MealService, RecipeService, SettingsService};

/// Config pointing at an in-memory database and an unroutable LLM endpoint.
/// Estimation paths that actually hit the network must override `llm`.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_keys: vec!["test-key".to_string()],
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        },
        tracker: TrackerConfig {
            default_calorie_goal: 2000,
            page_size: 10,
        },
        llm: LlmConfig {
            model: "openai/gpt-3.5-turbo".to_string(),
            api_key: None,
            base_url: Some("http://127.0.0.1:1/v1".to_string()),
            timeout_secs: 5,
            max_retries: 0,
            retry_backoff_ms: 10,
            temperature: 0.3,
        },
    }
}

pub struct TestContext {
    pub db: Arc<dyn DatabaseBackend>,
    pub meals: MealService,
    pub recipes: RecipeService,
    pub settings: SettingsService,
}

pub async fn test_context() -> TestContext {
    test_context_with_config(test_config()).await
}

pub async fn test_context_with_config(config: Config) -> TestContext {
    let raw_db = Database::new(&config.database).await.expect("database");
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

    let estimator = CalorieEstimator::new(&config.llm);
    let settings = SettingsService::new(db.clone(), &config);
    let meals = MealService::new(
        db.clone(),
        estimator.clone(),
        settings.clone(),
        config.tracker.page_size,
    );
    let recipes = RecipeService::new(
        db.clone(),
        estimator,
        settings.clone(),
        config.tracker.page_size,
    );

    TestContext {
        db,
        meals,
        recipes,
        settings,
    }
}
