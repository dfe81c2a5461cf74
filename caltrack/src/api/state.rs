use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::llm::CalorieEstimator;
use crate::services::{MealService, RecipeService, SettingsService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub estimator: CalorieEstimator,
    pub settings: SettingsService,
    pub meals: MealService,
    pub recipes: RecipeService,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>) -> Self {
        let config = Arc::new(config);
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
            estimator.clone(),
            settings.clone(),
            config.tracker.page_size,
        );

        Self {
            config,
            db,
            estimator,
            settings,
            meals,
            recipes,
        }
    }
}
