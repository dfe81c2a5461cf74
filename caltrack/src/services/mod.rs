mod meals;
mod recipes;
mod settings;

pub use meals::MealService;
pub use recipes::RecipeService;
pub use settings::SettingsService;
