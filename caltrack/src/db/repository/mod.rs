mod meals;
mod recipes;
mod settings;

pub use meals::MealRepository;
pub use recipes::RecipeRepository;
pub use settings::SettingsRepository;
