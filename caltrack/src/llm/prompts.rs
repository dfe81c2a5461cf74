//! Prompt templates for calorie estimation
//!
//! These templates use basic `format!()` interpolation for type safety.
//! Both ask the model to end with a `Total: xxx kcal` line, which is the
//! shape the extractor prefers.

/// Generate a prompt estimating calories for a free-text meal description.
///
/// # Example
/// ```
/// use caltrack::llm::prompts::meal_estimation_prompt;
///
/// let prompt = meal_estimation_prompt("chicken burrito bowl with rice");
/// assert!(prompt.contains("chicken burrito bowl"));
/// assert!(prompt.contains("Total:"));
/// ```
pub fn meal_estimation_prompt(description: &str) -> String {
    format!(
        r#"You are a helpful nutritionist. Estimate calories for the following meal description.

Meal: "{description}"

Respond in this format:
Food 1: xxx kcal
Food 2: xxx kcal
...
Total: xxx kcal"#
    )
}

/// Generate a prompt estimating the total calories of a structured recipe.
///
/// # Example
/// ```
/// use caltrack::llm::prompts::recipe_estimation_prompt;
///
/// let prompt = recipe_estimation_prompt("2 cups rice\n1 tbsp oil");
/// assert!(prompt.contains("2 cups rice"));
/// ```
pub fn recipe_estimation_prompt(recipe: &str) -> String {
    format!(
        r#"Calculate the total calories for this recipe. Consider all ingredients and their quantities.

{recipe}

End your answer with a single line of the form:
Total: xxx kcal"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_prompt_embeds_raw_description() {
        let prompt = meal_estimation_prompt("2 eggs, toast with butter");
        assert!(prompt.contains("\"2 eggs, toast with butter\""));
    }

    #[test]
    fn test_meal_prompt_asks_for_labeled_total() {
        let prompt = meal_estimation_prompt("pasta");
        assert!(prompt.contains("Total: xxx kcal"));
    }

    #[test]
    fn test_recipe_prompt_embeds_recipe_text() {
        let prompt = recipe_estimation_prompt("500g beef\n1 onion");
        assert!(prompt.contains("500g beef\n1 onion"));
        assert!(prompt.contains("Total: xxx kcal"));
    }
}
