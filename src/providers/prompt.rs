use crate::request::{Cuisine, MealType, RecipeRequest, Tag};
use serde::Serialize;

/// The system prompt used for generating recipes.
///
/// Fixes the chef persona and the JSON field list the response must use.
/// Loaded from `prompt.txt` at compile time.
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

const RESPONSE_INSTRUCTIONS: &str = " Include preparation time, cooking time, difficulty level (easy, medium, hard), number of servings, nutritional information, and helpful cooking tips. Ensure the response is properly formatted as JSON.";

/// Instruction pair sent to a generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
}

impl PromptPayload {
    /// Build the prompt for a normalized request.
    ///
    /// Clauses are appended in a fixed order and only when their field was given:
    /// ingredients, preferences, allergies, nutritional focus, cuisine, cooking
    /// time, meal type, servings.
    pub fn for_request(request: &RecipeRequest) -> Self {
        PromptPayload {
            system: RECIPE_SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(request),
        }
    }
}

pub fn build_user_prompt(request: &RecipeRequest) -> String {
    let mut prompt = format!(
        "Create a recipe using these ingredients: {}.",
        request.ingredients().join(", ")
    );

    if !request.preferences.is_empty() {
        prompt.push_str(&format!(
            " The recipe should be {}.",
            request.preferences.joined()
        ));
    }

    if !request.allergies.is_empty() {
        prompt.push_str(&format!(
            " Avoid these allergens: {}.",
            request.allergies.joined()
        ));
    }

    if !request.nutritional_focus.is_empty() {
        prompt.push_str(&format!(
            " The dish should be rich in {}.",
            request.nutritional_focus.joined()
        ));
    }

    if request.cuisine != Cuisine::Any {
        prompt.push_str(&format!(
            " The cuisine style should be {}.",
            request.cuisine.as_str()
        ));
    }

    if let Some(minutes) = request.max_cooking_time {
        prompt.push_str(&format!(
            " The total cooking time should be under {} minutes.",
            minutes
        ));
    }

    if request.meal_type != MealType::Any {
        prompt.push_str(&format!(
            " This should be a {} recipe.",
            request.meal_type.as_str()
        ));
    }

    if let Some(servings) = request.servings {
        let people = if servings == 1 { "person" } else { "people" };
        prompt.push_str(&format!(
            " The recipe should serve {} {}.",
            servings, people
        ));
    }

    prompt.push_str(RESPONSE_INSTRUCTIONS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Allergy, NutrientFocus, Preference};

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_SYSTEM_PROMPT.is_empty());
        assert!(RECIPE_SYSTEM_PROMPT.contains("professional chef"));
        for key in [
            "name",
            "haveIngredients",
            "needIngredients",
            "steps",
            "prepTime",
            "cookTime",
            "servings",
            "nutritionalInfo",
            "youtubeUrl",
            "difficulty",
            "tips",
        ] {
            assert!(RECIPE_SYSTEM_PROMPT.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn test_minimal_prompt() {
        let request = RecipeRequest::with_ingredients(["rice"]);
        assert_eq!(
            build_user_prompt(&request),
            format!(
                "Create a recipe using these ingredients: rice.{}",
                RESPONSE_INSTRUCTIONS
            )
        );
    }

    #[test]
    fn test_single_serving_wording() {
        let request = RecipeRequest::with_ingredients(["rice"]).servings(1);
        assert!(build_user_prompt(&request).contains(" The recipe should serve 1 person."));
        assert!(!build_user_prompt(&request).contains("cooking time"));
    }

    #[test]
    fn test_clause_order() {
        let request = RecipeRequest::with_ingredients(["chicken", "rice"])
            .preference(Preference::HighProtein)
            .allergy(Allergy::Nuts)
            .allergy(Allergy::Soy)
            .nutrient_focus(NutrientFocus::Iron)
            .cuisine(Cuisine::Thai)
            .meal_type(MealType::Lunch)
            .max_cooking_time(30)
            .servings(4);

        let prompt = build_user_prompt(&request);
        let clauses = [
            "Create a recipe using these ingredients: chicken, rice.",
            " The recipe should be high-protein.",
            " Avoid these allergens: nuts, soy.",
            " The dish should be rich in iron.",
            " The cuisine style should be thai.",
            " The total cooking time should be under 30 minutes.",
            " This should be a lunch recipe.",
            " The recipe should serve 4 people.",
        ];

        let mut cursor = 0;
        for clause in clauses {
            let found = prompt[cursor..]
                .find(clause)
                .unwrap_or_else(|| panic!("clause out of order: {clause}"));
            cursor += found + clause.len();
        }
        assert!(prompt.ends_with("properly formatted as JSON."));
    }
}
