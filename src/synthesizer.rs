//! Deterministic fallback recipes.
//!
//! [`synthesize`] is total: every input produces a complete [`Recipe`] and the
//! same input always produces the same recipe. It is the last resort whenever
//! the generation service is unavailable or answers with something unusable.

use crate::links::ingredient_video_search_url;
use crate::model::{Difficulty, NutritionalInfo, Recipe};
use crate::request::{Cuisine, MealType, RecipeRequest, Tag};

pub const FALLBACK_PREP_TIME: &str = "15 minutes";
/// Upper bound for the fallback cook time, in minutes
pub const FALLBACK_COOK_MINUTES: u32 = 20;

/// Pantry list every fallback recipe asks for.
pub const FALLBACK_NEED_INGREDIENTS: [&str; 5] = [
    "1 teaspoon olive oil",
    "Salt and pepper to taste",
    "2 cloves garlic",
    "1 small onion",
    "Fresh herbs (optional)",
];

/// Build a fallback recipe from the request alone.
pub fn synthesize(request: &RecipeRequest) -> Recipe {
    let main = request.main_ingredient();

    Recipe {
        name: fallback_name(request),
        have_ingredients: request.ingredients().to_vec(),
        need_ingredients: FALLBACK_NEED_INGREDIENTS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        steps: vec![
            format!("Prepare the {main} by washing and cutting it into bite-sized pieces."),
            "Heat olive oil in a pan over medium heat.".to_string(),
            "Add garlic and onion, sauté until fragrant.".to_string(),
            format!("Add the {main} and cook until done."),
            "Season with salt and pepper to taste.".to_string(),
            "Garnish with fresh herbs if available.".to_string(),
            "Serve hot and enjoy your meal!".to_string(),
        ],
        prep_time: FALLBACK_PREP_TIME.to_string(),
        cook_time: format!(
            "{} minutes",
            FALLBACK_COOK_MINUTES.min(request.cooking_time_limit())
        ),
        servings: request.serving_count(),
        difficulty: Difficulty::Easy,
        nutritional_info: Some(NutritionalInfo {
            calories: "~300 kcal per serving".to_string(),
            protein: "varies based on ingredients".to_string(),
            carbs: "varies based on ingredients".to_string(),
            fats: "varies based on ingredients".to_string(),
        }),
        tips: Some(vec![
            format!("For best results, use fresh {main}."),
            "You can substitute olive oil with butter for a richer flavor.".to_string(),
            "This recipe is perfect for beginners!".to_string(),
        ]),
        youtube_url: ingredient_video_search_url(main),
    }
}

/// `[Cuisine ][Preference ][MealType ]Ingredient Delight`, each part capitalized.
pub fn fallback_name(request: &RecipeRequest) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    if request.cuisine != Cuisine::Any {
        parts.push(capitalize(request.cuisine.as_str()));
    }
    if let Some(preference) = request.preferences.first() {
        parts.push(capitalize(preference.as_str()));
    }
    if request.meal_type != MealType::Any {
        parts.push(capitalize(request.meal_type.as_str()));
    }
    parts.push(capitalize(request.main_ingredient()));
    parts.push("Delight".to_string());

    parts.join(" ")
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
