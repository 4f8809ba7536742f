//! Request builder: turns a loosely-typed form submission into a normalized
//! [`RecipeRequest`] plus the [`PromptPayload`] sent to the generation service.

mod form;
mod tags;

pub use form::RecipeForm;
pub use tags::{
    parse_choice, Allergy, Cuisine, MealType, NutrientFocus, Preference, Tag, TagSelection,
    TagSet, NONE_SENTINEL,
};

use crate::providers::PromptPayload;
use log::debug;

/// Ingredient used when the submission names none.
pub const PLACEHOLDER_INGREDIENT: &str = "food";
pub const DEFAULT_MAX_COOKING_TIME: u32 = 60;
pub const DEFAULT_SERVINGS: u32 = 2;

/// Normalized, immutable input driving generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRequest {
    ingredients: Vec<String>,
    ingredients_missing: bool,
    pub preferences: TagSet<Preference>,
    pub allergies: TagSet<Allergy>,
    pub nutritional_focus: TagSet<NutrientFocus>,
    pub cuisine: Cuisine,
    pub meal_type: MealType,
    /// Minutes, when the submission gave a usable limit
    pub max_cooking_time: Option<u32>,
    /// Portions, when the submission gave a usable count
    pub servings: Option<u32>,
}

impl RecipeRequest {
    /// Request for the given ingredients with every other field at its default.
    pub fn with_ingredients<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ingredients: Vec<String> = ingredients
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let ingredients_missing = ingredients.is_empty();
        let ingredients = if ingredients_missing {
            vec![PLACEHOLDER_INGREDIENT.to_string()]
        } else {
            ingredients
        };

        Self {
            ingredients,
            ingredients_missing,
            preferences: TagSet::new(),
            allergies: TagSet::new(),
            nutritional_focus: TagSet::new(),
            cuisine: Cuisine::Any,
            meal_type: MealType::Any,
            max_cooking_time: None,
            servings: None,
        }
    }

    /// Normalize a raw form. Never fails: malformed values degrade to defaults.
    pub fn from_form(form: &RecipeForm) -> Self {
        let mut request = Self::with_ingredients(split_ingredients(&form.ingredients));
        request.preferences = TagSet::from_submitted("preference", &form.preferences);
        request.allergies = TagSet::from_submitted("allergy", &form.allergies);
        request.nutritional_focus = TagSet::from_submitted("nutritional focus", &form.deficiencies);
        request.cuisine = parse_choice("cuisine", form.cuisine.as_deref());
        request.meal_type = parse_choice("meal type", form.meal_type.as_deref());
        request.max_cooking_time = positive(form.max_cooking_time);
        request.servings = positive(form.servings);
        request
    }

    /// Ingredients on hand; never empty.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// First ingredient, which names fallback recipes.
    pub fn main_ingredient(&self) -> &str {
        self.ingredients
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_INGREDIENT)
    }

    /// True when the submission had no ingredients and the placeholder is in use.
    pub fn ingredients_missing(&self) -> bool {
        self.ingredients_missing
    }

    /// Cooking time limit in minutes, 60 unless one was given.
    pub fn cooking_time_limit(&self) -> u32 {
        self.max_cooking_time.unwrap_or(DEFAULT_MAX_COOKING_TIME)
    }

    /// Portion count, 2 unless one was given.
    pub fn serving_count(&self) -> u32 {
        self.servings.unwrap_or(DEFAULT_SERVINGS)
    }

    pub fn cuisine(mut self, cuisine: Cuisine) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = meal_type;
        self
    }

    pub fn preference(mut self, preference: Preference) -> Self {
        self.preferences.insert(preference);
        self
    }

    pub fn allergy(mut self, allergy: Allergy) -> Self {
        self.allergies.insert(allergy);
        self
    }

    pub fn nutrient_focus(mut self, focus: NutrientFocus) -> Self {
        self.nutritional_focus.insert(focus);
        self
    }

    pub fn max_cooking_time(mut self, minutes: u32) -> Self {
        self.max_cooking_time = Some(minutes.max(1));
        self
    }

    pub fn servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings.max(1));
        self
    }
}

/// Normalize a form and build the prompt for it.
pub fn build(form: &RecipeForm) -> (RecipeRequest, PromptPayload) {
    let request = RecipeRequest::from_form(form);
    let prompt = PromptPayload::for_request(&request);
    debug!("Built recipe request: {:?}", request);
    (request, prompt)
}

/// Split a comma-separated ingredient list, dropping blank entries.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}
