use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw form submission, as posted by the recipe form.
///
/// Every field is optional on the wire. Numbers may arrive as JSON numbers or
/// numeric strings; anything else is treated as absent so normalization can
/// apply its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeForm {
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Nutrients the user wants more of
    #[serde(default)]
    pub deficiencies: Vec<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Comma-separated list of ingredients on hand
    #[serde(default)]
    pub ingredients: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_cooking_time: Option<i64>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub servings: Option<i64>,
}

impl RecipeForm {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_form() {
        let form: RecipeForm = serde_json::from_str(
            r#"{
                "preferences": ["vegan"],
                "allergies": ["nuts"],
                "deficiencies": ["iron"],
                "cuisine": "italian",
                "ingredients": "tofu, spinach",
                "maxCookingTime": 45,
                "mealType": "dinner",
                "servings": 3
            }"#,
        )
        .unwrap();

        assert_eq!(form.preferences, vec!["vegan"]);
        assert_eq!(form.cuisine.as_deref(), Some("italian"));
        assert_eq!(form.max_cooking_time, Some(45));
        assert_eq!(form.meal_type.as_deref(), Some("dinner"));
        assert_eq!(form.servings, Some(3));
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let form: RecipeForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form, RecipeForm::default());
    }

    #[test]
    fn test_lenient_numbers() {
        let form: RecipeForm = serde_json::from_str(
            r#"{"ingredients": "egg", "maxCookingTime": "30", "servings": true}"#,
        )
        .unwrap();
        assert_eq!(form.max_cooking_time, Some(30));
        assert_eq!(form.servings, None);

        let form: RecipeForm =
            serde_json::from_str(r#"{"maxCookingTime": 29.6, "servings": null}"#).unwrap();
        assert_eq!(form.max_cooking_time, Some(30));
        assert_eq!(form.servings, None);
    }
}
