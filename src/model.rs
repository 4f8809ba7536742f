use crate::error::GenerationError;
use crate::links::video_search_url;
use crate::request::RecipeRequest;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder for times the generator left out.
pub const UNSPECIFIED_TIME: &str = "not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Case-insensitive parse; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approximate nutrition, free text per field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

/// Canonical recipe returned to every consumer, whether generated or synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub have_ingredients: Vec<String>,
    pub need_ingredients: Vec<String>,
    /// One instruction per entry, without numbering
    pub steps: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
    pub youtube_url: String,
}

impl Recipe {
    /// Steps rendered as `"1. …"`, `"2. …"` for display.
    pub fn numbered_steps(&self) -> Vec<String> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect()
    }

    /// Shopping list text: the ingredients still to buy.
    pub fn shopping_list(&self) -> String {
        self.need_ingredients.join(", ")
    }
}

/// Parse the generator's content into the canonical schema.
///
/// The generator is asked for JSON with the canonical keys but is not trusted
/// to get the types right. `name` and a non-empty `steps` list are required;
/// everything else is filled from the request or sensible defaults. The video
/// link is always derived from the returned name.
pub fn parse_generated_recipe(
    content: &str,
    request: &RecipeRequest,
) -> Result<Recipe, GenerationError> {
    let value: Value = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| GenerationError::Unparsable(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| GenerationError::Unparsable("response is not a JSON object".to_string()))?;

    let name = object
        .get("name")
        .and_then(scalar_to_string)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| GenerationError::Unparsable("missing recipe name".to_string()))?;

    let steps: Vec<String> = string_list(object.get("steps"))
        .into_iter()
        .map(|s| strip_step_number(&s).to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if steps.is_empty() {
        return Err(GenerationError::Unparsable(
            "missing recipe steps".to_string(),
        ));
    }

    let have_ingredients = match object.get("haveIngredients") {
        Some(v) if v.is_array() => string_list(Some(v)),
        _ => request.ingredients().to_vec(),
    };

    let tips = match object.get("tips") {
        Some(v) if v.is_array() => Some(string_list(Some(v))),
        Some(Value::String(tip)) if !tip.trim().is_empty() => Some(vec![tip.trim().to_string()]),
        _ => None,
    };

    Ok(Recipe {
        youtube_url: video_search_url(&name),
        name,
        have_ingredients,
        need_ingredients: string_list(object.get("needIngredients")),
        steps,
        prep_time: duration_text(object.get("prepTime")),
        cook_time: duration_text(object.get("cookTime")),
        servings: servings(object.get("servings")).unwrap_or_else(|| request.serving_count()),
        difficulty: object
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(Difficulty::parse)
            .unwrap_or_default(),
        nutritional_info: object
            .get("nutritionalInfo")
            .and_then(Value::as_object)
            .map(nutritional_info),
        tips,
    })
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string ("json") on the opening fence line.
    match rest.find('\n') {
        Some(pos) => rest[pos + 1..].trim(),
        None => rest.trim(),
    }
}

/// Strip a leading `"3."`, `"3)"` or `"Step 3:"` marker. The marker must be
/// followed by whitespace, so `"1.5 hours"` is left alone.
fn strip_step_number(step: &str) -> &str {
    let trimmed = step.trim();
    let without_label = trimmed
        .strip_prefix("Step ")
        .or_else(|| trimmed.strip_prefix("step "))
        .unwrap_or(trimmed);
    let digits = without_label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(without_label.len());
    if digits == 0 {
        return trimmed;
    }
    match without_label[digits..].strip_prefix(&['.', ')', ':'][..]) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            rest.trim_start()
        }
        _ => trimmed,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => ["text", "instruction", "item", "name"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(scalar_to_string)),
                other => scalar_to_string(other),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn duration_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => format!("{} minutes", n),
        Some(v) => scalar_to_string(v)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNSPECIFIED_TIME.to_string()),
        None => UNSPECIFIED_TIME.to_string(),
    }
}

fn servings(value: Option<&Value>) -> Option<u32> {
    let count = match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => leading_integer(s).and_then(|n| u64::try_from(n).ok()),
        _ => None,
    }?;
    u32::try_from(count).ok().filter(|n| *n > 0)
}

fn nutritional_info(map: &Map<String, Value>) -> NutritionalInfo {
    let field = |key: &str| {
        map.get(key)
            .and_then(scalar_to_string)
            .unwrap_or_else(|| "unknown".to_string())
    };
    NutritionalInfo {
        calories: field("calories"),
        protein: field("protein"),
        carbs: field("carbs"),
        fats: field("fats"),
    }
}

/// Leading integer of a string, the way `"20 minutes"` reads as 20.
///
/// Leading whitespace and a sign are allowed; returns `None` when no digits
/// follow.
pub fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecipeRequest {
        RecipeRequest::with_ingredients(["chicken", "rice"]).servings(4)
    }

    #[test]
    fn test_parse_complete_response() {
        let content = r#"{
            "name": "Lemon Chicken Rice",
            "haveIngredients": ["chicken", "rice"],
            "needIngredients": ["1 lemon", "2 tbsp butter"],
            "steps": ["1. Cook the rice.", "2. Sear the chicken.", "3) Combine."],
            "prepTime": "10 minutes",
            "cookTime": 25,
            "servings": "4 people",
            "difficulty": "Medium",
            "nutritionalInfo": {"calories": 520, "protein": "38g", "carbs": "55g", "fats": "14g"},
            "tips": ["Rest the chicken before slicing."],
            "youtubeUrl": "https://example.com/not-used"
        }"#;

        let recipe = parse_generated_recipe(content, &request()).unwrap();
        assert_eq!(recipe.name, "Lemon Chicken Rice");
        assert_eq!(
            recipe.steps,
            vec!["Cook the rice.", "Sear the chicken.", "Combine."]
        );
        assert_eq!(recipe.cook_time, "25 minutes");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.nutritional_info.unwrap().calories, "520");
        assert_eq!(
            recipe.youtube_url,
            "https://www.youtube.com/results?search_query=how%20to%20cook%20Lemon%20Chicken%20Rice"
        );
    }

    #[test]
    fn test_parse_fills_missing_fields() {
        let content = r#"{"name": "Plain Rice", "steps": ["Boil rice."]}"#;
        let recipe = parse_generated_recipe(content, &request()).unwrap();
        assert_eq!(recipe.have_ingredients, vec!["chicken", "rice"]);
        assert!(recipe.need_ingredients.is_empty());
        assert_eq!(recipe.prep_time, UNSPECIFIED_TIME);
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert!(recipe.nutritional_info.is_none());
        assert!(recipe.tips.is_none());
    }

    #[test]
    fn test_parse_accepts_code_fence() {
        let content = "```json\n{\"name\": \"Fenced\", \"steps\": [\"Eat.\"]}\n```";
        let recipe = parse_generated_recipe(content, &request()).unwrap();
        assert_eq!(recipe.name, "Fenced");
    }

    #[test]
    fn test_parse_rejects_non_recipes() {
        assert!(matches!(
            parse_generated_recipe("Sorry, I can't help with that.", &request()),
            Err(GenerationError::Unparsable(_))
        ));
        assert!(matches!(
            parse_generated_recipe(r#"{"steps": ["Cook."]}"#, &request()),
            Err(GenerationError::Unparsable(_))
        ));
        assert!(matches!(
            parse_generated_recipe(r#"{"name": "Nothing", "steps": []}"#, &request()),
            Err(GenerationError::Unparsable(_))
        ));
        assert!(matches!(
            parse_generated_recipe("[1, 2]", &request()),
            Err(GenerationError::Unparsable(_))
        ));
    }

    #[test]
    fn test_strip_step_number() {
        assert_eq!(strip_step_number("1. Chop"), "Chop");
        assert_eq!(strip_step_number("12) Stir"), "Stir");
        assert_eq!(strip_step_number("Step 3: Serve"), "Serve");
        assert_eq!(strip_step_number("2 eggs go in"), "2 eggs go in");
        assert_eq!(strip_step_number("Whisk"), "Whisk");
        assert_eq!(strip_step_number("1.5 hours later"), "1.5 hours later");
        assert_eq!(strip_step_number("2:30 on the timer"), "2:30 on the timer");
        assert_eq!(strip_step_number("3.\tRest"), "Rest");
    }

    #[test]
    fn test_decimal_step_survives_parsing() {
        let content = r#"{"name": "Bread", "steps": ["1.5 hours later, punch down the dough.", "2. Bake."]}"#;
        let recipe = parse_generated_recipe(content, &request()).unwrap();
        assert_eq!(
            recipe.steps,
            vec!["1.5 hours later, punch down the dough.", "Bake."]
        );
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("20 minutes"), Some(20));
        assert_eq!(leading_integer("  45"), Some(45));
        assert_eq!(leading_integer("-5 min"), Some(-5));
        assert_eq!(leading_integer("about 20 minutes"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_serialization_uses_camel_case_and_omits_absent_optionals() {
        let recipe = parse_generated_recipe(
            r#"{"name": "Toast", "steps": ["Toast bread."]}"#,
            &request(),
        )
        .unwrap();
        let json = serde_json::to_value(&recipe).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("haveIngredients"));
        assert!(object.contains_key("youtubeUrl"));
        assert!(!object.contains_key("nutritionalInfo"));
        assert!(!object.contains_key("tips"));
        assert_eq!(json["difficulty"], "medium");
    }

    #[test]
    fn test_numbered_steps() {
        let recipe = parse_generated_recipe(
            r#"{"name": "Tea", "steps": ["Boil water", "Steep"]}"#,
            &request(),
        )
        .unwrap();
        assert_eq!(recipe.numbered_steps(), vec!["1. Boil water", "2. Steep"]);
    }
}
