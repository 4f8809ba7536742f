//! Persistence collaborator for saved recipes.

mod memory;
mod samples;
mod supabase;

pub use memory::MemoryStore;
pub use samples::sample_recipes;
pub use supabase::SupabaseStore;

use crate::auth::Identity;
use crate::error::StoreError;
use crate::links::ingredient_video_search_url;
use crate::model::{leading_integer, Difficulty, NutritionalInfo, Recipe};
use crate::request::DEFAULT_SERVINGS;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ingredients shown as "on hand" when a saved record becomes a card
const CARD_HAVE_COUNT: usize = 3;
const CARD_PREP_TIME: &str = "15 minutes";
const CARD_COOK_MINUTES: u32 = 20;

/// A recipe about to be saved, in the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedRecipe {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Ingredients still needed, followed by those on hand
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes, when the cook time starts with a number
    pub cooking_time: Option<u32>,
    pub image_url: Option<String>,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub nutritional_info: Option<NutritionalInfo>,
}

impl NewSavedRecipe {
    pub fn from_recipe(owner: &Identity, recipe: &Recipe) -> Self {
        let cooking_time = leading_integer(&recipe.cook_time)
            .filter(|minutes| *minutes > 0)
            .and_then(|minutes| u32::try_from(minutes).ok());

        Self {
            user_id: owner.user_id.clone(),
            title: recipe.name.clone(),
            description: Some(format!("Recipe for {}", recipe.name)),
            ingredients: recipe
                .need_ingredients
                .iter()
                .chain(recipe.have_ingredients.iter())
                .cloned()
                .collect(),
            instructions: recipe.steps.clone(),
            cooking_time,
            image_url: None,
            servings: if recipe.servings > 0 {
                recipe.servings
            } else {
                DEFAULT_SERVINGS
            },
            difficulty: recipe.difficulty,
            nutritional_info: recipe.nutritional_info.clone(),
        }
    }
}

/// A persisted recipe record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// Other clients may write any casing or an unknown label
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(Difficulty::parse))
}

impl SavedRecipe {
    /// Card view of the record: the first three ingredients count as on
    /// hand, the rest as still needed.
    pub fn to_recipe(&self) -> Recipe {
        let split = self.ingredients.len().min(CARD_HAVE_COUNT);
        let (have, need) = self.ingredients.split_at(split);

        Recipe {
            name: self.title.clone(),
            have_ingredients: have.to_vec(),
            need_ingredients: need.to_vec(),
            steps: self.instructions.clone(),
            prep_time: CARD_PREP_TIME.to_string(),
            cook_time: format!(
                "{} minutes",
                self.cooking_time
                    .filter(|minutes| *minutes > 0)
                    .unwrap_or(CARD_COOK_MINUTES)
            ),
            servings: self
                .servings
                .filter(|servings| *servings > 0)
                .unwrap_or(DEFAULT_SERVINGS),
            difficulty: self.difficulty.unwrap_or_default(),
            nutritional_info: self.nutritional_info.clone(),
            tips: None,
            youtube_url: ingredient_video_search_url(&self.title),
        }
    }
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn save(
        &self,
        owner: &Identity,
        recipe: &NewSavedRecipe,
    ) -> Result<SavedRecipe, StoreError>;

    /// The owner's records, newest first.
    async fn recent(&self, owner: &Identity, limit: usize) -> Result<Vec<SavedRecipe>, StoreError>;
}

/// Cards for the "recent recipes" list.
///
/// Signed-in users with saved records see their own; everyone else, and
/// anyone whose history cannot be read, sees the built-in samples.
pub async fn recent_recipes(
    store: &dyn RecipeStore,
    identity: Option<&Identity>,
    limit: usize,
) -> Vec<Recipe> {
    if let Some(identity) = identity {
        match store.recent(identity, limit).await {
            Ok(records) if !records.is_empty() => {
                return records.iter().map(SavedRecipe::to_recipe).collect();
            }
            Ok(_) => {}
            Err(e) => warn!("Could not load saved recipes, showing samples: {}", e),
        }
    }

    sample_recipes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            user_id: "user-1".to_string(),
            email: None,
            access_token: "token".to_string(),
        }
    }

    fn recipe() -> Recipe {
        Recipe {
            name: "Lentil Soup".to_string(),
            have_ingredients: vec!["lentils".to_string(), "carrot".to_string()],
            need_ingredients: vec!["stock".to_string()],
            steps: vec!["Simmer.".to_string()],
            prep_time: "10 minutes".to_string(),
            cook_time: "35 minutes".to_string(),
            servings: 4,
            difficulty: Difficulty::Easy,
            nutritional_info: None,
            tips: None,
            youtube_url: String::new(),
        }
    }

    #[test]
    fn test_from_recipe_mapping() {
        let record = NewSavedRecipe::from_recipe(&identity(), &recipe());
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.title, "Lentil Soup");
        assert_eq!(record.description.as_deref(), Some("Recipe for Lentil Soup"));
        assert_eq!(record.ingredients, vec!["stock", "lentils", "carrot"]);
        assert_eq!(record.cooking_time, Some(35));
        assert_eq!(record.servings, 4);
        assert_eq!(record.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_from_recipe_unparseable_cook_time() {
        let mut recipe = recipe();
        recipe.cook_time = "about an hour".to_string();
        assert_eq!(NewSavedRecipe::from_recipe(&identity(), &recipe).cooking_time, None);

        recipe.cook_time = "0 minutes".to_string();
        assert_eq!(NewSavedRecipe::from_recipe(&identity(), &recipe).cooking_time, None);
    }

    #[test]
    fn test_to_recipe_splits_ingredients() {
        let record = SavedRecipe {
            id: "1".to_string(),
            user_id: "user-1".to_string(),
            title: "Stew".to_string(),
            description: None,
            ingredients: ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect(),
            instructions: vec!["Cook.".to_string()],
            cooking_time: None,
            cuisine: None,
            image_url: None,
            servings: None,
            difficulty: None,
            nutritional_info: None,
            created_at: None,
            updated_at: None,
        };

        let card = record.to_recipe();
        assert_eq!(card.have_ingredients, vec!["a", "b", "c"]);
        assert_eq!(card.need_ingredients, vec!["d", "e"]);
        assert_eq!(card.prep_time, "15 minutes");
        assert_eq!(card.cook_time, "20 minutes");
        assert_eq!(card.servings, 2);
        assert_eq!(card.difficulty, Difficulty::Medium);
        assert_eq!(
            card.youtube_url,
            "https://www.youtube.com/results?search_query=how+to+cook+Stew"
        );
    }

    #[test]
    fn test_saved_rows_tolerate_odd_difficulty() {
        let rows: Vec<SavedRecipe> = serde_json::from_str(
            r#"[
                {"id": "1", "user_id": "u", "title": "Soup", "difficulty": "Medium"},
                {"id": "2", "user_id": "u", "title": "Stew", "difficulty": "tricky"},
                {"id": "3", "user_id": "u", "title": "Salad", "difficulty": 3},
                {"id": "4", "user_id": "u", "title": "Toast", "difficulty": null},
                {"id": "5", "user_id": "u", "title": "Rice", "difficulty": "hard"}
            ]"#,
        )
        .unwrap();

        let difficulties: Vec<Option<Difficulty>> = rows.iter().map(|r| r.difficulty).collect();
        assert_eq!(
            difficulties,
            vec![Some(Difficulty::Medium), None, None, None, Some(Difficulty::Hard)]
        );
        assert_eq!(rows[1].to_recipe().difficulty, Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_recent_recipes_anonymous_gets_samples() {
        let store = MemoryStore::new();
        let cards = recent_recipes(&store, None, 3).await;
        assert_eq!(cards, sample_recipes());
    }

    #[tokio::test]
    async fn test_recent_recipes_signed_in() {
        let store = MemoryStore::new();
        let owner = identity();
        assert_eq!(recent_recipes(&store, Some(&owner), 3).await, sample_recipes());

        store
            .save(&owner, &NewSavedRecipe::from_recipe(&owner, &recipe()))
            .await
            .unwrap();
        let cards = recent_recipes(&store, Some(&owner), 3).await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Lentil Soup");
        assert_eq!(cards[0].cook_time, "35 minutes");
    }
}
