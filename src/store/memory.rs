use crate::auth::Identity;
use crate::error::StoreError;
use crate::store::{NewSavedRecipe, RecipeStore, SavedRecipe};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store, oldest record first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<SavedRecipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn save(
        &self,
        owner: &Identity,
        recipe: &NewSavedRecipe,
    ) -> Result<SavedRecipe, StoreError> {
        let now = Utc::now();
        let record = SavedRecipe {
            id: Uuid::new_v4().to_string(),
            user_id: owner.user_id.clone(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            cooking_time: recipe.cooking_time,
            cuisine: None,
            image_url: recipe.image_url.clone(),
            servings: Some(recipe.servings),
            difficulty: Some(recipe.difficulty),
            nutritional_info: recipe.nutritional_info.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        debug!("Saving recipe {} for {}", record.id, owner.user_id);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, owner: &Identity, limit: usize) -> Result<Vec<SavedRecipe>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .filter(|record| record.user_id == owner.user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
