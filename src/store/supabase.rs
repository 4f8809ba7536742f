use crate::auth::Identity;
use crate::config::SupabaseConfig;
use crate::error::StoreError;
use crate::store::{NewSavedRecipe, RecipeStore, SavedRecipe};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Saved recipes in a Supabase table, reached through its REST interface.
///
/// Requests carry the user's own token so row-level security applies.
pub struct SupabaseStore {
    client: Client,
    table_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .build()
                .unwrap_or_else(|_| Client::new()),
            table_url: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.recipes_table
            ),
            anon_key: config.anon_key.clone(),
        }
    }

    async fn read_rows(response: Response) -> Result<Vec<SavedRecipe>, StoreError> {
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            error!("Recipe store error ({}): {}", status, raw);
            let body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: body["message"]
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| raw.trim().to_string()),
            });
        }

        debug!("{}", raw);
        serde_json::from_str(&raw).map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RecipeStore for SupabaseStore {
    async fn save(
        &self,
        owner: &Identity,
        recipe: &NewSavedRecipe,
    ) -> Result<SavedRecipe, StoreError> {
        let response = self
            .client
            .post(&self.table_url)
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&owner.access_token)
            .json(&[recipe])
            .send()
            .await?;

        Self::read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse("insert returned no rows".to_string()))
    }

    async fn recent(&self, owner: &Identity, limit: usize) -> Result<Vec<SavedRecipe>, StoreError> {
        let response = self
            .client
            .get(&self.table_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&owner.access_token)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", owner.user_id)),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        Self::read_rows(response).await
    }
}
