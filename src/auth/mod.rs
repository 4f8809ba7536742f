//! Identity collaborator.
//!
//! Signing in yields an [`Identity`], which callers pass explicitly to
//! anything that acts on behalf of a user. No identity is a valid state: the
//! generator works for anonymous users.

mod memory;
mod supabase;

pub use memory::MemoryAuth;
pub use supabase::SupabaseAuth;

use crate::error::AuthError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An authenticated user and the token proving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub access_token: String,
}

/// Result of registering an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignUp {
    /// The account is usable right away
    SignedIn { identity: Identity },
    /// The account exists but the email address must be confirmed first
    ConfirmationPending {
        user_id: String,
        email: Option<String>,
    },
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUp, AuthError>;

    /// URL the browser should visit to sign in with a third-party provider.
    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError>;

    async fn sign_out(&self, identity: &Identity) -> Result<(), AuthError>;

    /// Resolve a bearer token to the identity it belongs to.
    async fn identify(&self, access_token: &str) -> Result<Identity, AuthError>;
}
