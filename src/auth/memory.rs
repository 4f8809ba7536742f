use crate::auth::{Identity, IdentityProvider, SignUp};
use crate::error::AuthError;
use async_trait::async_trait;
use log::info;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

struct Account {
    user_id: String,
    password: String,
}

/// In-process accounts for local development and tests.
///
/// Passwords are kept in memory as given; nothing survives a restart.
#[derive(Default)]
pub struct MemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, Identity>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    async fn open_session(&self, user_id: &str, email: &str) -> Identity {
        let identity = Identity {
            user_id: user_id.to_string(),
            email: Some(email.to_string()),
            access_token: Uuid::new_v4().to_string(),
        };
        self.sessions
            .write()
            .await
            .insert(identity.access_token.clone(), identity.clone());
        identity
    }
}

fn rejected(status: u16, message: &str) -> AuthError {
    AuthError::Rejected {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl IdentityProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let user_id = {
            let accounts = self.accounts.read().await;
            match accounts.get(&email.to_lowercase()) {
                Some(account) if account.password == password => account.user_id.clone(),
                _ => return Err(rejected(400, "Invalid login credentials")),
            }
        };

        Ok(self.open_session(&user_id, email).await)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUp, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(rejected(400, "Email and password are required"));
        }

        let user_id = {
            let mut accounts = self.accounts.write().await;
            let key = email.to_lowercase();
            if accounts.contains_key(&key) {
                return Err(rejected(422, "User already registered"));
            }
            let user_id = Uuid::new_v4().to_string();
            accounts.insert(
                key,
                Account {
                    user_id: user_id.clone(),
                    password: password.to_string(),
                },
            );
            user_id
        };

        info!("Registered local account for {} ({})", full_name, user_id);
        Ok(SignUp::SignedIn {
            identity: self.open_session(&user_id, email).await,
        })
    }

    fn oauth_authorize_url(&self, provider: &str, _redirect_to: &str) -> Result<String, AuthError> {
        Err(rejected(
            400,
            &format!("Sign-in with {} needs a hosted identity service", provider),
        ))
    }

    async fn sign_out(&self, identity: &Identity) -> Result<(), AuthError> {
        self.sessions.write().await.remove(&identity.access_token);
        Ok(())
    }

    async fn identify(&self, access_token: &str) -> Result<Identity, AuthError> {
        self.sessions
            .read()
            .await
            .get(access_token)
            .cloned()
            .ok_or_else(|| rejected(401, "Invalid or expired token"))
    }
}
