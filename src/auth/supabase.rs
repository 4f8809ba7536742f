use crate::auth::{Identity, IdentityProvider, SignUp};
use crate::config::SupabaseConfig;
use crate::error::AuthError;
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;

/// Supabase (GoTrue) authentication endpoints.
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Parse a JSON body, turning a non-success status into `Rejected`.
    async fn read_json(response: Response) -> Result<Value, AuthError> {
        let status = response.status();
        let raw = response.text().await?;
        let body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);

        if !status.is_success() {
            error!("Identity service error ({}): {}", status, raw);
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, &raw),
            });
        }

        debug!("{:?}", body);
        Ok(body)
    }
}

/// GoTrue has used several error shapes over time.
fn error_message(body: &Value, raw: &str) -> String {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body[*key].as_str())
        .map(String::from)
        .unwrap_or_else(|| raw.trim().to_string())
}

fn identity_from_session(session: &Value) -> Result<Identity, AuthError> {
    let access_token = session["access_token"]
        .as_str()
        .ok_or_else(|| AuthError::InvalidResponse("missing access_token".to_string()))?;
    let (user_id, email) = user_fields(&session["user"])?;

    Ok(Identity {
        user_id,
        email,
        access_token: access_token.to_string(),
    })
}

fn user_fields(user: &Value) -> Result<(String, Option<String>), AuthError> {
    let user_id = user["id"]
        .as_str()
        .ok_or_else(|| AuthError::InvalidResponse("missing user id".to_string()))?;
    Ok((user_id.to_string(), user["email"].as_str().map(String::from)))
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?;

        let session = Self::read_json(response).await?;
        let identity = identity_from_session(&session)?;
        info!("User {} signed in", identity.user_id);
        Ok(identity)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUp, AuthError> {
        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": {"full_name": full_name}
            }))
            .send()
            .await?;

        let body = Self::read_json(response).await?;

        // With auto-confirm on, the answer is a full session
        if body["access_token"].is_string() {
            return Ok(SignUp::SignedIn {
                identity: identity_from_session(&body)?,
            });
        }

        let user = if body["user"].is_object() {
            &body["user"]
        } else {
            &body
        };
        let (user_id, email) = user_fields(user)?;
        info!("User {} registered, awaiting confirmation", user_id);
        Ok(SignUp::ConfirmationPending { user_id, email })
    }

    fn oauth_authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
        let mut url = reqwest::Url::parse(&self.endpoint("authorize"))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);
        Ok(url.to_string())
    }

    async fn sign_out(&self, identity: &Identity) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&identity.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await?;
            let body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, &raw),
            });
        }

        info!("User {} signed out", identity.user_id);
        Ok(())
    }

    async fn identify(&self, access_token: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let user = Self::read_json(response).await?;
        let (user_id, email) = user_fields(&user)?;
        Ok(Identity {
            user_id,
            email,
            access_token: access_token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn auth(url: String) -> SupabaseAuth {
        SupabaseAuth::new(&SupabaseConfig {
            url,
            anon_key: "anon-key".to_string(),
            recipes_table: "saved_recipes".to_string(),
            timeout: 5,
        })
    }

    #[tokio::test]
    async fn test_sign_in_with_password() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_header("apikey", "anon-key")
            .match_body(Matcher::PartialJson(
                json!({"email": "cook@example.com", "password": "secret"}),
            ))
            .with_status(200)
            .with_body(
                r#"{"access_token": "jwt-token", "token_type": "bearer", "user": {"id": "user-1", "email": "cook@example.com"}}"#,
            )
            .create_async()
            .await;

        let identity = auth(server.url())
            .sign_in("cook@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.email.as_deref(), Some("cook@example.com"));
        assert_eq!(identity.access_token, "jwt-token");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sign_in_rejected_reports_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant", "error_description": "Invalid login credentials"}"#)
            .create_async()
            .await;

        let err = auth(server.url())
            .sign_in("cook@example.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_up_sends_full_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/signup")
            .match_body(Matcher::PartialJson(json!({"data": {"full_name": "Ada Cook"}})))
            .with_status(200)
            .with_body(r#"{"id": "user-2", "email": "ada@example.com", "confirmation_sent_at": "2024-01-01T00:00:00Z"}"#)
            .create_async()
            .await;

        let outcome = auth(server.url())
            .sign_up("ada@example.com", "secret", "Ada Cook")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SignUp::ConfirmationPending {
                user_id: "user-2".to_string(),
                email: Some("ada@example.com".to_string()),
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_identify_and_sign_out() {
        let mut server = Server::new_async().await;
        let user_mock = server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", "Bearer jwt-token")
            .with_status(200)
            .with_body(r#"{"id": "user-1", "email": "cook@example.com"}"#)
            .create_async()
            .await;
        let logout_mock = server
            .mock("POST", "/auth/v1/logout")
            .match_header("authorization", "Bearer jwt-token")
            .with_status(204)
            .create_async()
            .await;

        let auth = auth(server.url());
        let identity = auth.identify("jwt-token").await.unwrap();
        assert_eq!(identity.user_id, "user-1");
        auth.sign_out(&identity).await.unwrap();

        user_mock.assert_async().await;
        logout_mock.assert_async().await;
    }

    #[test]
    fn test_oauth_authorize_url() {
        let url = auth("https://example.supabase.co/".to_string())
            .oauth_authorize_url("google", "http://localhost:8080/")
            .unwrap();
        assert_eq!(
            url,
            "https://example.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A8080%2F"
        );
    }
}
