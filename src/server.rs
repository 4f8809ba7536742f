//! HTTP surface: recipe generation, saved recipes and sign-in.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, Query, State},
    http::{header, request::Parts, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{Identity, IdentityProvider, MemoryAuth, SupabaseAuth};
use crate::config::AppConfig;
use crate::error::{AuthError, FinderError, StoreError};
use crate::finder::{RecipeFinder, RecipeResponse};
use crate::model::Recipe;
use crate::store::{
    recent_recipes, MemoryStore, NewSavedRecipe, RecipeStore, SavedRecipe, SupabaseStore,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<RecipeFinder>,
    pub store: Arc<dyn RecipeStore>,
    pub auth: Arc<dyn IdentityProvider>,
    pub recent_limit: usize,
    pub saved_limit: usize,
}

impl AppState {
    /// Wire collaborators from configuration. Without a Supabase project,
    /// accounts and saved recipes live in memory.
    pub fn from_config(config: &AppConfig) -> Self {
        let finder = Arc::new(RecipeFinder::from_config(config));

        let (store, auth): (Arc<dyn RecipeStore>, Arc<dyn IdentityProvider>) =
            match &config.supabase {
                Some(supabase) => {
                    info!("Using Supabase project at {}", supabase.url);
                    (
                        Arc::new(SupabaseStore::new(supabase)),
                        Arc::new(SupabaseAuth::new(supabase)),
                    )
                }
                None => {
                    warn!("No Supabase project configured, accounts and saved recipes are kept in memory");
                    (Arc::new(MemoryStore::new()), Arc::new(MemoryAuth::new()))
                }
            };

        Self {
            finder,
            store,
            auth,
            recent_limit: config.recent_limit,
            saved_limit: config.saved_limit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Auth(AuthError::Rejected { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AppError::Auth(AuthError::InvalidUrl(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) | AppError::Store(_) => StatusCode::BAD_GATEWAY,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or(AppError::Unauthorized("Invalid Authorization header format"))
}

/// Extractor for handlers that require a signed-in user.
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(AppError::Unauthorized(
            "Missing Authorization header",
        ))?;

        let identity = state
            .auth
            .identify(token)
            .await
            .map_err(|_| AppError::Unauthorized("Invalid or expired token"))?;

        Ok(AuthUser(identity))
    }
}

/// Extractor for handlers that serve anonymous users too. A missing or
/// unusable token means no identity.
pub struct MaybeUser(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Some(token)) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };

        match state.auth.identify(token).await {
            Ok(identity) => Ok(MaybeUser(Some(identity))),
            Err(e) => {
                warn!("Ignoring unusable token: {}", e);
                Ok(MaybeUser(None))
            }
        }
    }
}

/// Always 200: failures come back as a fallback recipe with error fields.
pub async fn generate_recipe_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<RecipeResponse> {
    let result = state.finder.find_json(&body).await;
    if let Some(degradation) = &result.degraded {
        info!(
            "Serving fallback recipe ({}): {}",
            degradation.reason, degradation.message
        );
    }
    Json(result.into_response())
}

pub async fn list_saved_handler(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<SavedRecipe>>, AppError> {
    let records = state.store.recent(&identity, state.saved_limit).await?;
    Ok(Json(records))
}

pub async fn save_recipe_handler(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(recipe): Json<Recipe>,
) -> Result<(StatusCode, Json<SavedRecipe>), AppError> {
    let record = NewSavedRecipe::from_recipe(&identity, &recipe);
    let saved = state.store.save(&identity, &record).await?;
    info!("Saved recipe {} for {}", saved.id, identity.user_id);
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn recent_recipes_handler(
    State(state): State<AppState>,
    MaybeUser(identity): MaybeUser,
) -> Json<Vec<Recipe>> {
    Json(recent_recipes(state.store.as_ref(), identity.as_ref(), state.recent_limit).await)
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

pub async fn sign_in_handler(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<Identity>, AppError> {
    let identity = state.auth.sign_in(&req.email, &req.password).await?;
    Ok(Json(identity))
}

pub async fn sign_up_handler(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .auth
        .sign_up(&req.email, &req.password, &req.full_name)
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn sign_out_handler(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<StatusCode, AppError> {
    state.auth.sign_out(&identity).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct OAuthParams {
    pub redirect_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OAuthResponse {
    pub url: String,
}

pub async fn oauth_handler(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<OAuthParams>,
) -> Result<Json<OAuthResponse>, AppError> {
    let redirect_to = params.redirect_to.unwrap_or_else(|| "/".to_string());
    let url = state.auth.oauth_authorize_url(&provider, &redirect_to)?;
    Ok(Json(OAuthResponse { url }))
}

/// Routes with permissive CORS, as browsers call the generator directly.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/generate-recipe", post(generate_recipe_handler))
        .route(
            "/recipes",
            get(list_saved_handler).post(save_recipe_handler),
        )
        .route("/recipes/recent", get(recent_recipes_handler))
        .route("/auth/sign-in", post(sign_in_handler))
        .route("/auth/sign-up", post(sign_up_handler))
        .route("/auth/sign-out", post(sign_out_handler))
        .route("/auth/oauth/{provider}", get(oauth_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(config: AppConfig) -> Result<(), FinderError> {
    info!("Initializing state...");
    let state = AppState::from_config(&config);
    let app = router(state);

    let address = format!("{}:{}", config.server.host, config.server.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
