use thiserror::Error;

/// Errors raised by a generation provider.
///
/// None of these reach the caller of [`crate::RecipeFinder::find`]: each one is
/// recovered by synthesizing a fallback recipe and reported as a
/// [`crate::FailureReason`] alongside it.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No usable provider or API key
    #[error("Generation service not configured: {0}")]
    Unconfigured(String),

    /// The provider account ran out of quota or is being rate limited
    #[error("Generation service quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The provider answered with a non-success status
    #[error("Generation service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Network failure talking to the provider
    #[error("Error calling generation service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered but the content is not a recipe
    #[error("Failed to parse recipe data: {0}")]
    Unparsable(String),
}

/// Errors from the persistence collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to reach recipe store: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Recipe store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from recipe store: {0}")]
    InvalidResponse(String),
}

/// Errors from the identity collaborator
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to reach identity service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from identity service: {0}")]
    InvalidResponse(String),

    #[error("Invalid identity service URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while setting up or running the service
#[derive(Error, Debug)]
pub enum FinderError {
    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Provider construction failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Server socket error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
