pub mod auth;
pub mod builder;
pub mod config;
pub mod error;
pub mod finder;
pub mod links;
pub mod model;
pub mod providers;
pub mod request;
pub mod server;
pub mod store;
pub mod synthesizer;

// Re-export commonly used types
pub use builder::{ProviderKind, RecipeFinderBuilder};
pub use config::{load_config, AppConfig};
pub use error::{AuthError, FinderError, GenerationError, StoreError};
pub use finder::{Degradation, FailureReason, GeneratedRecipe, RecipeFinder, RecipeResponse};
pub use model::{Difficulty, NutritionalInfo, Recipe};
pub use request::{RecipeForm, RecipeRequest};
pub use synthesizer::synthesize;

/// Generate a recipe with the configured default provider.
///
/// Loads `recipe-finder.toml` and `RECIPE_FINDER__*` environment variables.
/// Generation failures do not make this fail: the response then carries a
/// fallback recipe and the error fields.
///
/// # Example
/// ```no_run
/// # use recipe_finder::{generate_recipe, RecipeForm};
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_finder::FinderError> {
/// let response = generate_recipe(&RecipeForm::new("chicken, rice")).await?;
/// println!("{}", response.recipe.name);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(form: &RecipeForm) -> Result<RecipeResponse, FinderError> {
    let config = load_config()?;
    let finder = RecipeFinder::from_config(&config);
    Ok(finder.find(form).await.into_response())
}
