use clap::{Parser, Subcommand};
use log::{debug, warn};
use recipe_finder::{load_config, server, RecipeFinder, RecipeForm};

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(about = "Recipe suggestions from the ingredients you have", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one recipe and print it as JSON
    Generate {
        /// Comma-separated ingredients on hand, e.g. "chicken, rice"
        #[arg(default_value = "")]
        ingredients: String,

        /// Dietary preference (repeatable), e.g. vegan
        #[arg(long = "preference")]
        preferences: Vec<String>,

        /// Allergen to avoid (repeatable), e.g. nuts
        #[arg(long = "allergy")]
        allergies: Vec<String>,

        /// Nutrient to focus on (repeatable), e.g. iron
        #[arg(long = "focus")]
        deficiencies: Vec<String>,

        #[arg(long)]
        cuisine: Option<String>,

        #[arg(long)]
        meal_type: Option<String>,

        /// Maximum total cooking time in minutes
        #[arg(long)]
        max_time: Option<i64>,

        #[arg(long)]
        servings: Option<i64>,

        /// Provider to use instead of the configured default
        #[arg(long)]
        provider: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config()?;

    match cli.command {
        Commands::Generate {
            ingredients,
            preferences,
            allergies,
            deficiencies,
            cuisine,
            meal_type,
            max_time,
            servings,
            provider,
            pretty,
        } => {
            if let Some(provider) = provider {
                config.default_provider = provider;
            }

            let form = RecipeForm {
                preferences,
                allergies,
                deficiencies,
                cuisine,
                ingredients,
                max_cooking_time: max_time,
                meal_type,
                servings,
            };
            debug!("{:?}", form);

            let finder = RecipeFinder::from_config(&config);
            let result = finder.find(&form).await;
            if let Some(degradation) = &result.degraded {
                warn!("{}", degradation.reason.notice());
            }

            let response = result.into_response();
            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{}", json);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(config).await?;
        }
    }

    Ok(())
}
