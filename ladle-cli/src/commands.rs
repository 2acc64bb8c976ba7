//! CLI command implementations

use std::sync::Arc;

use clap::Subcommand;
use ladle_core::config::LadleConfig;
use ladle_core::recipe::{Ingredient, RecipeDto};
use ladle_core::store::RecipeStore;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the recipe API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Pre-populate the store with sample recipes
        #[arg(long)]
        demo: bool,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port, demo } => serve(host, port, demo).await,
    }
}

/// Start the recipe API server
///
/// # Errors
/// - `LadleError::Io` - Failed to bind to the specified address
async fn serve(host: String, port: u16, demo: bool) -> anyhow::Result<()> {
    let mut config = LadleConfig::default();
    config.server.host = host;
    config.server.port = port;

    let store = Arc::new(RecipeStore::new());
    if demo {
        seed_demo_recipes(&store).await?;
        tracing::info!("Seeded {} demo recipes", store.recipe_count().await);
    }

    println!("Starting Ladle recipe server...");
    println!("URL: http://{}", config.server.bind_address());
    println!("Recipes: http://{}/recipes", config.server.bind_address());
    println!();
    println!("Press Ctrl+C to stop the server");

    ladle_web::run_server(config, store).await?;

    Ok(())
}

/// Insert a fixed set of sample recipes through the public create path,
/// so their ids come from the counter like any client-created record.
async fn seed_demo_recipes(store: &RecipeStore) -> anyhow::Result<()> {
    for dto in demo_recipes() {
        store.create(dto).await?;
    }
    Ok(())
}

fn demo_recipes() -> Vec<RecipeDto> {
    fn ingredient(name: &str, unit: &str, quantity: i64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            unit: unit.to_string(),
            quantity,
        }
    }

    vec![
        RecipeDto {
            id: None,
            title: "Simple Pasta".to_string(),
            ingredients: vec![
                ingredient("Flour", "g", 200),
                ingredient("Egg", "pcs", 2),
                ingredient("Salt", "g", 5),
            ],
            description: "Fresh egg pasta from scratch".to_string(),
            image_url: None,
        },
        RecipeDto {
            id: None,
            title: "Tomato Soup".to_string(),
            ingredients: vec![
                ingredient("Tomato", "g", 800),
                ingredient("Onion", "pcs", 1),
                ingredient("Vegetable stock", "ml", 500),
            ],
            description: "Smooth soup for cold days".to_string(),
            image_url: Some("https://example.org/images/tomato-soup.jpg".to_string()),
        },
        RecipeDto {
            id: None,
            title: "Pancakes".to_string(),
            ingredients: vec![
                ingredient("Flour", "g", 150),
                ingredient("Milk", "ml", 300),
                ingredient("Egg", "pcs", 1),
            ],
            description: "Weekend breakfast classic".to_string(),
            image_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_demo_recipes_populates_store() {
        let store = RecipeStore::new();
        seed_demo_recipes(&store).await.unwrap();

        assert_eq!(store.recipe_count().await, demo_recipes().len());

        // Seeded ids come from the counter, starting at 1
        let mut ids: Vec<u64> = store
            .all_recipes()
            .await
            .iter()
            .map(|recipe| recipe.id.as_u64())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_demo_recipes_are_filterable_by_ingredient() {
        let store = RecipeStore::new();
        seed_demo_recipes(&store).await.unwrap();

        let with_flour = store.filter_by_ingredient("flour").await;
        assert_eq!(with_flour.len(), 2);

        let soups = store.filter_by_title("soup").await;
        assert_eq!(soups.len(), 1);
        assert_eq!(soups[0].title, "Tomato Soup");
    }
}
