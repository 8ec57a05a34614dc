use anyhow::Result;
use tracing::info;

use clinic_route_i18n::{config::Config, db::ContentStore, generator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production/CI)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_route_i18n=info".parse()?),
        )
        .init();

    info!("Starting route table generation");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Connect to the content store
    let store = ContentStore::connect(&config.database_url).await?;

    // Build the tables and write the artifact
    let tables = generator::generate(&store, &config).await?;

    info!(
        "Route table generation finished ({} route keys, {} slugs, {} root paths, {} legacy URLs)",
        tables.route_translations.len(),
        tables.slug_translations.len(),
        tables.root_path_routes.len(),
        tables.legacy_urls.len()
    );
    Ok(())
}
