use anyhow::Result;
use dotenvy::dotenv;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fyyur::config::Config;
use fyyur::db::{self, Artist, Show, Venue};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fyyur=debug,sea_orm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fyyur...");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let conn = db::setup(&config).await?;

    let venues = Venue::find().count(&conn).await?;
    let artists = Artist::find().count(&conn).await?;
    let shows = Show::find().count(&conn).await?;
    tracing::info!(venues, artists, shows, "Database ready");

    Ok(())
}
