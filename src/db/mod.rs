pub mod entities;
pub mod genres;
pub mod repositories;
pub mod validate;

pub use entities::*;
pub use genres::Genres;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::Result;

/// Connects to the store and applies pending migrations when `run_migrations` is set.
///
/// Every persistence call in this crate takes the returned connection (or a
/// transaction opened on it) explicitly.
pub async fn setup(config: &Config) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(config.sql_logging);
    // An in-memory SQLite database only exists on the connection that created it.
    if !config.database_url.contains(":memory:") {
        options.max_connections(config.max_connections);
    }

    let db = Database::connect(options).await?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        migration::Migrator::up(&db, None).await?;
        tracing::info!("Database migrations completed");
    }

    Ok(db)
}
