//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - Test data factories for venues, artists and shows

use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

use crate::{
    config::Config,
    db::entities::{artist, show, venue, NewArtist, NewShow, NewVenue},
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration pointing at an in-memory database
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        sql_logging: false,
        run_migrations: true,
    }
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// The Fillmore, unsaved
pub fn fillmore() -> NewVenue {
    NewVenue::new(
        "The Fillmore",
        ["Rock"],
        "1805 Geary St",
        "San Francisco",
        "CA",
        "415-555-0100",
        "http://fillmore.com",
        "http://fb.com/fillmore",
        "img.png",
    )
}

/// Jane Doe, unsaved
pub fn jane_doe() -> NewArtist {
    NewArtist::new(
        "Jane Doe",
        ["Jazz"],
        "Oakland",
        "CA",
        "510-555-0200",
        "img2.png",
        "http://jane.com",
        "http://fb.com/jane",
    )
}

/// Create a test venue in the database
pub async fn create_test_venue(db: &DatabaseConnection, name: &str, city: &str) -> venue::Model {
    NewVenue::new(
        name,
        ["Rock", "Folk"],
        "1 Main St",
        city,
        "CA",
        "555-0100",
        "http://example.com",
        "http://fb.com/example",
        "venue.png",
    )
    .insert(db)
    .await
    .expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    NewArtist::new(
        name,
        ["Jazz"],
        "Oakland",
        "CA",
        "555-0200",
        "artist.png",
        "http://example.com",
        "http://fb.com/example",
    )
    .insert(db)
    .await
    .expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: &str,
) -> show::Model {
    NewShow::new(venue_id, artist_id, start_time)
        .insert(db)
        .await
        .expect("Failed to insert test show")
}
