//! Show persistence tests
//!
//! Shows depend on a stored venue and artist:
//! - Unknown references are rejected and leave no row behind
//! - Formatters resolve names through explicit lookups

use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use fyyur::db::entities::{show, NewShow};
use fyyur::error::AppError;
use fyyur::test_utils::*;

#[tokio::test]
async fn test_fillmore_jane_doe_show_detail() {
    let db = setup_test_db().await;

    let venue = fillmore().insert(&db).await.unwrap();
    let artist = jane_doe().insert(&db).await.unwrap();
    let show = NewShow::new(venue.id, artist.id, "2024-05-01T20:00:00")
        .insert(&db)
        .await
        .expect("show insert should succeed");

    assert_eq!(
        show.detail(&db).await.unwrap(),
        show::ShowDetail {
            venue_id: venue.id,
            venue_name: "The Fillmore".to_string(),
            artist_id: artist.id,
            artist_name: "Jane Doe".to_string(),
            artist_image_link: Some("img2.png".to_string()),
            start_time: "2024-05-01T20:00:00".to_string(),
        }
    );
}

#[tokio::test]
async fn test_artist_and_venue_details() {
    let db = setup_test_db().await;

    let venue = fillmore().insert(&db).await.unwrap();
    let artist = jane_doe().insert(&db).await.unwrap();
    let show = create_test_show(&db, venue.id, artist.id, "2024-05-01T20:00:00").await;

    assert_eq!(
        show.artist_details(&db).await.unwrap(),
        show::ShowArtistDetails {
            artist_id: artist.id,
            artist_name: "Jane Doe".to_string(),
            artist_image_link: Some("img2.png".to_string()),
            start_time: "2024-05-01T20:00:00".to_string(),
        }
    );
    assert_eq!(
        show.venue_details(&db).await.unwrap(),
        show::ShowVenueDetails {
            venue_id: venue.id,
            venue_name: "The Fillmore".to_string(),
            venue_image_link: Some("img.png".to_string()),
            start_time: "2024-05-01T20:00:00".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unknown_venue_is_rejected() {
    let db = setup_test_db().await;
    let artist = jane_doe().insert(&db).await.unwrap();

    let err = NewShow::new(999, artist.id, "2024-05-01T20:00:00")
        .insert(&db)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ReferentialIntegrity(ref msg) if msg.contains("Venue 999")));
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_artist_is_rejected() {
    let db = setup_test_db().await;
    let venue = fillmore().insert(&db).await.unwrap();

    let err = NewShow::new(venue.id, 999, "2024-05-01T20:00:00")
        .insert(&db)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ReferentialIntegrity(ref msg) if msg.contains("Artist 999")));
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_enforces_foreign_keys() {
    let db = setup_test_db().await;

    // Bypass the explicit lookups; the schema itself must refuse the row
    let orphan = show::ActiveModel {
        venue_id: Set(12345),
        artist_id: Set(67890),
        start_time: Set("2024-05-01T20:00:00".to_string()),
        ..Default::default()
    };

    let result = orphan.insert(&db).await;
    assert!(result.is_err(), "Should fail to create show with invalid foreign keys");
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_blank_start_time_is_rejected() {
    let db = setup_test_db().await;
    let venue = fillmore().insert(&db).await.unwrap();
    let artist = jane_doe().insert(&db).await.unwrap();

    for start_time in ["", "  "] {
        let err = NewShow::new(venue.id, artist.id, start_time)
            .insert(&db)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unresolvable_reference_fails_formatting() {
    let db = setup_test_db().await;
    let venue = fillmore().insert(&db).await.unwrap();

    // A show row that was never stored, pointing at an artist that does not exist
    let dangling = show::Model {
        id: 1,
        venue_id: venue.id,
        artist_id: 42,
        start_time: "2024-05-01T20:00:00".to_string(),
    };

    assert!(matches!(
        dangling.detail(&db).await.unwrap_err(),
        AppError::ReferenceResolution { entity: "Artist", id: 42 }
    ));
    assert!(matches!(
        dangling.artist_details(&db).await.unwrap_err(),
        AppError::ReferenceResolution { entity: "Artist", id: 42 }
    ));
    assert!(dangling.venue_details(&db).await.is_ok());
}

#[tokio::test]
async fn test_venue_and_artist_list_their_shows() {
    let db = setup_test_db().await;

    let venue = fillmore().insert(&db).await.unwrap();
    let jane = jane_doe().insert(&db).await.unwrap();
    let other = create_test_artist(&db, "The Pianist").await;

    let first = create_test_show(&db, venue.id, jane.id, "2024-05-01T20:00:00").await;
    let second = create_test_show(&db, venue.id, other.id, "2024-05-02T20:00:00").await;

    assert_eq!(venue.shows(&db).await.unwrap(), vec![first.clone(), second]);
    assert_eq!(jane.shows(&db).await.unwrap(), vec![first]);
}
