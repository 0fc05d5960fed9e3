use chrono::{DateTime, NaiveDateTime};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use super::{artist, venue};
use crate::db::validate;
use crate::error::{AppError, Result as AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Show")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venue::Entity",
        from = "Column::VenueId",
        to = "super::venue::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Venue,
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::ArtistId",
        to = "super::artist::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Artist,
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDetail {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as listed on a venue page: who is playing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowArtistDetails {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as listed on an artist page: where they are playing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowVenueDetails {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

impl Model {
    /// Looks up the venue this show references.
    pub async fn venue<C: ConnectionTrait>(&self, db: &C) -> AppResult<venue::Model> {
        venue::Entity::find_by_id(self.venue_id)
            .one(db)
            .await?
            .ok_or(AppError::ReferenceResolution {
                entity: "Venue",
                id: self.venue_id,
            })
    }

    /// Looks up the artist this show references.
    pub async fn artist<C: ConnectionTrait>(&self, db: &C) -> AppResult<artist::Model> {
        artist::Entity::find_by_id(self.artist_id)
            .one(db)
            .await?
            .ok_or(AppError::ReferenceResolution {
                entity: "Artist",
                id: self.artist_id,
            })
    }

    pub async fn detail<C: ConnectionTrait>(&self, db: &C) -> AppResult<ShowDetail> {
        let venue = self.venue(db).await?;
        let artist = self.artist(db).await?;
        self.detail_with(&venue, &artist)
    }

    pub async fn artist_details<C: ConnectionTrait>(&self, db: &C) -> AppResult<ShowArtistDetails> {
        let artist = self.artist(db).await?;
        self.artist_details_with(&artist)
    }

    pub async fn venue_details<C: ConnectionTrait>(&self, db: &C) -> AppResult<ShowVenueDetails> {
        let venue = self.venue(db).await?;
        self.venue_details_with(&venue)
    }

    /// Same as [`Model::detail`], from rows the caller already loaded.
    pub fn detail_with(&self, venue: &venue::Model, artist: &artist::Model) -> AppResult<ShowDetail> {
        self.check_venue(venue)?;
        self.check_artist(artist)?;
        Ok(ShowDetail {
            venue_id: self.venue_id,
            venue_name: venue.name.clone(),
            artist_id: self.artist_id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: self.start_time.clone(),
        })
    }

    pub fn artist_details_with(&self, artist: &artist::Model) -> AppResult<ShowArtistDetails> {
        self.check_artist(artist)?;
        Ok(ShowArtistDetails {
            artist_id: self.artist_id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: self.start_time.clone(),
        })
    }

    pub fn venue_details_with(&self, venue: &venue::Model) -> AppResult<ShowVenueDetails> {
        self.check_venue(venue)?;
        Ok(ShowVenueDetails {
            venue_id: self.venue_id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            start_time: self.start_time.clone(),
        })
    }

    /// Parses `start_time`; `None` when the stored text is not a recognised timestamp.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let raw = self.start_time.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        START_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    fn check_venue(&self, venue: &venue::Model) -> AppResult<()> {
        if venue.id != self.venue_id {
            return Err(AppError::ReferenceResolution {
                entity: "Venue",
                id: self.venue_id,
            });
        }
        Ok(())
    }

    fn check_artist(&self, artist: &artist::Model) -> AppResult<()> {
        if artist.id != self.artist_id {
            return Err(AppError::ReferenceResolution {
                entity: "Artist",
                id: self.artist_id,
            });
        }
        Ok(())
    }
}

/// A show that has not been stored yet. Shows are never updated once stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: String,
}

impl NewShow {
    pub fn new(venue_id: i32, artist_id: i32, start_time: impl Into<String>) -> Self {
        Self {
            venue_id,
            artist_id,
            start_time: start_time.into(),
        }
    }

    /// Stores the show after confirming both referenced rows exist.
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> AppResult<Model> {
        validate::required("Show", "start_time", &self.start_time)?;

        if venue::Entity::find_by_id(self.venue_id).one(db).await?.is_none() {
            return Err(AppError::ReferentialIntegrity(format!(
                "Venue {} does not exist",
                self.venue_id
            )));
        }
        if artist::Entity::find_by_id(self.artist_id).one(db).await?.is_none() {
            return Err(AppError::ReferentialIntegrity(format!(
                "Artist {} does not exist",
                self.artist_id
            )));
        }

        let (venue_id, artist_id) = (self.venue_id, self.artist_id);
        let active = ActiveModel {
            id: NotSet,
            venue_id: Set(self.venue_id),
            artist_id: Set(self.artist_id),
            start_time: Set(self.start_time),
        };

        let show = active
            .insert(db)
            .await
            .map_err(|e| AppError::from_show_write(e, venue_id, artist_id))?;
        tracing::debug!(
            show_id = show.id,
            venue_id = show.venue_id,
            artist_id = show.artist_id,
            "Show inserted"
        );
        Ok(show)
    }
}

/// Shows partitioned around a point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShowTimeline {
    pub upcoming: Vec<Model>,
    pub past: Vec<Model>,
}

impl ShowTimeline {
    /// A show is upcoming if it starts strictly after `now`. Unparseable start
    /// times are treated as past.
    pub fn split(shows: impl IntoIterator<Item = Model>, now: NaiveDateTime) -> Self {
        let (upcoming, past) = shows
            .into_iter()
            .partition(|show| show.starts_at().is_some_and(|start| start > now));
        Self { upcoming, past }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::genres::Genres;
    use pretty_assertions::assert_eq;

    fn show(id: i32, start_time: &str) -> Model {
        Model {
            id,
            venue_id: 1,
            artist_id: 2,
            start_time: start_time.to_string(),
        }
    }

    fn venue_row(id: i32) -> venue::Model {
        venue::Model {
            id,
            name: "The Fillmore".to_string(),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            address: Some("1805 Geary St".to_string()),
            phone: None,
            genres: Genres::default(),
            seeking_description: String::new(),
            seeking_talent: false,
            facebook_link: None,
            image_link: Some("img.png".to_string()),
            website: None,
        }
    }

    fn artist_row(id: i32) -> artist::Model {
        artist::Model {
            id,
            name: "Jane Doe".to_string(),
            city: None,
            state: None,
            phone: None,
            genres: Genres::from(["Jazz"]),
            seeking_venue: false,
            seeking_description: " ".to_string(),
            facebook_link: None,
            image_link: Some("img2.png".to_string()),
            website: None,
        }
    }

    #[test]
    fn test_starts_at_accepts_common_formats() {
        let expected = NaiveDateTime::parse_from_str("2024-05-01 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(show(1, "2024-05-01T20:00:00").starts_at(), Some(expected));
        assert_eq!(show(1, "2024-05-01 20:00:00").starts_at(), Some(expected));
        assert_eq!(show(1, "2024-05-01T20:00:00.000Z").starts_at(), Some(expected));
        assert_eq!(show(1, "2024-05-01T22:00:00+02:00").starts_at(), Some(expected));
        assert_eq!(show(1, "next friday").starts_at(), None);
    }

    #[test]
    fn test_timeline_split() {
        let now = NaiveDateTime::parse_from_str("2024-06-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let timeline = ShowTimeline::split(
            vec![
                show(1, "2024-05-01T20:00:00"),
                show(2, "2024-07-04T19:30:00"),
                show(3, "garbage"),
                show(4, "2025-01-01T21:00:00"),
            ],
            now,
        );

        let ids = |shows: &[Model]| shows.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(&timeline.upcoming), vec![2, 4]);
        assert_eq!(ids(&timeline.past), vec![1, 3]);
    }

    #[test]
    fn test_detail_with_loaded_rows() {
        let detail = show(9, "2024-05-01T20:00:00")
            .detail_with(&venue_row(1), &artist_row(2))
            .unwrap();

        assert_eq!(
            serde_json::to_value(detail).unwrap(),
            serde_json::json!({
                "venue_id": 1,
                "venue_name": "The Fillmore",
                "artist_id": 2,
                "artist_name": "Jane Doe",
                "artist_image_link": "img2.png",
                "start_time": "2024-05-01T20:00:00",
            })
        );
    }

    #[test]
    fn test_partial_details_key_sets() {
        let s = show(9, "2024-05-01T20:00:00");
        assert_eq!(
            serde_json::to_value(s.venue_details_with(&venue_row(1)).unwrap()).unwrap(),
            serde_json::json!({
                "venue_id": 1,
                "venue_name": "The Fillmore",
                "venue_image_link": "img.png",
                "start_time": "2024-05-01T20:00:00",
            })
        );
        assert_eq!(
            serde_json::to_value(s.artist_details_with(&artist_row(2)).unwrap()).unwrap(),
            serde_json::json!({
                "artist_id": 2,
                "artist_name": "Jane Doe",
                "artist_image_link": "img2.png",
                "start_time": "2024-05-01T20:00:00",
            })
        );
    }

    #[test]
    fn test_mismatched_rows_fail_resolution() {
        let err = show(9, "2024-05-01T20:00:00")
            .detail_with(&venue_row(5), &artist_row(2))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferenceResolution { entity: "Venue", id: 1 }
        ));
    }
}
