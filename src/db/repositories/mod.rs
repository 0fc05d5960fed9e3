use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
};

use crate::db::entities::{artist, show, venue};
use crate::error::{AppError, Result};

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venue::Model>> {
        Ok(venue::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<venue::Model>> {
        Ok(venue::Entity::find()
            .filter(venue::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// All venues, ordered so that rows sharing a city/state are adjacent.
    pub async fn find_all(&self) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .order_by_asc(venue::Column::State)
            .order_by_asc(venue::Column::City)
            .order_by_asc(venue::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Substring match on name (SQL `LIKE`, so case sensitivity follows the backend).
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .filter(venue::Column::Name.contains(term))
            .order_by_asc(venue::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn shows(&self, venue_id: i32) -> Result<Vec<show::Model>> {
        let venue = self
            .find_by_id(venue_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id}")))?;
        venue.shows(&self.db).await
    }
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(artist::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    pub async fn find_all(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(artist::Column::Name.contains(term))
            .order_by_asc(artist::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn shows(&self, artist_id: i32) -> Result<Vec<show::Model>> {
        let artist = self
            .find_by_id(artist_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {artist_id}")))?;
        artist.shows(&self.db).await
    }
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<show::Model>> {
        Ok(show::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<show::Model>> {
        Ok(show::Entity::find()
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn for_venue(&self, venue_id: i32) -> Result<Vec<show::Model>> {
        Ok(show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .all(&self.db)
            .await?)
    }

    pub async fn for_artist(&self, artist_id: i32) -> Result<Vec<show::Model>> {
        Ok(show::Entity::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .all(&self.db)
            .await?)
    }

    /// Every show with its venue and artist names resolved in batched lookups.
    pub async fn find_all_with_parties(&self) -> Result<Vec<show::ShowDetail>> {
        let shows = self.find_all().await?;
        let venues = shows.load_one(venue::Entity, &self.db).await?;
        let artists = shows.load_one(artist::Entity, &self.db).await?;

        shows
            .iter()
            .zip(venues)
            .zip(artists)
            .map(|((show, venue), artist)| {
                let venue = venue.ok_or(AppError::ReferenceResolution {
                    entity: "Venue",
                    id: show.venue_id,
                })?;
                let artist = artist.ok_or(AppError::ReferenceResolution {
                    entity: "Artist",
                    id: show.artist_id,
                })?;
                show.detail_with(&venue, &artist)
            })
            .collect()
    }
}
