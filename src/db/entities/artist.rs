use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ConnectionTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::db::genres::Genres;
use crate::db::validate;
use crate::error::{AppError, Result as AppResult};

const ENTITY: &str = "Artist";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: Genres,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Shows,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistShort {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDetails {
    pub id: i32,
    pub name: String,
    pub genres: Genres,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: Option<String>,
}

impl Model {
    /// Writes the current field values back to the stored row.
    pub async fn update<C: ConnectionTrait>(&self, db: &C) -> AppResult<Model> {
        self.columns().validate()?;

        let active = ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            phone: Set(self.phone.clone()),
            genres: Set(self.genres.clone()),
            seeking_venue: Set(self.seeking_venue),
            seeking_description: Set(self.seeking_description.clone()),
            facebook_link: Set(self.facebook_link.clone()),
            image_link: Set(self.image_link.clone()),
            website: Set(self.website.clone()),
        };

        let updated = active
            .update(db)
            .await
            .map_err(|e| AppError::from_update(e, ENTITY, self.id, &self.name))?;
        tracing::debug!(artist_id = updated.id, name = %updated.name, "Artist updated");
        Ok(updated)
    }

    pub fn short(&self) -> ArtistShort {
        ArtistShort {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn details(&self) -> ArtistDetails {
        ArtistDetails {
            id: self.id,
            name: self.name.clone(),
            genres: self.genres.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
            image_link: self.image_link.clone(),
        }
    }

    pub async fn shows<C: ConnectionTrait>(&self, db: &C) -> AppResult<Vec<super::show::Model>> {
        Ok(self
            .find_related(super::show::Entity)
            .order_by_asc(super::show::Column::Id)
            .all(db)
            .await?)
    }

    fn columns(&self) -> Columns<'_> {
        Columns {
            name: &self.name,
            city: self.city.as_deref(),
            state: self.state.as_deref(),
            phone: self.phone.as_deref(),
            seeking_description: &self.seeking_description,
            facebook_link: self.facebook_link.as_deref(),
            image_link: self.image_link.as_deref(),
            website: self.website.as_deref(),
        }
    }
}

/// An artist that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub genres: Genres,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl NewArtist {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        genres: impl Into<Genres>,
        city: impl Into<String>,
        state: impl Into<String>,
        phone: impl Into<String>,
        image_link: impl Into<String>,
        website: impl Into<String>,
        facebook_link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            genres: genres.into(),
            city: Some(city.into()),
            state: Some(state.into()),
            phone: Some(phone.into()),
            image_link: Some(image_link.into()),
            website: Some(website.into()),
            facebook_link: Some(facebook_link.into()),
            seeking_venue: false,
            seeking_description: " ".to_string(),
        }
    }

    pub fn seeking_venue(mut self, seeking_venue: bool) -> Self {
        self.seeking_venue = seeking_venue;
        self
    }

    pub fn seeking_description(mut self, description: impl Into<String>) -> Self {
        self.seeking_description = description.into();
        self
    }

    fn columns(&self) -> Columns<'_> {
        Columns {
            name: &self.name,
            city: self.city.as_deref(),
            state: self.state.as_deref(),
            phone: self.phone.as_deref(),
            seeking_description: &self.seeking_description,
            facebook_link: self.facebook_link.as_deref(),
            image_link: self.image_link.as_deref(),
            website: self.website.as_deref(),
        }
    }

    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> AppResult<Model> {
        self.columns().validate()?;

        let name = self.name.clone();
        let active = ActiveModel {
            id: NotSet,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(self.phone),
            genres: Set(self.genres),
            seeking_venue: Set(self.seeking_venue),
            seeking_description: Set(self.seeking_description),
            facebook_link: Set(self.facebook_link),
            image_link: Set(self.image_link),
            website: Set(self.website),
        };

        let artist = active
            .insert(db)
            .await
            .map_err(|e| AppError::from_named_write(e, ENTITY, &name))?;
        tracing::debug!(artist_id = artist.id, name = %artist.name, "Artist inserted");
        Ok(artist)
    }
}

/// Borrowed column values, checked against the table's length limits before a write.
struct Columns<'a> {
    name: &'a str,
    city: Option<&'a str>,
    state: Option<&'a str>,
    phone: Option<&'a str>,
    seeking_description: &'a str,
    facebook_link: Option<&'a str>,
    image_link: Option<&'a str>,
    website: Option<&'a str>,
}

impl Columns<'_> {
    fn validate(&self) -> AppResult<()> {
        validate::required(ENTITY, "name", self.name)?;
        for (field, value, max) in [
            ("name", Some(self.name), 120),
            ("city", self.city, 120),
            ("state", self.state, 120),
            ("phone", self.phone, 120),
            ("seeking_description", Some(self.seeking_description), 120),
            ("facebook_link", self.facebook_link, 120),
            ("image_link", self.image_link, 500),
            ("website", self.website, 120),
        ] {
            validate::max_len(ENTITY, field, value, max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn jane() -> Model {
        Model {
            id: 3,
            name: "Jane Doe".to_string(),
            city: Some("Oakland".to_string()),
            state: Some("CA".to_string()),
            phone: Some("510-555-0200".to_string()),
            genres: Genres::from(["Jazz"]),
            seeking_venue: false,
            seeking_description: " ".to_string(),
            facebook_link: Some("http://fb.com/jane".to_string()),
            image_link: Some("img2.png".to_string()),
            website: Some("http://jane.com".to_string()),
        }
    }

    #[test]
    fn test_short_has_only_id_and_name() {
        assert_eq!(
            serde_json::to_value(jane().short()).unwrap(),
            json!({ "id": 3, "name": "Jane Doe" })
        );
    }

    #[test]
    fn test_details_renders_every_attribute() {
        assert_eq!(
            serde_json::to_value(jane().details()).unwrap(),
            json!({
                "id": 3,
                "name": "Jane Doe",
                "genres": ["Jazz"],
                "city": "Oakland",
                "state": "CA",
                "phone": "510-555-0200",
                "website": "http://jane.com",
                "facebook_link": "http://fb.com/jane",
                "seeking_venue": false,
                "seeking_description": " ",
                "image_link": "img2.png",
            })
        );
    }

    #[test]
    fn test_constructor_argument_order() {
        let artist = NewArtist::new(
            "Jane Doe",
            ["Jazz"],
            "Oakland",
            "CA",
            "510-555-0200",
            "img2.png",
            "http://jane.com",
            "http://fb.com/jane",
        )
        .seeking_venue(true)
        .seeking_description("Looking for a Sunday residency");

        assert_eq!(artist.image_link.as_deref(), Some("img2.png"));
        assert_eq!(artist.website.as_deref(), Some("http://jane.com"));
        assert_eq!(artist.facebook_link.as_deref(), Some("http://fb.com/jane"));
        assert!(artist.seeking_venue);
        assert_eq!(artist.seeking_description, "Looking for a Sunday residency");
    }

    #[test]
    fn test_seeking_description_limit_is_narrower_than_venue() {
        let mut artist = jane();
        artist.seeking_description = "x".repeat(120);
        assert!(artist.columns().validate().is_ok());

        artist.seeking_description = "x".repeat(121);
        assert!(matches!(artist.columns().validate(), Err(AppError::Validation(_))));
    }
}
