use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ConnectionTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::db::genres::Genres;
use crate::db::validate;
use crate::error::{AppError, Result as AppResult};

const ENTITY: &str = "Venue";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Venue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: Genres,
    pub seeking_description: String,
    pub seeking_talent: bool,
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

/// `{id, name}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueShort {
    pub id: i32,
    pub name: String,
}

/// `{id, name, city, state}`, used for the city/state grouped listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueLong {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueDetails {
    pub id: i32,
    pub name: String,
    pub genres: Genres,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: Option<String>,
}

impl Model {
    /// Writes the current field values back to the stored row.
    ///
    /// Calling this without having changed anything rewrites identical values.
    pub async fn update<C: ConnectionTrait>(&self, db: &C) -> AppResult<Model> {
        self.columns().validate()?;

        let active = ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            address: Set(self.address.clone()),
            phone: Set(self.phone.clone()),
            genres: Set(self.genres.clone()),
            seeking_description: Set(self.seeking_description.clone()),
            seeking_talent: Set(self.seeking_talent),
            facebook_link: Set(self.facebook_link.clone()),
            image_link: Set(self.image_link.clone()),
            website: Set(self.website.clone()),
        };

        let updated = active
            .update(db)
            .await
            .map_err(|e| AppError::from_update(e, ENTITY, self.id, &self.name))?;
        tracing::debug!(venue_id = updated.id, name = %updated.name, "Venue updated");
        Ok(updated)
    }

    pub fn short(&self) -> VenueShort {
        VenueShort {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn long(&self) -> VenueLong {
        VenueLong {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }

    pub fn details(&self) -> VenueDetails {
        VenueDetails {
            id: self.id,
            name: self.name.clone(),
            genres: self.genres.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
            image_link: self.image_link.clone(),
        }
    }

    /// All shows hosted at this venue, in insertion order.
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
            address: self.address.as_deref(),
            phone: self.phone.as_deref(),
            seeking_description: &self.seeking_description,
            facebook_link: self.facebook_link.as_deref(),
            image_link: self.image_link.as_deref(),
            website: self.website.as_deref(),
        }
    }
}

/// A venue that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub genres: Genres,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl NewVenue {
    /// Builds an unsaved venue. `seeking_talent` starts false and
    /// `seeking_description` starts as a single space.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        genres: impl Into<Genres>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        phone: impl Into<String>,
        website: impl Into<String>,
        facebook_link: impl Into<String>,
        image_link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            genres: genres.into(),
            address: Some(address.into()),
            city: Some(city.into()),
            state: Some(state.into()),
            phone: Some(phone.into()),
            website: Some(website.into()),
            facebook_link: Some(facebook_link.into()),
            image_link: Some(image_link.into()),
            seeking_talent: false,
            seeking_description: " ".to_string(),
        }
    }

    pub fn seeking_talent(mut self, seeking_talent: bool) -> Self {
        self.seeking_talent = seeking_talent;
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
            address: self.address.as_deref(),
            phone: self.phone.as_deref(),
            seeking_description: &self.seeking_description,
            facebook_link: self.facebook_link.as_deref(),
            image_link: self.image_link.as_deref(),
            website: self.website.as_deref(),
        }
    }

    /// Stores the venue as a new row and returns it with its assigned id.
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> AppResult<Model> {
        self.columns().validate()?;

        let name = self.name.clone();
        let active = ActiveModel {
            id: NotSet,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            genres: Set(self.genres),
            seeking_description: Set(self.seeking_description),
            seeking_talent: Set(self.seeking_talent),
            facebook_link: Set(self.facebook_link),
            image_link: Set(self.image_link),
            website: Set(self.website),
        };

        let venue = active
            .insert(db)
            .await
            .map_err(|e| AppError::from_named_write(e, ENTITY, &name))?;
        tracing::debug!(venue_id = venue.id, name = %venue.name, "Venue inserted");
        Ok(venue)
    }
}

/// Borrowed column values, checked against the table's length limits before a write.
struct Columns<'a> {
    name: &'a str,
    city: Option<&'a str>,
    state: Option<&'a str>,
    address: Option<&'a str>,
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
            ("address", self.address, 120),
            ("phone", self.phone, 120),
            ("seeking_description", Some(self.seeking_description), 500),
            ("facebook_link", self.facebook_link, 120),
            ("image_link", self.image_link, 500),
            ("website", self.website, 120),
        ] {
            validate::max_len(ENTITY, field, value, max)?;
        }
        Ok(())
    }
}
