use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} named '{name}' already exists")]
    UniqueViolation { entity: &'static str, name: String },

    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    Connectivity(#[source] DbErr),

    #[error("Could not resolve {entity} {id}")]
    ReferenceResolution { entity: &'static str, id: i32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[source] DbErr),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                tracing::error!("Store connectivity error: {}", err);
                Self::Connectivity(err)
            }
            _ => {
                tracing::error!("Database error: {}", err);
                Self::Database(err)
            }
        }
    }
}

impl AppError {
    /// Maps a failed insert/update of a row with a unique `name` column.
    pub(crate) fn from_named_write(err: DbErr, entity: &'static str, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::UniqueViolation {
                entity,
                name: name.to_string(),
            },
            _ => err.into(),
        }
    }

    /// Maps a failed show insert, where the store rejected one of the foreign keys.
    pub(crate) fn from_show_write(err: DbErr, venue_id: i32, artist_id: i32) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::ReferentialIntegrity(
                format!("venue {venue_id} / artist {artist_id}: {detail}"),
            ),
            _ => err.into(),
        }
    }

    /// Maps a failed update; a vanished row becomes `NotFound`.
    pub(crate) fn from_update(err: DbErr, entity: &'static str, id: i32, name: &str) -> Self {
        match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
                Self::NotFound(format!("{entity} {id}"))
            }
            err => Self::from_named_write(err, entity, name),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
