use std::ops::Deref;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered list of genre names, stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Genres(pub Vec<String>);

impl Deref for Genres {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Genres {
    fn from(genres: Vec<String>) -> Self {
        Self(genres)
    }
}

impl From<Vec<&str>> for Genres {
    fn from(genres: Vec<&str>) -> Self {
        genres.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Genres {
    fn from(genres: [&str; N]) -> Self {
        genres.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Genres {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
