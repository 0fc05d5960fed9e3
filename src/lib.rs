//! Fyyur persistence layer
//!
//! Venue, Artist and Show records, their create/update operations and the
//! key/value shapes handed to the presentation layer.

pub mod config;
pub mod db;
pub mod error;
pub mod test_utils;
