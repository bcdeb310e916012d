//! Error types and result types for query document operations.
//!
//! Builder mutators never fail; they degrade to a no-op or a default instead.
//! Errors only surface at the serialization boundary and from the `FromStr`
//! implementations of the small enums ([`SortOrder`](crate::sort::SortOrder),
//! [`SortMode`](crate::sort::SortMode), [`GeoRelation`](crate::geo::GeoRelation)).
//! Use [`QueryDocResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when converting or parsing query documents.
#[derive(Error, Debug)]
pub enum QueryDocError {
    /// Serialization/deserialization error when converting a document to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The value is not a recognized sort order (`asc` or `desc`).
    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),
    /// The value is not a recognized sort mode (`min`, `max`, `sum` or `avg`).
    #[error("Invalid sort mode: {0}")]
    InvalidSortMode(String),
    /// The value is not a recognized geo shape relation.
    #[error("Invalid geo relation: {0}")]
    InvalidRelation(String),
}

/// A specialized `Result` type for query document operations.
pub type QueryDocResult<T> = Result<T, QueryDocError>;

impl From<SerdeJsonError> for QueryDocError {
    fn from(err: SerdeJsonError) -> Self {
        QueryDocError::Serialization(err.to_string())
    }
}
