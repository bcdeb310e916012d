//! The finalized search document and its JSON conversions.
//!
//! A [`SearchDocument`] is what [`QueryDocumentBuilder::finalize`](crate::builder::QueryDocumentBuilder::finalize)
//! returns. It serializes to the request body a search-engine client sends;
//! optional members that were never set are left out of the JSON entirely.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, from_str, from_value, to_string, to_string_pretty, to_value};

use crate::{
    clause::QueryClause,
    error::QueryDocResult,
    sort::Sort,
};

/// A complete query document.
///
/// # Example
///
/// ```ignore
/// use querydoc::prelude::*;
///
/// let mut builder = QueryDocumentBuilder::new();
/// builder.add_match("title", "rust", None);
/// builder.set_size(10);
///
/// let body = builder.finalize().to_json_string()?;
/// // {"query":{"bool":{"must":[{"match":{"title":"rust"}}]}},"size":10}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// The root clause.
    pub query: QueryClause,
    /// Number of hits to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    /// Maximum number of hits to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Hits scoring below this are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// Cursor values for continuing a previous result set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_after: Option<Vec<Value>>,
    /// Any other top-level members, such as `_source`.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SearchDocument {
    /// Top-level names modeled by dedicated members rather than [`SearchDocument::fields`].
    pub const RESERVED_FIELDS: [&'static str; 6] =
        ["query", "from", "size", "min_score", "sort", "search_after"];

    /// Returns `true` if `name` is modeled by a dedicated member.
    pub fn is_reserved(name: &str) -> bool {
        Self::RESERVED_FIELDS.contains(&name)
    }

    /// Converts this document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> QueryDocResult<Value> {
        Ok(to_value(self)?)
    }

    /// Converts this document to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> QueryDocResult<String> {
        Ok(to_string(self)?)
    }

    /// Converts this document to an indented JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string_pretty(&self) -> QueryDocResult<String> {
        Ok(to_string_pretty(self)?)
    }

    /// Creates a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not shaped like a query document.
    pub fn from_json(value: Value) -> QueryDocResult<Self> {
        Ok(from_value(value)?)
    }

    /// Creates a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON or not shaped like a query document.
    pub fn from_json_str(input: &str) -> QueryDocResult<Self> {
        Ok(from_str(input)?)
    }
}
