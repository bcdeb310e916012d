//! Sort directives for search documents.
//!
//! A document's `sort` member takes one of three shapes:
//!
//! - a single-field map, `{"field": {"order": "desc"}}`, produced by
//!   [`QueryDocumentBuilder::set_sort`](crate::builder::QueryDocumentBuilder::set_sort)
//! - an ordered list of single-field maps, produced from sort URIs
//! - a caller-supplied value kept verbatim
//!
//! # Sort URIs
//!
//! A sort URI has the form `field[:order[:mode]]`. The order falls back to the
//! default when missing or unknown, an unknown mode is dropped, and a URI with
//! an empty field is skipped entirely.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QueryDocError;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the wire name of this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(QueryDocError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a multi-valued field is reduced to a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Lowest value.
    Min,
    /// Highest value.
    Max,
    /// Sum of all values.
    Sum,
    /// Average of all values.
    Avg,
}

impl SortMode {
    /// Returns the wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Min => "min",
            SortMode::Max => "max",
            SortMode::Sum => "sum",
            SortMode::Avg => "avg",
        }
    }
}

impl FromStr for SortMode {
    type Err = QueryDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(SortMode::Min),
            "max" => Ok(SortMode::Max),
            "sum" => Ok(SortMode::Sum),
            "avg" => Ok(SortMode::Avg),
            _ => Err(QueryDocError::InvalidSortMode(s.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field sort options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortOptions {
    /// The sort direction.
    pub order: SortOrder,
    /// Optional reduction for multi-valued fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SortMode>,
}

/// A single-field sort directive, `{field: {order, mode?}}`.
pub type SortField = BTreeMap<String, SortOptions>;

/// The `sort` member of a search document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sort {
    /// Simple single-field sort map.
    Field(SortField),
    /// Ordered list of single-field sort maps.
    Fields(Vec<SortField>),
    /// Pre-built sort value, emitted verbatim.
    Custom(Value),
}

impl Sort {
    /// Creates a single-field sort map.
    pub fn field(field: impl Into<String>, order: SortOrder) -> Self {
        Sort::Field(single_field(field.into(), SortOptions { order, mode: None }))
    }
}

/// Parses one sort URI of the form `field[:order[:mode]]`.
///
/// Returns `None` when the field segment is empty.
pub fn parse_sort_uri(uri: &str, default_order: SortOrder) -> Option<SortField> {
    let mut parts = uri.split(':');

    let field = parts.next().filter(|field| !field.is_empty())?;
    let order = parts
        .next()
        .and_then(|order| order.parse::<SortOrder>().ok())
        .unwrap_or(default_order);
    let mode = parts
        .next()
        .and_then(|mode| mode.parse::<SortMode>().ok());

    Some(single_field(field.to_string(), SortOptions { order, mode }))
}

fn single_field(field: String, options: SortOptions) -> SortField {
    let mut sort = BTreeMap::new();
    sort.insert(field, options);
    sort
}
