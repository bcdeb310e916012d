//! Builder defaults.
//!
//! [`BuilderDefaults`] holds every value the builder substitutes when an input
//! is missing or invalid. The stock values match what search engines expect
//! out of the box; any subset can be overridden from JSON.
//!
//! ```ignore
//! use querydoc::config::BuilderDefaults;
//!
//! let defaults = BuilderDefaults::from_json_str(r#"{ "geo_distance_unit": "mi" }"#)?;
//! assert_eq!(defaults.min_term_freq, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::QueryDocResult,
    geo::GeoRelation,
    sort::SortOrder,
};

/// Values substituted by the builder for missing or invalid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderDefaults {
    /// Order used when a sort order is missing or unrecognized.
    #[serde(default)]
    pub sort_order: SortOrder,

    /// `more_like_this` minimum term frequency.
    #[serde(default = "default_min_term_freq")]
    pub min_term_freq: u32,

    /// `more_like_this` maximum number of query terms.
    #[serde(default = "default_max_query_terms")]
    pub max_query_terms: u32,

    /// `more_like_this` minimum should match.
    #[serde(default = "default_minimum_should_match")]
    pub minimum_should_match: String,

    /// `more_like_this` minimum document frequency.
    #[serde(default = "default_min_doc_freq")]
    pub min_doc_freq: u32,

    /// Distance used by `geo_distance` leaves when none is given.
    #[serde(default = "default_geo_distance")]
    pub geo_distance: f64,

    /// Unit appended to numeric distances.
    #[serde(default = "default_geo_distance_unit")]
    pub geo_distance_unit: String,

    /// Relation used by geo circle leaves when none is given.
    #[serde(default)]
    pub geo_relation: GeoRelation,
}

fn default_min_term_freq() -> u32 {
    3
}

fn default_max_query_terms() -> u32 {
    12
}

fn default_minimum_should_match() -> String {
    "30%".to_string()
}

fn default_min_doc_freq() -> u32 {
    1
}

fn default_geo_distance() -> f64 {
    30.0
}

fn default_geo_distance_unit() -> String {
    "km".to_string()
}

impl Default for BuilderDefaults {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::default(),
            min_term_freq: default_min_term_freq(),
            max_query_terms: default_max_query_terms(),
            minimum_should_match: default_minimum_should_match(),
            min_doc_freq: default_min_doc_freq(),
            geo_distance: default_geo_distance(),
            geo_distance_unit: default_geo_distance_unit(),
            geo_relation: GeoRelation::default(),
        }
    }
}

impl BuilderDefaults {
    /// Parses defaults from a JSON object; missing keys take their stock value.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON or a value has the wrong type.
    pub fn from_json_str(input: &str) -> QueryDocResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
