//! Geographic value types used by `geo_distance` and `geo_shape` leaves.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::QueryDocError;

/// A latitude/longitude pair, serialized as `{"lat": .., "lon": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Coordinates in `[lon, lat]` order, as geo shapes expect them.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// A distance or radius.
///
/// Numeric distances are rendered with the configured unit appended
/// (`30` becomes `"30km"`); pre-formatted strings such as `"678km"` are used
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Distance {
    /// A bare number, rendered with the default unit.
    Value(f64),
    /// A pre-formatted distance string.
    Formatted(String),
}

impl Distance {
    /// Renders this distance as the string the search engine expects.
    pub fn render(&self, unit: &str) -> String {
        match self {
            Distance::Value(value) => format!("{value}{unit}"),
            Distance::Formatted(value) => value.clone(),
        }
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Distance::Value(value)
    }
}

impl From<u32> for Distance {
    fn from(value: u32) -> Self {
        Distance::Value(f64::from(value))
    }
}

impl From<i32> for Distance {
    fn from(value: i32) -> Self {
        Distance::Value(f64::from(value))
    }
}

impl From<&str> for Distance {
    fn from(value: &str) -> Self {
        Distance::Formatted(value.to_string())
    }
}

impl From<String> for Distance {
    fn from(value: String) -> Self {
        Distance::Formatted(value)
    }
}

/// Spatial relation between an indexed shape and the query shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoRelation {
    #[default]
    Intersects,
    Disjoint,
    Within,
    Contains,
}

impl GeoRelation {
    /// Returns the wire name of this relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoRelation::Intersects => "intersects",
            GeoRelation::Disjoint => "disjoint",
            GeoRelation::Within => "within",
            GeoRelation::Contains => "contains",
        }
    }
}

impl FromStr for GeoRelation {
    type Err = QueryDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intersects" => Ok(GeoRelation::Intersects),
            "disjoint" => Ok(GeoRelation::Disjoint),
            "within" => Ok(GeoRelation::Within),
            "contains" => Ok(GeoRelation::Contains),
            _ => Err(QueryDocError::InvalidRelation(s.to_string())),
        }
    }
}

impl fmt::Display for GeoRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query shape of a `geo_shape` leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum Shape {
    /// A circle around `[lon, lat]`.
    Circle { coordinates: [f64; 2], radius: String },
    /// A single `[lon, lat]` point.
    Point { coordinates: [f64; 2] },
}

/// Per-field body of a `geo_shape` leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoShapeQuery {
    pub relation: GeoRelation,
    pub shape: Shape,
}
