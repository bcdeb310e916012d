//! Leaf clause construction.
//!
//! [`Leaf`] gathers the stateless constructors the builder uses for every leaf
//! clause it appends. Each one is a pure function of its arguments, so they
//! can also be used directly to prepare clauses for
//! [`add_filter_object`](crate::builder::QueryDocumentBuilder::add_filter_object)
//! or custom documents.
//!
//! # Leaf kind selection
//!
//! `match` and `terms` leaves share one entry point: a JSON array value
//! selects `terms`, anything else selects `match`. [`MatchOptions::kind`]
//! overrides the choice.
//!
//! ```ignore
//! use querydoc::leaf::{Leaf, MatchOptions};
//!
//! // {"terms": {"tags": ["a", "b"]}}
//! let clause = Leaf::field_match("tags", vec!["a", "b"], &MatchOptions::default());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    clause::{
        Clause, DocumentRef, ExistsClause, FieldMap, GeoDistanceClause, MoreLikeThisClause,
        QueryStringClause,
    },
    config::BuilderDefaults,
    geo::{GeoPoint, GeoRelation, GeoShapeQuery, Shape},
    input::Fields,
};

/// The two field-matching leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafKind {
    /// Full-text match against a single value.
    Match,
    /// Exact match against any of several values.
    Terms,
}

impl LeafKind {
    /// Selects `terms` for JSON arrays and `match` for everything else.
    pub fn for_value(value: &Value) -> Self {
        if value.is_array() { LeafKind::Terms } else { LeafKind::Match }
    }
}

/// Options for `match`/`terms` leaves.
///
/// `boost` and `operator` only appear in the complex leaf form
/// (`{field: {query, boost, operator}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Forces the leaf kind instead of selecting it from the value.
    #[serde(rename = "type")]
    pub kind: Option<LeafKind>,
    pub boost: Option<f64>,
    pub operator: Option<String>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: LeafKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

/// Options for `query_string` leaves.
///
/// Flags are emitted only when set; the other options only when set to a non-empty or non-zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryStringOptions {
    pub use_dis_max: bool,
    pub auto_generate_phrase_queries: bool,
    pub boost: Option<f64>,
    pub default_operator: Option<String>,
    #[serde(rename = "type")]
    pub query_type: Option<String>,
}

impl QueryStringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_use_dis_max(mut self, use_dis_max: bool) -> Self {
        self.use_dis_max = use_dis_max;
        self
    }

    pub fn with_auto_generate_phrase_queries(mut self, enabled: bool) -> Self {
        self.auto_generate_phrase_queries = enabled;
        self
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn with_default_operator(mut self, operator: impl Into<String>) -> Self {
        self.default_operator = Some(operator.into());
        self
    }

    pub fn with_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }
}

/// Options for `more_like_this` leaves.
///
/// Thresholds left unset, or set to zero/empty, fall back to [`BuilderDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoreLikeThisOptions {
    pub min_term_freq: Option<u32>,
    pub max_query_terms: Option<u32>,
    pub minimum_should_match: Option<String>,
    pub min_doc_freq: Option<u32>,
    /// Index of the reference document.
    #[serde(alias = "_index")]
    pub index: Option<String>,
    /// Mapping type of the reference document.
    #[serde(alias = "_type")]
    pub doc_type: Option<String>,
}

impl MoreLikeThisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_term_freq(mut self, value: u32) -> Self {
        self.min_term_freq = Some(value);
        self
    }

    pub fn with_max_query_terms(mut self, value: u32) -> Self {
        self.max_query_terms = Some(value);
        self
    }

    pub fn with_minimum_should_match(mut self, value: impl Into<String>) -> Self {
        self.minimum_should_match = Some(value.into());
        self
    }

    pub fn with_min_doc_freq(mut self, value: u32) -> Self {
        self.min_doc_freq = Some(value);
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }
}

/// Stateless constructors for leaf clauses.
pub struct Leaf;

impl Leaf {
    /// Resolves the leaf kind for `value`, honoring an explicit override.
    pub fn kind_for(value: &Value, options: &MatchOptions) -> LeafKind {
        options.kind.unwrap_or_else(|| LeafKind::for_value(value))
    }

    /// Creates a flat `match`/`terms` leaf, `{kind: {field: value}}`.
    pub fn field_match(field: impl Into<String>, value: impl Into<Value>, options: &MatchOptions) -> Clause {
        let value = value.into();
        let kind = Self::kind_for(&value, options);

        Self::keyed_leaf(kind, keyed(field.into(), value))
    }

    /// Creates a complex `match`/`terms` leaf, `{kind: {field: {query, boost?, operator?}}}`.
    pub fn complex_match(field: impl Into<String>, value: impl Into<Value>, options: &MatchOptions) -> Clause {
        let value = value.into();
        let kind = Self::kind_for(&value, options);

        let mut body = Map::new();
        body.insert("query".to_string(), value);

        if let Some(boost) = non_zero_boost(options.boost) {
            body.insert("boost".to_string(), Value::from(boost));
        }

        if let Some(operator) = non_empty(&options.operator) {
            body.insert("operator".to_string(), Value::from(operator));
        }

        Self::keyed_leaf(kind, keyed(field.into(), Value::Object(body)))
    }

    /// Creates a `range` leaf, `{range: {field: properties}}`.
    pub fn range(field: impl Into<String>, properties: impl Into<Value>) -> Clause {
        Clause::Range(keyed(field.into(), properties.into()))
    }

    /// Creates an `exists` leaf, `{exists: {field}}`.
    pub fn exists(field: impl Into<String>) -> Clause {
        Clause::Exists(ExistsClause { field: field.into() })
    }

    /// Creates a `query_string` leaf over one or more fields.
    pub fn query_string(fields: impl Into<Fields>, query: impl Into<String>, options: &QueryStringOptions) -> Clause {
        Clause::QueryString(QueryStringClause {
            fields: fields.into(),
            query: query.into(),
            use_dis_max: options.use_dis_max.then_some(true),
            auto_generate_phrase_queries: options.auto_generate_phrase_queries.then_some(true),
            boost: non_zero_boost(options.boost),
            default_operator: non_empty(&options.default_operator).map(str::to_string),
            query_type: non_empty(&options.query_type).map(str::to_string),
        })
    }

    /// Creates a `geo_distance` leaf for a single field.
    pub fn geo_distance(field: impl Into<String>, point: GeoPoint, distance: impl Into<String>) -> Clause {
        let mut points = BTreeMap::new();
        points.insert(field.into(), point);

        Clause::GeoDistance(GeoDistanceClause { distance: distance.into(), points })
    }

    /// Creates a `geo_shape` circle leaf centered on `point`.
    pub fn geo_circle(
        field: impl Into<String>,
        point: GeoPoint,
        radius: impl Into<String>,
        relation: GeoRelation,
    ) -> Clause {
        Self::geo_shape(
            field.into(),
            GeoShapeQuery {
                relation,
                shape: Shape::Circle { coordinates: point.coordinates(), radius: radius.into() },
            },
        )
    }

    /// Creates a `geo_shape` point leaf; the indexed shape must contain the point.
    pub fn geo_point(field: impl Into<String>, point: GeoPoint) -> Clause {
        Self::geo_shape(
            field.into(),
            GeoShapeQuery {
                relation: GeoRelation::Contains,
                shape: Shape::Point { coordinates: point.coordinates() },
            },
        )
    }

    /// Creates a `more_like_this` leaf referencing the document `id`.
    pub fn more_like_this(
        fields: Vec<String>,
        id: impl Into<String>,
        options: &MoreLikeThisOptions,
        defaults: &BuilderDefaults,
    ) -> Clause {
        Clause::MoreLikeThis(MoreLikeThisClause {
            fields,
            min_term_freq: non_zero(options.min_term_freq).unwrap_or(defaults.min_term_freq),
            max_query_terms: non_zero(options.max_query_terms).unwrap_or(defaults.max_query_terms),
            minimum_should_match: non_empty(&options.minimum_should_match)
                .unwrap_or(defaults.minimum_should_match.as_str())
                .to_string(),
            min_doc_freq: non_zero(options.min_doc_freq).unwrap_or(defaults.min_doc_freq),
            docs: vec![DocumentRef {
                id: id.into(),
                index: non_empty(&options.index).map(str::to_string),
                doc_type: non_empty(&options.doc_type).map(str::to_string),
            }],
        })
    }

    fn keyed_leaf(kind: LeafKind, body: FieldMap) -> Clause {
        match kind {
            LeafKind::Match => Clause::Match(body),
            LeafKind::Terms => Clause::Terms(body),
        }
    }

    fn geo_shape(field: String, query: GeoShapeQuery) -> Clause {
        let mut body = BTreeMap::new();
        body.insert(field, query);

        Clause::GeoShape(body)
    }
}

fn keyed(field: String, value: Value) -> FieldMap {
    let mut body = Map::new();
    body.insert(field, value);
    body
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|value| *value != 0)
}

fn non_zero_boost(value: Option<f64>) -> Option<f64> {
    value.filter(|value| *value != 0.0)
}
