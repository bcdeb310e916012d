//! The clause tree of a search document.
//!
//! The root of a finalized document's `query` is a [`QueryClause`]: one of
//! `match_all`, `bool` or `more_like_this`, or a verbatim root kept from a
//! resumed document. Boolean branches hold
//! [`Clause`] values, which cover the leaf kinds the builder produces plus an
//! opaque [`Clause::Raw`] escape hatch for pre-built clauses.
//!
//! Typed leaf bodies reject keys they do not model, so a parsed clause carrying
//! extra options falls back to `Raw` and is written back unchanged.
//!
//! # Shape
//!
//! ```text
//! {
//!   "bool": {
//!     "must":     [ <clause>, ... ],
//!     "must_not": [ <clause>, ... ],
//!     "should":   [ <clause>, ... ],
//!     "filter":   { "bool": { "must": [..], "must_not": [..], "should": [..] } }
//!   }
//! }
//! ```
//!
//! The nested `filter.bool` is the "filter-bool": constraints that restrict
//! the result set without contributing to scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    geo::{GeoPoint, GeoShapeQuery},
    input::Fields,
};

/// A JSON object keyed by field name.
pub type FieldMap = Map<String, Value>;

/// Boolean branch a clause is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// All clauses must match (AND).
    Must,
    /// No clause may match (NOT).
    MustNot,
    /// Any clause may match (OR).
    Should,
}

/// The root clause of a finalized query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    /// Matches every document.
    MatchAll(FieldMap),
    /// Boolean combination of sub-clauses.
    Bool(BoolClause),
    /// Documents similar to the referenced ones.
    MoreLikeThis(MoreLikeThisClause),
    /// Any other root read back from JSON, emitted verbatim.
    #[serde(untagged)]
    Raw(Value),
}

impl QueryClause {
    /// The universal match, `{"bool": {"must": {"match_all": {}}}}`.
    pub fn match_everything() -> Self {
        QueryClause::Bool(BoolClause {
            must: Some(Clauses::One(Box::new(Clause::MatchAll(Map::new())))),
            ..BoolClause::default()
        })
    }
}

/// A node in a boolean branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    MatchAll(FieldMap),
    Bool(BoolClause),
    Match(FieldMap),
    Terms(FieldMap),
    Range(FieldMap),
    Exists(ExistsClause),
    QueryString(QueryStringClause),
    GeoDistance(GeoDistanceClause),
    GeoShape(BTreeMap<String, GeoShapeQuery>),
    MoreLikeThis(MoreLikeThisClause),
    /// A pre-built clause, emitted verbatim.
    #[serde(untagged)]
    Raw(Value),
}

/// The members of a boolean branch.
///
/// Branches built by the builder are always lists. A single clause object is
/// kept as such so that `{"must": {"match_all": {}}}` survives unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Clauses {
    Many(Vec<Clause>),
    One(Box<Clause>),
}

impl Clauses {
    /// Appends a clause, turning a single clause object into a list first.
    pub fn push(&mut self, clause: Clause) {
        *self = match std::mem::replace(self, Clauses::Many(Vec::new())) {
            Clauses::Many(mut clauses) => {
                clauses.push(clause);
                Clauses::Many(clauses)
            },
            Clauses::One(existing) => Clauses::Many(vec![*existing, clause]),
        };
    }

    /// Number of clauses in this branch.
    pub fn len(&self) -> usize {
        match self {
            Clauses::Many(clauses) => clauses.len(),
            Clauses::One(_) => 1,
        }
    }

    /// Returns `true` if the branch holds no clause.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `bool` clause with its four optional branches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must: Option<Clauses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_not: Option<Clauses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should: Option<Clauses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Box<FilterClause>>,
    /// Bool options such as `minimum_should_match` or `boost`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BoolClause {
    /// Appends a clause to the given branch, creating the branch if needed.
    pub fn push(&mut self, occur: Occur, clause: Clause) {
        let branch = match occur {
            Occur::Must => &mut self.must,
            Occur::MustNot => &mut self.must_not,
            Occur::Should => &mut self.should,
        };

        branch.get_or_insert_with(|| Clauses::Many(Vec::new())).push(clause);
    }

    /// Returns the branch for `occur`, if it exists.
    pub fn branch(&self, occur: Occur) -> Option<&Clauses> {
        match occur {
            Occur::Must => self.must.as_ref(),
            Occur::MustNot => self.must_not.as_ref(),
            Occur::Should => self.should.as_ref(),
        }
    }

    /// Returns the nested filter-bool, creating an empty one if needed.
    pub fn filter_bool_mut(&mut self) -> &mut BoolClause {
        &mut self
            .filter
            .get_or_insert_with(|| Box::new(FilterClause::default()))
            .bool_clause
    }
}

/// The `filter` member of a bool clause, `{"bool": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterClause {
    #[serde(rename = "bool")]
    pub bool_clause: BoolClause,
}

/// `{"exists": {"field": ..}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExistsClause {
    pub field: String,
}

/// `{"query_string": {..}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryStringClause {
    pub fields: Fields,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_dis_max: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generate_phrase_queries: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
}

/// `{"geo_distance": {"distance": "30km", "<field>": {"lat": .., "lon": ..}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoDistanceClause {
    pub distance: String,
    #[serde(flatten)]
    pub points: BTreeMap<String, GeoPoint>,
}

/// `{"more_like_this": {..}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoreLikeThisClause {
    pub fields: Vec<String>,
    pub min_term_freq: u32,
    pub max_query_terms: u32,
    pub minimum_should_match: String,
    pub min_doc_freq: u32,
    pub docs: Vec<DocumentRef>,
}

/// A reference document for `more_like_this`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn exists(field: &str) -> Clause {
        Clause::Exists(ExistsClause { field: field.to_string() })
    }

    #[test]
    fn match_everything_shape() {
        let value = serde_json::to_value(QueryClause::match_everything()).unwrap();
        assert_eq!(value, json!({ "bool": { "must": { "match_all": {} } } }));
    }

    #[test]
    fn push_creates_list_branches_lazily() {
        let mut clause = BoolClause::default();
        clause.push(Occur::Should, exists("a"));

        assert!(clause.must.is_none());
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({ "should": [{ "exists": { "field": "a" } }] })
        );
    }

    #[test]
    fn push_onto_single_clause_converts_to_list() {
        let mut clauses = Clauses::One(Box::new(exists("a")));
        clauses.push(exists("b"));

        assert_eq!(clauses.len(), 2);
        assert_eq!(
            serde_json::to_value(&clauses).unwrap(),
            json!([{ "exists": { "field": "a" } }, { "exists": { "field": "b" } }])
        );
    }

    #[test]
    fn filter_bool_nests_under_bool_key() {
        let mut clause = BoolClause::default();
        clause.filter_bool_mut().push(Occur::Must, exists("a"));

        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({ "filter": { "bool": { "must": [{ "exists": { "field": "a" } }] } } })
        );
    }

    #[test]
    fn raw_clause_is_emitted_verbatim() {
        let raw = json!({ "nested": { "path": "comments", "query": { "match_all": {} } } });
        let value = serde_json::to_value(Clause::Raw(raw.clone())).unwrap();

        assert_eq!(value, raw);
    }

    #[test]
    fn unknown_clause_kind_deserializes_as_raw() {
        let raw = json!({ "prefix": { "user": "ki" } });
        let clause: Clause = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(clause, Clause::Raw(raw));
    }

    #[test]
    fn leaf_with_extra_keys_deserializes_as_raw() {
        let raw = json!({ "exists": { "field": "x", "boost": 2.0 } });
        let clause: Clause = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(clause, Clause::Raw(raw));

        let raw = json!({ "query_string": { "fields": ["t"], "query": "q", "analyzer": "english" } });
        let clause: Clause = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(clause, Clause::Raw(raw));
    }

    #[test]
    fn bool_options_survive_parsing() {
        let value = json!({ "bool": { "should": [{ "exists": { "field": "a" } }], "minimum_should_match": 1 } });
        let clause: Clause = serde_json::from_value(value.clone()).unwrap();

        let Clause::Bool(bool_clause) = &clause else {
            panic!("expected a bool clause, got {clause:?}");
        };
        assert_eq!(bool_clause.extra.get("minimum_should_match"), Some(&json!(1)));
        assert_eq!(serde_json::to_value(&clause).unwrap(), value);
    }

    #[test]
    fn unknown_root_deserializes_as_raw() {
        let raw = json!({ "function_score": { "query": { "match_all": {} } } });
        let clause: QueryClause = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(clause, QueryClause::Raw(raw));
    }

    #[test]
    fn document_ref_omits_missing_index_and_type() {
        let doc = DocumentRef { id: "1".to_string(), index: None, doc_type: None };
        assert_eq!(serde_json::to_value(doc).unwrap(), json!({ "_id": "1" }));
    }
}
