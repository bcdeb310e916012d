//! The query document builder.
//!
//! [`QueryDocumentBuilder`] accumulates a search document across any number
//! of mutator calls and produces the canonical document on
//! [`finalize`](QueryDocumentBuilder::finalize).
//!
//! Mutators never fail. Missing or malformed input either leaves the document
//! untouched or is replaced by a value from [`BuilderDefaults`]; both cases
//! are reported as `debug` events through `tracing`.
//!
//! # Where clauses go
//!
//! | Operation | Branch |
//! |---|---|
//! | `add_match`, `add_must_match`, `add_terms`, `add_range`, `add_query_string`, `set_more_like_this` | main `must` |
//! | `add_not_match` | main `must_not` |
//! | `add_should_match` | main `should` |
//! | `add_filter`, `add_filter_object` | filter-bool branch named by [`Occur`] |
//! | `add_field_exists` | filter-bool `must` for one field, `should` for several |
//! | `add_should_match_query_string`, `add_geo_*` | filter-bool `should` |
//! | `add_must_geo_*` | filter-bool `must` |
//!
//! # Example
//!
//! ```ignore
//! use querydoc::prelude::*;
//!
//! let mut builder = QueryDocumentBuilder::new();
//! builder
//!     .add_match("my_field", "my_value", None)
//!     .set_sort_from_uris("my_field:asc")
//!     .add_filter(Occur::Must, "object.code", vec!["news", "sport"], None);
//!
//! let document = builder.finalize();
//! ```

use serde_json::{Map, Value};

use crate::{
    clause::{BoolClause, Clause, Occur, QueryClause},
    config::BuilderDefaults,
    document::SearchDocument,
    geo::{Distance, GeoPoint, GeoRelation},
    input::{Fields, OneOrMany},
    leaf::{Leaf, MatchOptions, MoreLikeThisOptions, QueryStringOptions},
    page::PaginationParams,
    sort::{Sort, SortOrder, parse_sort_uri},
};

/// Builds one search document.
///
/// A builder is a plain owned value; create one per document. Calling
/// [`build_query`](Self::build_query) yields a fresh, independent builder with
/// the same defaults.
#[derive(Debug, Clone, Default)]
pub struct QueryDocumentBuilder {
    defaults: BuilderDefaults,
    terminal: Option<QueryClause>,
    bool_clause: Option<BoolClause>,
    from: Option<u64>,
    size: Option<u64>,
    min_score: Option<f64>,
    sort: Option<Sort>,
    search_after: Option<Vec<Value>>,
    fields: Map<String, Value>,
}

impl QueryDocumentBuilder {
    /// Creates a new builder with the stock defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new builder that substitutes values from `defaults`.
    pub fn with_defaults(defaults: BuilderDefaults) -> Self {
        Self { defaults, ..Self::default() }
    }

    /// Resumes building from a previously produced document.
    ///
    /// A `bool` query keeps accumulating clauses; any other root
    /// (`match_all`, `more_like_this` or a verbatim clause) stays terminal.
    pub fn from_document(document: SearchDocument) -> Self {
        let (terminal, bool_clause) = match document.query {
            QueryClause::Bool(bool_clause) => (None, Some(bool_clause)),
            terminal => (Some(terminal), None),
        };

        Self {
            defaults: BuilderDefaults::default(),
            terminal,
            bool_clause,
            from: document.from,
            size: document.size,
            min_score: document.min_score,
            sort: document.sort,
            search_after: document.search_after,
            fields: document.fields,
        }
    }

    /// Returns a fresh builder sharing this builder's defaults.
    pub fn build_query(&self) -> Self {
        Self::with_defaults(self.defaults.clone())
    }

    /// Returns the defaults this builder substitutes.
    pub fn defaults(&self) -> &BuilderDefaults {
        &self.defaults
    }

    /// Sets `from`.
    pub fn set_from(&mut self, from: u64) -> &mut Self {
        self.from = Some(from);
        self
    }

    /// Sets `size`.
    pub fn set_size(&mut self, size: u64) -> &mut Self {
        self.size = Some(size);
        self
    }

    /// Sets `min_score`.
    pub fn set_min_score(&mut self, min_score: f64) -> &mut Self {
        self.min_score = Some(min_score);
        self
    }

    /// Sets `from` and `size` from a 1-indexed page.
    pub fn set_pagination(&mut self, params: &PaginationParams) -> &mut Self {
        self.from = Some(params.offset());
        self.size = Some(params.per_page);
        self
    }

    /// Sets an arbitrary top-level member such as `_source`.
    ///
    /// Ignored when `name` is empty or names a member the document models
    /// itself (`query`, `from`, `size`, `min_score`, `sort`, `search_after`).
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name: String = name.into();

        if name.is_empty() || SearchDocument::is_reserved(&name) {
            tracing::debug!(field = %name, "ignoring top-level field");
            return self;
        }

        self.fields.insert(name, value.into());
        self
    }

    /// Sets `search_after`, normalizing a single value into a one-element list.
    ///
    /// Ignored for `null`, `false`, `0` and the empty string.
    pub fn set_search_after(&mut self, values: impl Into<Value>) -> &mut Self {
        let values: Value = values.into();

        match values {
            value if is_falsy(&value) => {
                tracing::debug!(value = %value, "ignoring empty search_after");
            },
            Value::Array(values) => self.search_after = Some(values),
            value => self.search_after = Some(vec![value]),
        }

        self
    }

    /// Requires fields to exist.
    ///
    /// One field name goes to the filter-bool `must` (the field must exist);
    /// a sequence goes to the filter-bool `should` (any of them may exist).
    pub fn add_field_exists(&mut self, fields: impl Into<Fields>) -> &mut Self {
        let fields: Fields = fields.into();
        let occur = if fields.is_many() { Occur::Should } else { Occur::Must };

        self.push_per_field(occur, fields, |field| Leaf::exists(field))
    }

    /// Replaces `sort` with a single-field sort.
    ///
    /// Ignored when `field` is empty. An unrecognized `order` becomes the default order.
    pub fn set_sort(&mut self, field: impl Into<String>, order: &str) -> &mut Self {
        let field: String = field.into();

        if field.is_empty() {
            tracing::debug!("ignoring sort without field");
            return self;
        }

        let order = self.parse_order(order);
        self.sort = Some(Sort::field(field, order));
        self
    }

    /// Replaces `sort` with the directives parsed from `field[:order[:mode]]` URIs.
    ///
    /// URIs with an empty field are skipped; an empty list is ignored.
    pub fn set_sort_from_uris(&mut self, uris: impl Into<OneOrMany<String>>) -> &mut Self {
        let uris: OneOrMany<String> = uris.into();

        if uris.is_empty() {
            tracing::debug!("ignoring empty sort uri list");
            return self;
        }

        let sorts = uris
            .iter()
            .filter_map(|uri| {
                let sort = parse_sort_uri(uri, self.defaults.sort_order);
                if sort.is_none() {
                    tracing::debug!(uri = %uri, "skipping sort uri without field");
                }
                sort
            })
            .collect::<Vec<_>>();

        self.sort = Some(Sort::Fields(sorts));
        self
    }

    /// Replaces `sort` verbatim with a JSON array or object.
    ///
    /// Primitive values are ignored.
    pub fn set_sort_object(&mut self, sort: impl Into<Value>) -> &mut Self {
        let sort: Value = sort.into();

        match sort {
            sort @ (Value::Array(_) | Value::Object(_)) => self.sort = Some(Sort::Custom(sort)),
            sort => tracing::debug!(sort = %sort, "ignoring non-structured sort"),
        }

        self
    }

    /// Adds a `range` leaf to the main `must`.
    pub fn add_range(&mut self, field: impl Into<String>, properties: impl Into<Value>) -> &mut Self {
        self.main_bool().push(Occur::Must, Leaf::range(field, properties));
        self
    }

    /// Adds a `match`/`terms` leaf to the filter-bool branch `occur`, one per field.
    pub fn add_filter(
        &mut self,
        occur: Occur,
        fields: impl Into<Fields>,
        values: impl Into<Value>,
        options: impl Into<Option<MatchOptions>>,
    ) -> &mut Self {
        let values: Value = values.into();
        let fields: Fields = fields.into();
        let options: MatchOptions = options.into().unwrap_or_default();

        self.push_per_field(occur, fields, |field| Leaf::field_match(field, values.clone(), &options))
    }

    /// Adds a pre-built clause verbatim to the filter-bool branch `occur`.
    pub fn add_filter_object(&mut self, occur: Occur, clause: impl Into<Value>) -> &mut Self {
        self.filter_bool().push(occur, Clause::Raw(clause.into()));
        self
    }

    /// Adds a `match`/`terms` leaf to the main `must`.
    pub fn add_match(
        &mut self,
        field: impl Into<String>,
        values: impl Into<Value>,
        options: impl Into<Option<MatchOptions>>,
    ) -> &mut Self {
        let options: MatchOptions = options.into().unwrap_or_default();
        self.main_bool().push(Occur::Must, Leaf::field_match(field, values, &options));
        self
    }

    /// Adds leaves to the main `must`, one per value when `values` is an array.
    pub fn add_must_match(
        &mut self,
        field: impl Into<String>,
        values: impl Into<Value>,
        options: impl Into<Option<MatchOptions>>,
    ) -> &mut Self {
        let field: String = field.into();
        let options: MatchOptions = options.into().unwrap_or_default();
        let values: Value = values.into();

        let values = match values {
            Value::Array(values) => values,
            value => vec![value],
        };

        let main = self.main_bool();
        for value in values {
            main.push(Occur::Must, Leaf::field_match(field.clone(), value, &options));
        }

        self
    }

    /// Adds a `match`/`terms` leaf to the main `must_not`.
    pub fn add_not_match(
        &mut self,
        field: impl Into<String>,
        values: impl Into<Value>,
        options: impl Into<Option<MatchOptions>>,
    ) -> &mut Self {
        let options: MatchOptions = options.into().unwrap_or_default();
        self.main_bool().push(Occur::MustNot, Leaf::field_match(field, values, &options));
        self
    }

    /// Adds a complex `match`/`terms` leaf (`{field: {query, boost?, operator?}}`) to the main `should`.
    pub fn add_should_match(
        &mut self,
        field: impl Into<String>,
        values: impl Into<Value>,
        options: impl Into<Option<MatchOptions>>,
    ) -> &mut Self {
        let options: MatchOptions = options.into().unwrap_or_default();
        self.main_bool().push(Occur::Should, Leaf::complex_match(field, values, &options));
        self
    }

    /// Adds a `terms` leaf (or `match`, for a scalar) to the main `must`.
    pub fn add_terms(&mut self, field: impl Into<String>, values: impl Into<Value>) -> &mut Self {
        self.main_bool().push(Occur::Must, Leaf::field_match(field, values, &MatchOptions::default()));
        self
    }

    /// Adds a `query_string` leaf to the main `must`.
    pub fn add_query_string(
        &mut self,
        fields: impl Into<Fields>,
        query: impl Into<String>,
        options: impl Into<Option<QueryStringOptions>>,
    ) -> &mut Self {
        let options: QueryStringOptions = options.into().unwrap_or_default();
        self.main_bool().push(Occur::Must, Leaf::query_string(fields, query, &options));
        self
    }

    /// Same as [`add_query_string`](Self::add_query_string).
    pub fn add_must_match_query_string(
        &mut self,
        fields: impl Into<Fields>,
        query: impl Into<String>,
        options: impl Into<Option<QueryStringOptions>>,
    ) -> &mut Self {
        self.add_query_string(fields, query, options)
    }

    /// Adds a `query_string` leaf to the filter-bool `should`.
    pub fn add_should_match_query_string(
        &mut self,
        fields: impl Into<Fields>,
        query: impl Into<String>,
        options: impl Into<Option<QueryStringOptions>>,
    ) -> &mut Self {
        let options: QueryStringOptions = options.into().unwrap_or_default();
        self.filter_bool().push(Occur::Should, Leaf::query_string(fields, query, &options));
        self
    }

    /// Adds one `geo_distance` leaf per field to the filter-bool `should`.
    ///
    /// A missing distance becomes the default distance in the default unit.
    pub fn add_geo_distance(
        &mut self,
        fields: impl Into<Fields>,
        lat: f64,
        lon: f64,
        distance: impl Into<Option<Distance>>,
    ) -> &mut Self {
        self.push_geo_distance(Occur::Should, fields.into(), GeoPoint::new(lat, lon), distance.into())
    }

    /// Adds one `geo_distance` leaf per field to the filter-bool `must`.
    pub fn add_must_geo_distance(
        &mut self,
        fields: impl Into<Fields>,
        lat: f64,
        lon: f64,
        distance: impl Into<Option<Distance>>,
    ) -> &mut Self {
        self.push_geo_distance(Occur::Must, fields.into(), GeoPoint::new(lat, lon), distance.into())
    }

    /// Adds one `geo_shape` circle leaf per field to the filter-bool `should`.
    ///
    /// The relation defaults to `intersects`.
    pub fn add_geo_circle(
        &mut self,
        fields: impl Into<Fields>,
        lat: f64,
        lon: f64,
        radius: impl Into<Distance>,
        relation: impl Into<Option<GeoRelation>>,
    ) -> &mut Self {
        self.push_geo_circle(Occur::Should, fields.into(), GeoPoint::new(lat, lon), radius.into(), relation.into())
    }

    /// Adds one `geo_shape` circle leaf per field to the filter-bool `must`.
    pub fn add_must_geo_circle(
        &mut self,
        fields: impl Into<Fields>,
        lat: f64,
        lon: f64,
        radius: impl Into<Distance>,
        relation: impl Into<Option<GeoRelation>>,
    ) -> &mut Self {
        self.push_geo_circle(Occur::Must, fields.into(), GeoPoint::new(lat, lon), radius.into(), relation.into())
    }

    /// Adds one `geo_shape` point leaf per field to the filter-bool `should`.
    pub fn add_geo_location(&mut self, fields: impl Into<Fields>, lat: f64, lon: f64) -> &mut Self {
        self.push_geo_location(Occur::Should, fields.into(), GeoPoint::new(lat, lon))
    }

    /// Adds one `geo_shape` point leaf per field to the filter-bool `must`.
    pub fn add_must_geo_location(&mut self, fields: impl Into<Fields>, lat: f64, lon: f64) -> &mut Self {
        self.push_geo_location(Occur::Must, fields.into(), GeoPoint::new(lat, lon))
    }

    /// Adds a `more_like_this` leaf to the main `must`.
    ///
    /// Empty field names are dropped. Ignored when no field name is left or `id` is empty.
    pub fn set_more_like_this(
        &mut self,
        fields: impl Into<Fields>,
        id: impl Into<String>,
        options: impl Into<Option<MoreLikeThisOptions>>,
    ) -> &mut Self {
        let fields: Fields = fields.into();
        let fields = fields.into_non_empty_vec();
        let id: String = id.into();

        if fields.is_empty() || id.is_empty() {
            tracing::debug!(id = %id, "ignoring more_like_this without fields or id");
            return self;
        }

        let options: MoreLikeThisOptions = options.into().unwrap_or_default();
        let clause = Leaf::more_like_this(fields, id, &options, &self.defaults);

        self.main_bool().push(Occur::Must, clause);
        self
    }

    /// Makes the query `{match_all: value}`, overriding every other clause.
    ///
    /// Ignored unless `value` is a JSON object.
    pub fn set_match_all(&mut self, value: impl Into<Value>) -> &mut Self {
        let value: Value = value.into();

        match value {
            Value::Object(options) => self.terminal = Some(QueryClause::MatchAll(options)),
            value => tracing::debug!(value = %value, "ignoring non-object match_all"),
        }

        self
    }

    /// Produces the canonical document.
    ///
    /// A `match_all` or `more_like_this` root is returned as-is. Without any
    /// bool clause the query becomes `{bool: {must: {match_all: {}}}}`.
    /// The builder is left untouched, so repeated calls yield identical documents.
    pub fn finalize(&self) -> SearchDocument {
        let query = match (&self.terminal, &self.bool_clause) {
            (Some(terminal), _) => terminal.clone(),
            (None, Some(bool_clause)) => QueryClause::Bool(bool_clause.clone()),
            (None, None) => {
                tracing::trace!("no clauses given, matching all documents");
                QueryClause::match_everything()
            },
        };

        SearchDocument {
            query,
            from: self.from,
            size: self.size,
            min_score: self.min_score,
            sort: self.sort.clone(),
            search_after: self.search_after.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Consumes the builder and produces the canonical document.
    pub fn build(self) -> SearchDocument {
        self.finalize()
    }

    fn main_bool(&mut self) -> &mut BoolClause {
        self.bool_clause.get_or_insert_with(BoolClause::default)
    }

    fn filter_bool(&mut self) -> &mut BoolClause {
        self.main_bool().filter_bool_mut()
    }

    fn parse_order(&self, order: &str) -> SortOrder {
        order.parse().unwrap_or_else(|_| {
            tracing::debug!(order = %order, "unknown sort order, using default");
            self.defaults.sort_order
        })
    }

    fn push_geo_distance(
        &mut self,
        occur: Occur,
        fields: Fields,
        point: GeoPoint,
        distance: Option<Distance>,
    ) -> &mut Self {
        let distance = distance
            .unwrap_or(Distance::Value(self.defaults.geo_distance))
            .render(&self.defaults.geo_distance_unit);

        self.push_per_field(occur, fields, |field| Leaf::geo_distance(field, point, distance.clone()))
    }

    fn push_geo_circle(
        &mut self,
        occur: Occur,
        fields: Fields,
        point: GeoPoint,
        radius: Distance,
        relation: Option<GeoRelation>,
    ) -> &mut Self {
        let radius = radius.render(&self.defaults.geo_distance_unit);
        let relation = relation.unwrap_or(self.defaults.geo_relation);

        self.push_per_field(occur, fields, |field| Leaf::geo_circle(field, point, radius.clone(), relation))
    }

    fn push_geo_location(&mut self, occur: Occur, fields: Fields, point: GeoPoint) -> &mut Self {
        self.push_per_field(occur, fields, |field| Leaf::geo_point(field, point))
    }

    // An empty field list leaves the document untouched.
    fn push_per_field(
        &mut self,
        occur: Occur,
        fields: Fields,
        leaf: impl Fn(String) -> Clause,
    ) -> &mut Self {
        if fields.is_empty() {
            tracing::debug!(?occur, "ignoring filter without fields");
            return self;
        }

        let filter = self.filter_bool();
        for field in fields.into_vec() {
            filter.push(occur, leaf(field));
        }

        self
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(value) => !value,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(value) => value.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
