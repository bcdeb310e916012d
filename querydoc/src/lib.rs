//! Main querydoc crate providing a fluent builder for search-engine query documents.
//!
//! This crate is the primary entry point for users of querydoc. It re-exports
//! the core types and functionality and provides the [`build_query`] factory.
//!
//! # Features
//!
//! - **Flat bool queries** - Clauses are routed into `must`, `must_not`, `should` and the filter-bool for you
//! - **Forgiving input** - Missing or malformed input degrades to a no-op or a default, never an error
//! - **Canonical output** - Finalizing always yields exactly one of `match_all`, `bool` or `more_like_this`
//! - **Serde all the way** - Documents serialize to the JSON body a search client sends
//!
//! # Quick Start
//!
//! ```ignore
//! use querydoc::prelude::*;
//!
//! let mut builder = querydoc::build_query();
//!
//! builder
//!     .add_match("my_field", "my_value", None)
//!     .add_filter(Occur::Must, "object.code", vec!["news", "sport"], None)
//!     .set_sort_from_uris("published_at:desc")
//!     .set_size(100)
//!     .set_from(0);
//!
//! let document = builder.finalize();
//! println!("{}", document.to_json_string_pretty()?);
//! ```
//!
//! prints
//!
//! ```text
//! {
//!   "query": {
//!     "bool": {
//!       "must": [{ "match": { "my_field": "my_value" } }],
//!       "filter": { "bool": { "must": [{ "terms": { "object.code": ["news", "sport"] } }] } }
//!     }
//!   },
//!   "from": 0,
//!   "size": 100,
//!   "sort": [{ "published_at": { "order": "desc" } }]
//! }
//! ```
//!
//! # Defaults
//!
//! Values the builder substitutes (default sort order, `more_like_this`
//! thresholds, geo distance and unit) come from [`config::BuilderDefaults`]
//! and can be loaded from JSON:
//!
//! ```ignore
//! use querydoc::{config::BuilderDefaults, builder::QueryDocumentBuilder};
//!
//! let defaults = BuilderDefaults::from_json_str(r#"{ "geo_distance_unit": "mi" }"#)?;
//! let builder = QueryDocumentBuilder::with_defaults(defaults);
//! ```

pub mod prelude;

pub use querydoc_core::{builder, clause, config, document, error, geo, input, leaf, page, sort};

// Re-export JSON types for convenience
pub use serde_json;

use querydoc_core::builder::QueryDocumentBuilder;

/// Creates a fresh builder with the stock defaults.
pub fn build_query() -> QueryDocumentBuilder {
    QueryDocumentBuilder::new()
}
