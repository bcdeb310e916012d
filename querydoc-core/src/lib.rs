//! A fluent builder for search-engine query documents.
//!
//! This crate is the core of the querydoc project and provides:
//!
//! - **Query document builder** ([`builder`]) - Accumulates clauses and produces the canonical document
//! - **Clause tree** ([`clause`]) - The `match_all`/`bool`/`more_like_this` model and its leaves
//! - **Leaf constructors** ([`leaf`]) - Stateless constructors for match, terms, range, query string, geo and more-like-this leaves
//! - **Sort directives** ([`sort`]) - Sort orders, modes and `field:order:mode` URIs
//! - **Geo types** ([`geo`]) - Points, distances, relations and shapes
//! - **Search documents** ([`document`]) - The finalized document and its JSON conversions
//! - **Configuration** ([`config`]) - Defaults substituted for missing or invalid input
//! - **Pagination** ([`page`]) - Page-based `from`/`size` parameters
//! - **Input shapes** ([`input`]) - Single-or-many arguments
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use querydoc_core::builder::QueryDocumentBuilder;
//!
//! let mut builder = QueryDocumentBuilder::new();
//! builder.add_match("my_field", "my_value", None);
//! builder.set_size(100);
//!
//! // {"query":{"bool":{"must":[{"match":{"my_field":"my_value"}}]}},"size":100}
//! let body = builder.finalize().to_json_string()?;
//! ```

pub mod builder;
pub mod clause;
pub mod config;
pub mod document;
pub mod error;
pub mod geo;
pub mod input;
pub mod leaf;
pub mod page;
pub mod sort;
