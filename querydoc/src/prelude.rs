//! Convenient re-exports of commonly used types from querydoc.
//!
//! Import this prelude module to quickly access the most frequently used types
//! without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use querydoc::prelude::*;
//! ```

pub use querydoc_core::{
    builder::QueryDocumentBuilder,
    clause::{BoolClause, Clause, Clauses, Occur, QueryClause},
    config::BuilderDefaults,
    document::SearchDocument,
    geo::{Distance, GeoPoint, GeoRelation},
    input::{Fields, OneOrMany},
    leaf::{Leaf, LeafKind, MatchOptions, MoreLikeThisOptions, QueryStringOptions},
    page::PaginationParams,
    sort::{Sort, SortMode, SortOrder},
    error::{QueryDocError, QueryDocResult},
};
