//! Page-based pagination parameters.
//!
//! Search documents page with `from`/`size`. [`PaginationParams`] lets callers
//! think in 1-indexed pages instead and converts to the offset form.

use serde::{Deserialize, Serialize};

/// Parameters for paginating through large result sets.
///
/// Pages are 1-indexed; page `0` is treated as the first page.
///
/// # Example
///
/// ```ignore
/// use querydoc::page::PaginationParams;
///
/// let params = PaginationParams::new(3, 20);
/// assert_eq!(params.offset(), 40);  // Skip 40 hits for page 3
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// The page number (1-indexed).
    pub page: u64,
    /// Number of hits per page.
    pub per_page: u64,
}

impl PaginationParams {
    /// Creates new pagination parameters.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Calculates the number of hits to skip for this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: 1, per_page: 10 }
    }
}
