//! Remote book catalog access
//!
//! [`Catalog`] is the seam the rest of Shelfwise talks to; [`OpenLibrary`]
//! is the implementation backed by the Open Library search and works APIs.

mod error;
mod open_library;
mod response;
mod traits;

pub use error::{CatalogError, CatalogResult};
pub use open_library::OpenLibrary;
pub use response::{Description, SearchDoc, SearchResponse, WorkResponse};
pub use traits::{Catalog, SearchPage, SourceMetadata};

/// Cached when a summary request fails
pub const SUMMARY_FAILED: &str = "Failed to load summary.";

/// Cached when a work has no description
pub const SUMMARY_MISSING: &str = "No summary available.";

/// Number of pages needed to show `total_results` at `per_page` per page
///
/// `per_page` of zero is treated as one.
pub fn total_pages(total_results: u64, per_page: usize) -> u32 {
    let per_page = per_page.max(1) as u64;
    let pages = total_results.div_ceil(per_page);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(250, 100), 3);
        assert_eq!(total_pages(200, 100), 2);
        assert_eq!(total_pages(1, 100), 1);
        assert_eq!(total_pages(0, 100), 0);
        assert_eq!(total_pages(5, 0), 5);
    }
}
