use crate::CatalogResult;
use async_trait::async_trait;
use shelfwise_core::BookRecord;

/// A searchable book catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Searches for `query`, returning one page of normalized records
    ///
    /// `page` is 1-based; 0 is treated as 1.
    async fn search(&self, query: &str, page: u32) -> CatalogResult<SearchPage>;

    /// Fetches the summary text for a work
    ///
    /// Never fails: errors produce [`crate::SUMMARY_FAILED`] and works
    /// without a description produce [`crate::SUMMARY_MISSING`].
    async fn fetch_summary(&self, work_key: &str) -> String;

    /// Describes the catalog
    fn metadata(&self) -> SourceMetadata;
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub books: Vec<BookRecord>,
    /// Total hits reported by the catalog
    pub total_results: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Catalog metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub requires_auth: bool,
}
