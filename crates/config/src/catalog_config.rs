//! Catalog configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Remote catalog endpoints and paging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search endpoint, queried as `?q=<query>&page=<n>`
    pub search_url: String,

    /// Work detail base, queried as `<works_url>/<work key>.json`
    pub works_url: String,

    /// Cover image service base
    pub cover_url: String,

    /// Image shown for books without a cover
    pub placeholder_cover_url: String,

    /// Results shown per page
    pub page_size: usize,

    /// Results the remote service returns per page
    pub remote_page_size: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: "https://openlibrary.org/search.json".to_string(),
            works_url: "https://openlibrary.org/works".to_string(),
            cover_url: "https://covers.openlibrary.org".to_string(),
            placeholder_cover_url: "https://via.placeholder.com/128x193.png?text=No+Cover"
                .to_string(),
            page_size: 10,
            remote_page_size: 100,
            timeout_secs: 30,
            user_agent: format!("shelfwise/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConfigSection for CatalogConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::in_range(self.page_size, 10, 12, "catalog.page_size"),
            Validator::in_range(self.remote_page_size, 1, 1000, "catalog.remote_page_size"),
            Validator::in_range(self.timeout_secs, 1, 300, "catalog.timeout_secs"),
            Validator::not_empty(&self.user_agent, "catalog.user_agent"),
        ];

        for (value, field) in [
            (&self.search_url, "catalog.search_url"),
            (&self.works_url, "catalog.works_url"),
            (&self.cover_url, "catalog.cover_url"),
            (&self.placeholder_cover_url, "catalog.placeholder_cover_url"),
        ] {
            results.push(Validator::http_url(value, field));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.search_url = other.search_url;
        self.works_url = other.works_url;
        self.cover_url = other.cover_url;
        self.placeholder_cover_url = other.placeholder_cover_url;
        self.page_size = other.page_size;
        self.remote_page_size = other.remote_page_size;
        self.timeout_secs = other.timeout_secs;
        self.user_agent = other.user_agent;
    }

    fn section_name(&self) -> &'static str {
        "catalog"
    }
}
