//! Open Library catalog

use crate::response::{SearchResponse, WorkResponse};
use crate::{
    total_pages, Catalog, CatalogError, CatalogResult, SearchPage, SourceMetadata, SUMMARY_FAILED,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shelfwise_config::CatalogConfig;
use shelfwise_core::{cover_url, BookRecord};
use std::time::Duration;

/// Open Library search and works API
///
/// The HTTP client is built once and shared by every request; cloning is
/// cheap.
#[derive(Debug, Clone)]
pub struct OpenLibrary {
    client: Client,
    config: CatalogConfig,
}

impl OpenLibrary {
    /// Builds a catalog client from the catalog config section
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Cover image URL for a record using the configured cover service
    pub fn cover_url(&self, book: &BookRecord) -> String {
        cover_url(
            &self.config.cover_url,
            &self.config.placeholder_cover_url,
            book.cover_id,
        )
    }

    /// Fetches the description of a work
    ///
    /// Unlike [`Catalog::fetch_summary`] this reports failures.
    pub async fn work_summary(&self, work_key: &str) -> CatalogResult<String> {
        let work_key = work_key.trim().trim_matches('/');
        if work_key.is_empty() || work_key.contains('/') {
            return Err(CatalogError::InvalidQuery(format!(
                "Invalid work key: {:?}",
                work_key
            )));
        }

        let url = format!(
            "{}/{}.json",
            self.config.works_url.trim_end_matches('/'),
            work_key
        );
        let work: WorkResponse = self.get_json(self.client.get(&url)).await?;
        Ok(work.summary())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> CatalogResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CatalogError::Parse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl Catalog for OpenLibrary {
    async fn search(&self, query: &str, page: u32) -> CatalogResult<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery("Empty query".to_string()));
        }
        let page = page.max(1);

        log::debug!("Searching catalog for {:?}, page {}", query, page);
        let request = self
            .client
            .get(&self.config.search_url)
            .query(&[("q", query.to_string()), ("page", page.to_string())]);
        let response: SearchResponse = self.get_json(request).await?;

        let books: Vec<BookRecord> = response
            .docs
            .into_iter()
            .filter_map(|doc| doc.into_record())
            .take(self.config.page_size)
            .collect();

        log::info!(
            "Catalog returned {} hits for {:?}, showing {}",
            response.num_found,
            query,
            books.len()
        );

        Ok(SearchPage {
            books,
            total_results: response.num_found,
            page,
            total_pages: total_pages(response.num_found, self.config.remote_page_size),
        })
    }

    async fn fetch_summary(&self, work_key: &str) -> String {
        match self.work_summary(work_key).await {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("Failed to fetch summary for {}: {}", work_key, e);
                SUMMARY_FAILED.to_string()
            }
        }
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Open Library".to_string(),
            description: "Open, editable library catalog of published books".to_string(),
            base_url: self.config.search_url.clone(),
            requires_auth: false,
        }
    }
}
