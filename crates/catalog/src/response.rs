//! Wire shapes of the Open Library JSON responses

use crate::SUMMARY_MISSING;
use serde::Deserialize;
use shelfwise_core::BookRecord;

/// Body of `search.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
    #[serde(default, rename = "numFound")]
    pub num_found: u64,
}

/// One search hit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoc {
    pub key: Option<String>,
    pub title: Option<String>,
    pub author_name: Option<Vec<String>>,
    pub cover_i: Option<i64>,
}

impl SearchDoc {
    /// Normalizes the hit into a record; hits without a key are dropped
    pub fn into_record(self) -> Option<BookRecord> {
        let key = self.key.filter(|k| !k.trim().is_empty())?;
        let author = BookRecord::join_authors(self.author_name.as_deref().unwrap_or_default());
        let mut record = BookRecord::new(key, self.title.unwrap_or_default(), author);
        // Open Library uses -1 for "no cover" on some records
        if let Some(id) = self.cover_i.and_then(|id| u64::try_from(id).ok()) {
            if id > 0 {
                record = record.with_cover(id);
            }
        }
        Some(record)
    }
}

/// Body of `works/<key>.json`; only the description is used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkResponse {
    pub description: Option<Description>,
}

/// A work description, either plain text or a typed text object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed { value: String },
}

impl Description {
    pub fn text(&self) -> &str {
        match self {
            Description::Text(text) => text,
            Description::Typed { value } => value,
        }
    }
}

impl WorkResponse {
    /// Returns the trimmed description, or the missing-summary text
    pub fn summary(&self) -> String {
        self.description
            .as_ref()
            .map(|d| d.text().trim())
            .filter(|text| !text.is_empty())
            .unwrap_or(SUMMARY_MISSING)
            .to_string()
    }
}
