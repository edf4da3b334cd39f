//! Catalog book records

use serde::{Deserialize, Serialize};

/// Author shown when the catalog has no author names for a work
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Base URL of the cover image service
pub const DEFAULT_COVER_BASE: &str = "https://covers.openlibrary.org";

/// Image shown for books without a cover id
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/128x193.png?text=No+Cover";

/// A book as returned by a catalog search
///
/// `key` is the catalog identifier and is unique within a library.
/// `work_key` groups all editions of a work and is what summaries are keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BookRecordRepr")]
pub struct BookRecord {
    pub key: String,
    pub work_key: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<u64>,
}

impl BookRecord {
    /// Creates a record, deriving the work key from `key`
    ///
    /// A blank author becomes [`UNKNOWN_AUTHOR`].
    pub fn new(key: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        let key = key.into();
        let author = author.into();
        Self {
            work_key: work_key_from(&key),
            key,
            title: title.into(),
            author: if author.trim().is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                author
            },
            cover_id: None,
        }
    }

    /// Sets the cover id
    pub fn with_cover(mut self, cover_id: u64) -> Self {
        self.cover_id = Some(cover_id);
        self
    }

    /// Joins a list of author names the way the catalog displays them
    pub fn join_authors(names: &[String]) -> String {
        let joined = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            joined
        }
    }

    /// Cover image URL using the default cover service
    pub fn cover_url(&self) -> String {
        cover_url(DEFAULT_COVER_BASE, PLACEHOLDER_COVER_URL, self.cover_id)
    }
}

/// Derives the work key from a catalog key
///
/// `/works/OL45883W` becomes `OL45883W`; keys without a slash are returned as-is.
pub fn work_key_from(key: &str) -> String {
    key.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Builds a medium cover URL, or the placeholder when there is no cover id
pub fn cover_url(cover_base: &str, placeholder: &str, cover_id: Option<u64>) -> String {
    match cover_id {
        Some(id) => format!("{}/b/id/{}-M.jpg", cover_base.trim_end_matches('/'), id),
        None => placeholder.to_string(),
    }
}

/// Wire shape accepted when reading records back from storage
///
/// Older saves have no `workKey`, and some have no author.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookRecordRepr {
    key: String,
    #[serde(default)]
    work_key: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    cover_id: Option<u64>,
}

impl From<BookRecordRepr> for BookRecord {
    fn from(repr: BookRecordRepr) -> Self {
        let work_key = repr
            .work_key
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| work_key_from(&repr.key));
        let author = repr
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Self {
            key: repr.key,
            work_key,
            title: repr.title,
            author,
            cover_id: repr.cover_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_key_from_works_path() {
        assert_eq!(work_key_from("/works/OL1W"), "OL1W");
        assert_eq!(work_key_from("/works/OL45883W/"), "OL45883W");
        assert_eq!(work_key_from("OL7M"), "OL7M");
        assert_eq!(work_key_from(""), "");
    }

    #[test]
    fn test_book_new_derives_work_key() {
        let book = BookRecord::new("/works/OL1W", "Dune", "Frank Herbert");
        assert_eq!(book.key, "/works/OL1W");
        assert_eq!(book.work_key, "OL1W");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.cover_id, None);
    }

    #[test]
    fn test_blank_author_defaults() {
        let book = BookRecord::new("/works/OL2W", "Anonymous", "  ");
        assert_eq!(book.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_join_authors() {
        let names = vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()];
        assert_eq!(BookRecord::join_authors(&names), "Terry Pratchett, Neil Gaiman");
        assert_eq!(BookRecord::join_authors(&[]), UNKNOWN_AUTHOR);
        assert_eq!(BookRecord::join_authors(&["".to_string()]), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_cover_url() {
        let book = BookRecord::new("/works/OL1W", "Dune", "Frank Herbert").with_cover(12345);
        assert_eq!(
            book.cover_url(),
            "https://covers.openlibrary.org/b/id/12345-M.jpg"
        );

        let bare = BookRecord::new("/works/OL1W", "Dune", "Frank Herbert");
        assert_eq!(bare.cover_url(), PLACEHOLDER_COVER_URL);

        assert_eq!(
            cover_url("http://localhost:9000/", "none.png", Some(7)),
            "http://localhost:9000/b/id/7-M.jpg"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let book = BookRecord::new("/works/OL1W", "Dune", "Frank Herbert").with_cover(12345);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "/works/OL1W",
                "workKey": "OL1W",
                "title": "Dune",
                "author": "Frank Herbert",
                "coverId": 12345
            })
        );
    }

    #[test]
    fn test_legacy_record_without_work_key() {
        let book: BookRecord =
            serde_json::from_str(r#"{"key":"/works/OL9W","title":"Emma"}"#).unwrap();
        assert_eq!(book.work_key, "OL9W");
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.cover_id, None);
    }
}
