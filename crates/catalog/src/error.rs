use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from catalog requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The server answered with a non-success status
    #[error("HTTP {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// The HTTP client could not be built
    #[error("Client setup failed: {0}")]
    Client(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else if err.is_builder() {
            CatalogError::Client(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}
