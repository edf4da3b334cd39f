//! Storage errors

use std::path::PathBuf;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that cannot be used as a file name
    #[error("Invalid storage key {key:?}: only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey { key: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message() {
        let err = StorageError::InvalidKey {
            key: "../etc".to_string(),
        };
        assert!(err.to_string().starts_with("Invalid storage key \"../etc\""));
    }
}
