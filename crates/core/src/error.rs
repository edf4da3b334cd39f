//! Error types for domain validation
//!
//! Domain values are small and the failures are all caller mistakes: a rating
//! outside 0–5, a status string that is not one of the three known values, or
//! a book record missing its identity. None of these are fatal; callers either
//! reject the input or fall back to a default.

use thiserror::Error;

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced while constructing or parsing domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Rating outside the 0–5 star range
    #[error("Invalid rating: {value} (must be between 0 and {max})")]
    InvalidRating { value: i64, max: u8 },

    /// Unknown reading status
    #[error("Invalid status: '{value}' (expected owned, started or finished)")]
    InvalidStatus { value: String },

    /// Book record is missing a required field
    #[error("Invalid book record: {reason}")]
    InvalidRecord { reason: String },
}

impl CoreError {
    /// Returns a short message suitable for a status bar
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRating { max, .. } => format!("Ratings go from 0 to {} stars", max),
            Self::InvalidStatus { .. } => {
                "Status must be one of: owned, started, finished".to_string()
            }
            Self::InvalidRecord { reason } => format!("Book could not be used: {}", reason),
        }
    }
}
