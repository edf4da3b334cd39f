//! Error types for the terminal UI

use thiserror::Error;

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;

/// Errors that can occur in the TUI
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// No async runtime to run catalog requests on
    #[error("TUI must be started inside a Tokio runtime")]
    NoRuntime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TuiError::Terminal("screen error".to_string());
        assert!(err.to_string().contains("Terminal error"));
        assert!(TuiError::NoRuntime.to_string().contains("Tokio"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no tty");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }
}
