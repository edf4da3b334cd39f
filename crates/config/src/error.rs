//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not valid TOML for [`crate::Config`]
    #[error("Invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot render configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Refused to save because one or more fields are out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unusable configuration path: {reason}")]
    BadPath { reason: String },

    #[error("Cannot back up the previous configuration: {source}")]
    Backup { source: std::io::Error },

    /// A `SHELFWISE_*` variable held a value of the wrong type
    #[error("Invalid value {value:?} in environment variable {var}")]
    EnvOverride { var: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One field that failed validation, e.g. `catalog.page_size`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}{}", got(.value))]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

fn got(value: &Option<String>) -> String {
    value
        .as_ref()
        .map(|v| format!(" (got {v})"))
        .unwrap_or_default()
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Same as [`ValidationError::new`], recording the rejected value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("ui.theme", "must be one of the known themes");
        assert_eq!(err.to_string(), "ui.theme must be one of the known themes");

        let err = ValidationError::with_value("catalog.page_size", "must be between 10 and 12", 20);
        assert_eq!(
            err.to_string(),
            "catalog.page_size must be between 10 and 12 (got 20)"
        );
    }

    #[test]
    fn test_env_override_display() {
        let err = ConfigError::EnvOverride {
            var: "SHELFWISE_CATALOG_TIMEOUT_SECS".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value \"soon\" in environment variable SHELFWISE_CATALOG_TIMEOUT_SECS"
        );
    }

    #[test]
    fn test_read_error_names_the_file() {
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/shelfwise/config.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Cannot read /etc/shelfwise/config.toml: "));
    }
}
