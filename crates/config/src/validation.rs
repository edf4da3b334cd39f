//! Section validation
//!
//! Each section of [`crate::Config`] implements [`ConfigSection`]. The
//! [`Validator`] checks return one [`ValidationError`] per bad field so a
//! section can report all of them at once.

use std::fmt::Display;

pub use crate::error::ValidationError;

pub trait ConfigSection: Default {
    /// All field errors of the section, or `Ok` when it is usable as is
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Overlays `other` onto `self`; fields of `other` win
    fn merge(&mut self, other: Self);

    /// TOML table name, used as the prefix of field paths
    fn section_name(&self) -> &'static str;
}

pub struct Validator;

impl Validator {
    /// `min..=max`, inclusive on both ends
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + Display + Copy,
    {
        if (min..=max).contains(&value) {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            format!("must be between {min} and {max}"),
            value,
        ))
    }

    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        match value.trim() {
            "" => Err(ValidationError::new(field, "must not be empty")),
            _ => Ok(()),
        }
    }

    pub fn one_of<T>(value: &T, allowed: &[T], field: &str) -> Result<(), ValidationError>
    where
        T: PartialEq + Display,
    {
        if allowed.contains(value) {
            return Ok(());
        }
        let choices: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        Err(ValidationError::with_value(
            field,
            format!("must be one of: {}", choices.join(", ")),
            value,
        ))
    }

    /// Absolute `http://` or `https://` URL with a host
    pub fn http_url(value: &str, field: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match host {
            Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
            _ => Err(ValidationError::with_value(
                field,
                "must be an http:// or https:// URL",
                value,
            )),
        }
    }

    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert!(Validator::in_range(10, 10, 12, "catalog.page_size").is_ok());
        assert!(Validator::in_range(12, 10, 12, "catalog.page_size").is_ok());
        assert!(Validator::in_range(9, 10, 12, "catalog.page_size").is_err());
        assert!(Validator::in_range(13, 10, 12, "catalog.page_size").is_err());
    }

    #[test]
    fn test_range_error_records_value() {
        let err = Validator::in_range(0u64, 1, 60, "ui.notice_secs").unwrap_err();
        assert_eq!(err.field, "ui.notice_secs");
        assert_eq!(err.value.as_deref(), Some("0"));
    }

    #[test]
    fn test_blank_user_agent() {
        assert!(Validator::not_empty("shelfwise/0.1", "catalog.user_agent").is_ok());
        assert!(Validator::not_empty("   ", "catalog.user_agent").is_err());
    }

    #[test]
    fn test_theme_choice() {
        assert!(Validator::one_of(&"nord", &["dark", "nord"], "ui.theme").is_ok());

        let err = Validator::one_of(&"neon", &["dark", "nord"], "ui.theme").unwrap_err();
        assert_eq!(err.message, "must be one of: dark, nord");
    }

    #[test]
    fn test_http_url() {
        assert!(Validator::http_url("https://openlibrary.org/search.json", "u").is_ok());
        assert!(Validator::http_url("http://127.0.0.1:8080", "u").is_ok());
        assert!(Validator::http_url("ftp://example.org", "u").is_err());
        assert!(Validator::http_url("https://", "u").is_err());
        assert!(Validator::http_url("", "u").is_err());
    }

    #[test]
    fn test_all_errors_are_kept() {
        assert!(Validator::collect_errors(vec![Ok(()), Ok(())]).is_ok());

        let errors = Validator::collect_errors(vec![
            Ok(()),
            Err(ValidationError::new("catalog.page_size", "too small")),
            Err(ValidationError::new("ui.theme", "unknown")),
        ])
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
