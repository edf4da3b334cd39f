//! Reading status

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the reader is with a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    /// On the shelf, not started
    Owned,
    /// Currently reading
    Started,
    /// Read to the end
    Finished,
}

impl Default for ReadingStatus {
    fn default() -> Self {
        Self::Owned
    }
}

impl ReadingStatus {
    /// Returns all statuses in display order
    pub fn all() -> [ReadingStatus; 3] {
        [Self::Owned, Self::Started, Self::Finished]
    }

    /// Returns the lowercase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owned => "owned",
            Self::Started => "started",
            Self::Finished => "finished",
        }
    }

    /// Returns the capitalized label used in views
    pub fn label(&self) -> &'static str {
        match self {
            Self::Owned => "Owned",
            Self::Started => "Started",
            Self::Finished => "Finished",
        }
    }

    /// Cycles owned → started → finished → owned
    pub fn next(&self) -> Self {
        match self {
            Self::Owned => Self::Started,
            Self::Started => Self::Finished,
            Self::Finished => Self::Owned,
        }
    }

    /// Returns true for [`ReadingStatus::Finished`]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Deserializes a status, mapping unknown values to the default
    ///
    /// Used for persisted entries so that one bad value does not discard the
    /// whole library.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owned" => Ok(Self::Owned),
            "started" => Ok(Self::Started),
            "finished" => Ok(Self::Finished),
            _ => Err(CoreError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}
