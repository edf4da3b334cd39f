//! Star rating

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 0–5 star rating; 0 means "not rated"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rating(u8);

impl Rating {
    /// Highest rating
    pub const MAX: u8 = 5;

    /// The rating every new entry starts with
    pub const UNRATED: Rating = Rating(0);

    /// Creates a rating, rejecting values above [`Rating::MAX`]
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX {
            return Err(CoreError::InvalidRating {
                value: i64::from(value),
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Creates a rating, clamping into 0–5
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(Self::MAX)) as u8)
    }

    /// Returns the number of stars
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true if the book has been rated
    pub fn is_rated(&self) -> bool {
        self.0 > 0
    }

    /// Renders the rating as filled and empty stars
    pub fn stars(&self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl TryFrom<i64> for Rating {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(0..=i64::from(Self::MAX)).contains(&value) {
            return Err(CoreError::InvalidRating {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value as u8))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Rating {
    /// Out-of-range persisted values are clamped rather than rejected
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.map(Rating::clamped).unwrap_or_default())
    }
}
