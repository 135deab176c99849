//! Concert catalog entries and their identifier.
//!
//! [`Concert`] rows are static catalog data: created once by seeding or
//! import and never mutated by the voting or ranking paths.

use std::fmt;
use std::str::FromStr;

/// Database identifier of a concert.
///
/// Always positive; assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConcertId(i64);

/// Reason a raw value could not be turned into a [`ConcertId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConcertIdError {
    /// The value was not an integer.
    #[error("concert id must be an integer, got {0:?}")]
    NotNumeric(String),
    /// The value was zero or negative.
    #[error("concert id must be positive, got {0}")]
    NotPositive(i64),
}

impl ConcertId {
    /// Wraps a raw id, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ConcertIdError::NotPositive`] if `raw <= 0`.
    pub fn new(raw: i64) -> Result<Self, ConcertIdError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(ConcertIdError::NotPositive(raw))
        }
    }

    /// Wraps an id that came back from the store.
    ///
    /// Store-assigned ids are `BIGSERIAL` values and therefore positive.
    #[must_use]
    pub const fn from_db(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ConcertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConcertId {
    type Err = ConcertIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| ConcertIdError::NotNumeric(s.to_string()))?;
        Self::new(raw)
    }
}

/// A concert as stored in the catalog.
///
/// `date` and `price` are free text exactly as listed by the organizer
/// (e.g. `"Sunday at 7:00 PM"`, `"Free"`, `"From $23.18"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concert {
    /// Catalog identifier.
    pub id: ConcertId,
    /// Display title.
    pub title: String,
    /// Free-text date and time.
    pub date: String,
    /// Venue name.
    pub venue: String,
    /// Free-text price.
    pub price: String,
    /// Organizer name.
    pub organizer: String,
    /// Short description.
    pub description: String,
    /// Poster or banner image URL.
    pub image_url: String,
}

/// A catalog entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConcert {
    /// Display title.
    pub title: String,
    /// Free-text date and time.
    pub date: String,
    /// Venue name.
    pub venue: String,
    /// Free-text price.
    pub price: String,
    /// Organizer name.
    pub organizer: String,
    /// Short description.
    pub description: String,
    /// Poster or banner image URL.
    pub image_url: String,
}

impl NewConcert {
    /// Attaches a store-assigned id, producing a full [`Concert`].
    #[must_use]
    pub fn with_id(self, id: ConcertId) -> Concert {
        Concert {
            id,
            title: self.title,
            date: self.date,
            venue: self.venue,
            price: self.price,
            organizer: self.organizer,
            description: self.description,
            image_url: self.image_url,
        }
    }
}
