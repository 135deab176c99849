//! Vote events and per-concert vote tallies.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::ConcertId;

/// The closed set of vote kinds a visitor can cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Strong interest; weighs double in the ranking.
    Excited,
    /// Mild interest; weighs once in the ranking.
    Interested,
}

/// Raised when a vote type string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vote type {0:?}: expected \"excited\" or \"interested\"")]
pub struct UnknownVoteType(pub String);

impl VoteType {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Interested => "interested",
        }
    }

    /// Contribution of a single vote of this type to the weighted score.
    #[must_use]
    pub const fn weight(self) -> u64 {
        match self {
            Self::Excited => 2,
            Self::Interested => 1,
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = UnknownVoteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excited" => Ok(Self::Excited),
            "interested" => Ok(Self::Interested),
            other => Err(UnknownVoteType(other.to_string())),
        }
    }
}

/// A stored vote. Votes are append-only: never updated, never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// Store-assigned identifier.
    pub id: i64,
    /// Concert the vote was cast for.
    pub concert_id: ConcertId,
    /// Kind of vote.
    pub vote_type: VoteType,
    /// Store-assigned insertion time.
    pub created_at: DateTime<Utc>,
}

/// Excited/interested counts for one concert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    /// Number of `excited` votes.
    pub excited: u64,
    /// Number of `interested` votes.
    pub interested: u64,
}

impl VoteTally {
    /// Builds a tally from raw counts.
    #[must_use]
    pub const fn new(excited: u64, interested: u64) -> Self {
        Self {
            excited,
            interested,
        }
    }

    /// Adds one vote of the given type.
    pub fn record(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::Excited => self.excited = self.excited.saturating_add(1),
            VoteType::Interested => self.interested = self.interested.saturating_add(1),
        }
    }

    /// `excited + interested`.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.excited.saturating_add(self.interested)
    }

    /// `2 * excited + 1 * interested`.
    #[must_use]
    pub const fn weighted_score(&self) -> u64 {
        (self.excited.saturating_mul(VoteType::Excited.weight()))
            .saturating_add(self.interested.saturating_mul(VoteType::Interested.weight()))
    }

    /// Returns `true` when no votes have been counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.excited == 0 && self.interested == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_the_closed_set() {
        assert_eq!("excited".parse::<VoteType>(), Ok(VoteType::Excited));
        assert_eq!("interested".parse::<VoteType>(), Ok(VoteType::Interested));
        assert_eq!(
            "loved".parse::<VoteType>(),
            Err(UnknownVoteType("loved".to_string()))
        );
        // Case matters: the stored representation is lower-case.
        assert!("Excited".parse::<VoteType>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for vote_type in [VoteType::Excited, VoteType::Interested] {
            assert_eq!(vote_type.to_string().parse::<VoteType>(), Ok(vote_type));
        }
    }

    #[test]
    fn weighted_score_doubles_excited() {
        let tally = VoteTally::new(3, 1);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.weighted_score(), 7);
    }

    #[test]
    fn empty_tally_scores_zero() {
        let tally = VoteTally::default();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.weighted_score(), 0);
    }

    #[test]
    fn record_increments_one_counter() {
        let mut tally = VoteTally::new(1, 1);
        tally.record(VoteType::Interested);
        assert_eq!(tally, VoteTally::new(1, 2));
    }
}
