//! Vote-weighted ranking of the concert catalog.
//!
//! [`rank_concerts`] is a pure function over `(Concert, VoteTally)` pairs:
//! the store supplies one pair per concert (zero-vote concerts included)
//! and this module scores, orders, and numbers them.
//!
//! Ordering is by weighted score descending, then by concert id ascending,
//! so equal inputs always produce the same ranking regardless of the order
//! in which the store returned its rows.

use std::cmp::Ordering;

use super::{Concert, VoteTally};

/// A concert with its vote counts and position in the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedConcert {
    /// Catalog entry.
    pub concert: Concert,
    /// Raw vote counts.
    pub tally: VoteTally,
    /// 1-based position after sorting.
    pub rank: u32,
    /// Rank at the previous computation. There is no rank history, so
    /// this always equals `rank`.
    pub previous_rank: u32,
    /// `previous_rank - rank`; always zero without rank history.
    pub rank_change: i64,
}

impl RankedConcert {
    /// `excited + interested`.
    #[must_use]
    pub const fn total_votes(&self) -> u64 {
        self.tally.total()
    }

    /// `2 * excited + 1 * interested`.
    #[must_use]
    pub const fn weighted_score(&self) -> u64 {
        self.tally.weighted_score()
    }
}

/// Ranking order: higher weighted score first, then lower concert id.
fn by_score_then_id(a: &(Concert, VoteTally), b: &(Concert, VoteTally)) -> Ordering {
    b.1.weighted_score()
        .cmp(&a.1.weighted_score())
        .then_with(|| a.0.id.cmp(&b.0.id))
}

/// Scores, orders, and numbers every concert.
///
/// Ranks are contiguous `1..=N`; ties are broken by ascending concert id
/// so no two concerts share a rank.
#[must_use]
pub fn rank_concerts(mut rows: Vec<(Concert, VoteTally)>) -> Vec<RankedConcert> {
    rows.sort_by(by_score_then_id);

    rows.into_iter()
        .zip(1u32..)
        .map(|((concert, tally), rank)| RankedConcert {
            concert,
            tally,
            rank,
            previous_rank: rank,
            rank_change: 0,
        })
        .collect()
}
