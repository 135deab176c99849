//! Ranking service: recomputes the popularity ranking on every call.

use std::sync::Arc;

use crate::domain::{RankedConcert, rank_concerts};
use crate::error::ApiError;
use crate::persistence::ConcertStore;

/// Produces the vote-weighted ranking of the whole catalog.
///
/// Nothing is cached: each call aggregates votes from storage and ranks
/// the result.
#[derive(Debug, Clone)]
pub struct RankingService {
    store: Arc<dyn ConcertStore>,
}

impl RankingService {
    /// Creates a new `RankingService`.
    #[must_use]
    pub fn new(store: Arc<dyn ConcertStore>) -> Self {
        Self { store }
    }

    /// Ranks every concert by weighted score.
    ///
    /// # Errors
    ///
    /// Propagates storage errors; never substitutes an empty ranking.
    pub async fn compute_rankings(&self) -> Result<Vec<RankedConcert>, ApiError> {
        let tallies = self.store.concert_tallies().await?;
        let ranked = rank_concerts(tallies);
        tracing::debug!(concerts = ranked.len(), "rankings computed");
        Ok(ranked)
    }
}
