//! Ranking DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::ConcertResponse;
use crate::domain::RankedConcert;

/// One entry of `GET /rankings`: concert fields plus vote aggregates.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedConcertResponse {
    /// Catalog fields, flattened into the entry.
    #[serde(flatten)]
    pub concert: ConcertResponse,
    /// Number of `excited` votes.
    pub excited_votes: u64,
    /// Number of `interested` votes.
    pub interested_votes: u64,
    /// `excitedVotes + interestedVotes`.
    pub total_votes: u64,
    /// `2 * excitedVotes + interestedVotes`.
    pub weighted_score: u64,
    /// 1-based position.
    pub rank: u32,
    /// Rank at the previous computation; equals `rank`.
    pub previous_rank: u32,
    /// Movement since `previousRank`; always 0.
    pub rank_change: i64,
}

impl From<RankedConcert> for RankedConcertResponse {
    fn from(ranked: RankedConcert) -> Self {
        Self {
            excited_votes: ranked.tally.excited,
            interested_votes: ranked.tally.interested,
            total_votes: ranked.total_votes(),
            weighted_score: ranked.weighted_score(),
            rank: ranked.rank,
            previous_rank: ranked.previous_rank,
            rank_change: ranked.rank_change,
            concert: ConcertResponse::from(ranked.concert),
        }
    }
}
