//! Vote submission and vote statistics DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ConcertId, Vote, VoteTally, VoteType};

/// Request body for `POST /vote`.
///
/// `voteType` is kept as a raw string so that an unknown concert is
/// reported before an unknown vote type.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Concert to vote for.
    pub concert_id: i64,
    /// `"excited"` or `"interested"`.
    #[schema(example = "excited")]
    pub vote_type: String,
}

/// Response body for `POST /vote`: the stored vote.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    /// Vote identifier.
    pub id: i64,
    /// Concert the vote was cast for.
    pub concert_id: i64,
    /// Kind of vote.
    pub vote_type: VoteType,
    /// Server-assigned insertion time.
    pub created_at: DateTime<Utc>,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            concert_id: vote.concert_id.get(),
            vote_type: vote.vote_type,
            created_at: vote.created_at,
        }
    }
}

/// Per-concert counts in `GET /vote-stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct VoteCountsDto {
    /// Number of `excited` votes.
    pub excited: u64,
    /// Number of `interested` votes.
    pub interested: u64,
}

impl From<VoteTally> for VoteCountsDto {
    fn from(tally: VoteTally) -> Self {
        Self {
            excited: tally.excited,
            interested: tally.interested,
        }
    }
}

/// Response body for `GET /vote-stats`, keyed by concert id.
///
/// JSON object keys are strings, so concert `3` appears as `"3"`.
pub type VoteStatsResponse = BTreeMap<i64, VoteCountsDto>;

/// Builds the `GET /vote-stats` body from store counts.
#[must_use]
pub fn vote_stats_response(counts: BTreeMap<ConcertId, VoteTally>) -> VoteStatsResponse {
    counts
        .into_iter()
        .map(|(id, tally)| (id.get(), VoteCountsDto::from(tally)))
        .collect()
}
