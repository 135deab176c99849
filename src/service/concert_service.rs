//! Concert service: catalog reads and vote recording.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{Concert, ConcertId, Vote, VoteTally, VoteType};
use crate::error::ApiError;
use crate::persistence::ConcertStore;

/// Catalog lookups and the vote write path.
///
/// Stateless coordinator over an injected [`ConcertStore`]; every call
/// goes straight to storage.
#[derive(Debug, Clone)]
pub struct ConcertService {
    store: Arc<dyn ConcertStore>,
}

impl ConcertService {
    /// Creates a new `ConcertService`.
    #[must_use]
    pub fn new(store: Arc<dyn ConcertStore>) -> Self {
        Self { store }
    }

    /// Returns every concert in the catalog, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageUnavailable`] or [`ApiError::Storage`]
    /// on storage failure.
    pub async fn list_concerts(&self) -> Result<Vec<Concert>, ApiError> {
        Ok(self.store.list_concerts().await?)
    }

    /// Returns a single concert.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConcertNotFound`] if no concert has this id,
    /// or a storage error.
    pub async fn get_concert(&self, id: ConcertId) -> Result<Concert, ApiError> {
        self.store
            .get_concert(id)
            .await?
            .ok_or(ApiError::ConcertNotFound(id))
    }

    /// Validates and appends a vote.
    ///
    /// The concert is checked before the vote type, so a vote for an
    /// unknown concert is reported as not-found whatever its type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConcertNotFound`] for an unknown concert,
    /// [`ApiError::InvalidVoteType`] for a type outside
    /// `{"excited", "interested"}`, or a storage error. No vote is stored
    /// in any error case.
    pub async fn record_vote(
        &self,
        concert_id: ConcertId,
        vote_type: &str,
    ) -> Result<Vote, ApiError> {
        if self.store.get_concert(concert_id).await?.is_none() {
            return Err(ApiError::ConcertNotFound(concert_id));
        }

        let vote_type: VoteType = vote_type.parse()?;

        // The insert re-checks existence atomically.
        let vote = self
            .store
            .insert_vote(concert_id, vote_type)
            .await?
            .ok_or(ApiError::ConcertNotFound(concert_id))?;

        tracing::info!(
            vote_id = vote.id,
            %concert_id,
            vote_type = %vote.vote_type,
            "vote recorded"
        );
        Ok(vote)
    }

    /// Vote counts keyed by concert id, for concerts with at least one
    /// vote.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn vote_counts(&self) -> Result<BTreeMap<ConcertId, VoteTally>, ApiError> {
        Ok(self.store.vote_counts().await?)
    }

    /// Checks that storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn ping(&self) -> Result<(), ApiError> {
        Ok(self.store.ping().await?)
    }
}
