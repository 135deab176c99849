//! Persistence layer: the concert catalog and the append-only vote log.
//!
//! [`ConcertStore`] is the storage handle injected into the service layer.
//! [`postgres::PostgresStore`] is the production backend;
//! [`memory::InMemoryStore`] has the same semantics and backs the tests.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod seed;

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

use crate::domain::{Concert, ConcertId, NewConcert, Vote, VoteTally, VoteType};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Storage failure taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Storage could not be reached in time: connection refused, pool
    /// exhausted, or a statement exceeded its timeout. Safe to retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Storage answered but the statement failed.
    #[error("query failed: {0}")]
    Query(String),

    /// A stored row could not be mapped back into a domain value.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Postgres `query_canceled`, raised when `statement_timeout` fires.
const PG_QUERY_CANCELED: &str = "57014";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Self::Unavailable(err.to_string()),
            sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_QUERY_CANCELED) => {
                Self::Unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::Corrupt(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Durable storage for concerts and votes.
///
/// Implementations must be safe to share between concurrent requests.
/// Each call is independent: there is no transaction spanning calls, so
/// a ranking read racing a vote insert may or may not see that vote.
#[async_trait]
pub trait ConcertStore: Send + Sync + fmt::Debug {
    /// Every concert, ordered by id.
    async fn list_concerts(&self) -> Result<Vec<Concert>, StoreError>;

    /// The concert with the given id, if any.
    async fn get_concert(&self, id: ConcertId) -> Result<Option<Concert>, StoreError>;

    /// Appends a vote for `concert_id`.
    ///
    /// The existence check and the insert are atomic: returns `Ok(None)`
    /// and writes nothing when the concert does not exist.
    async fn insert_vote(
        &self,
        concert_id: ConcertId,
        vote_type: VoteType,
    ) -> Result<Option<Vote>, StoreError>;

    /// Vote counts for every concert with at least one vote.
    async fn vote_counts(&self) -> Result<BTreeMap<ConcertId, VoteTally>, StoreError>;

    /// Every concert paired with its vote counts, zero-vote concerts
    /// included.
    async fn concert_tallies(&self) -> Result<Vec<(Concert, VoteTally)>, StoreError>;

    /// Inserts `catalog` if and only if no concert exists yet, returning
    /// the number of rows written.
    ///
    /// The emptiness check and the inserts are one atomic unit, so
    /// concurrent callers seed the catalog at most once between them.
    async fn seed_catalog(&self, catalog: &[NewConcert]) -> Result<usize, StoreError>;

    /// Round-trips to storage without touching data.
    async fn ping(&self) -> Result<(), StoreError>;
}
