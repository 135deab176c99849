//! In-memory implementation of the concert store.
//!
//! Mirrors the PostgreSQL semantics (server-assigned ids and timestamps,
//! atomic existence check on vote insert, left-outer tallies) without a
//! database. An outage switch lets tests exercise the transient-failure
//! path.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ConcertStore, StoreError};
use crate::domain::{Concert, ConcertId, NewConcert, Vote, VoteTally, VoteType};

#[derive(Debug, Default)]
struct State {
    concerts: BTreeMap<ConcertId, Concert>,
    votes: Vec<Vote>,
    last_concert_id: i64,
    last_vote_id: i64,
}

/// Thread-safe in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `concerts`, assigning ids
    /// `1..=N` in order.
    #[must_use]
    pub fn with_concerts(concerts: impl IntoIterator<Item = NewConcert>) -> Self {
        let mut state = State::default();
        for concert in concerts {
            state.last_concert_id += 1;
            let id = ConcertId::from_db(state.last_concert_id);
            state.concerts.insert(id, concert.with_id(id));
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            unavailable: Arc::default(),
        }
    }

    /// Simulates storage becoming unreachable (`true`) or recovering.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored votes across all concerts.
    pub async fn vote_len(&self) -> usize {
        self.state.read().await.votes.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ConcertStore for InMemoryStore {
    async fn list_concerts(&self) -> Result<Vec<Concert>, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.concerts.values().cloned().collect())
    }

    async fn get_concert(&self, id: ConcertId) -> Result<Option<Concert>, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.concerts.get(&id).cloned())
    }

    async fn insert_vote(
        &self,
        concert_id: ConcertId,
        vote_type: VoteType,
    ) -> Result<Option<Vote>, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if !state.concerts.contains_key(&concert_id) {
            return Ok(None);
        }
        state.last_vote_id += 1;
        let vote = Vote {
            id: state.last_vote_id,
            concert_id,
            vote_type,
            created_at: Utc::now(),
        };
        state.votes.push(vote.clone());
        Ok(Some(vote))
    }

    async fn vote_counts(&self) -> Result<BTreeMap<ConcertId, VoteTally>, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        let mut counts: BTreeMap<ConcertId, VoteTally> = BTreeMap::new();
        for vote in &state.votes {
            counts.entry(vote.concert_id).or_default().record(vote.vote_type);
        }
        Ok(counts)
    }

    async fn concert_tallies(&self) -> Result<Vec<(Concert, VoteTally)>, StoreError> {
        let counts = self.vote_counts().await?;
        let state = self.state.read().await;
        Ok(state
            .concerts
            .values()
            .map(|concert| {
                let tally = counts.get(&concert.id).copied().unwrap_or_default();
                (concert.clone(), tally)
            })
            .collect())
    }

    async fn seed_catalog(&self, catalog: &[NewConcert]) -> Result<usize, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if !state.concerts.is_empty() {
            return Ok(0);
        }
        for concert in catalog {
            state.last_concert_id += 1;
            let id = ConcertId::from_db(state.last_concert_id);
            state.concerts.insert(id, concert.clone().with_id(id));
        }
        Ok(catalog.len())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn new_concert(title: &str) -> NewConcert {
        NewConcert {
            title: title.to_string(),
            date: "Fri, Jul 18, 7:30 PM".to_string(),
            venue: "Venue".to_string(),
            price: "Free".to_string(),
            organizer: "Organizer".to_string(),
            description: String::new(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let catalog = [new_concert("a"), new_concert("b"), new_concert("c")];
        assert_eq!(store.seed_catalog(&catalog).await, Ok(3));

        let Ok(all) = store.list_concerts().await else {
            panic!("list failed");
        };
        let ids: Vec<i64> = all.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_seeding_writes_catalog_once() {
        let store = InMemoryStore::new();
        let catalog = vec![new_concert("a"), new_concert("b")];

        let (first, second) = tokio::join!(
            store.seed_catalog(&catalog),
            store.seed_catalog(&catalog)
        );

        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("seeding failed");
        };
        assert_eq!(first + second, 2);
        let Ok(all) = store.list_concerts().await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn vote_for_missing_concert_writes_nothing() {
        let store = InMemoryStore::with_concerts([new_concert("a")]);
        let result = store
            .insert_vote(ConcertId::from_db(999), VoteType::Excited)
            .await;
        assert_eq!(result, Ok(None));
        assert_eq!(store.vote_len().await, 0);
    }

    #[tokio::test]
    async fn vote_counts_omit_unvoted_concerts() {
        let store = InMemoryStore::with_concerts([new_concert("a"), new_concert("b")]);
        let id = ConcertId::from_db(2);
        let _ = store.insert_vote(id, VoteType::Excited).await;
        let _ = store.insert_vote(id, VoteType::Interested).await;

        let Ok(counts) = store.vote_counts().await else {
            panic!("counts failed");
        };
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&id), Some(&VoteTally::new(1, 1)));
    }

    #[tokio::test]
    async fn tallies_include_unvoted_concerts() {
        let store = InMemoryStore::with_concerts([new_concert("a"), new_concert("b")]);
        let _ = store
            .insert_vote(ConcertId::from_db(1), VoteType::Interested)
            .await;

        let Ok(tallies) = store.concert_tallies().await else {
            panic!("tallies failed");
        };
        let tallies: Vec<(i64, VoteTally)> =
            tallies.into_iter().map(|(c, t)| (c.id.get(), t)).collect();
        assert_eq!(
            tallies,
            vec![(1, VoteTally::new(0, 1)), (2, VoteTally::default())]
        );
    }

    #[tokio::test]
    async fn outage_fails_every_call() {
        let store = InMemoryStore::with_concerts([new_concert("a")]);
        store.set_unavailable(true);

        assert!(matches!(
            store.list_concerts().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.concert_tallies().await.is_err());
        assert!(store.ping().await.is_err());

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
