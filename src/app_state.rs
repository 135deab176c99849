//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::ConcertStore;
use crate::service::{ConcertService, RankingService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog reads and vote writes.
    pub concert_service: Arc<ConcertService>,
    /// Ranking computation.
    pub ranking_service: Arc<RankingService>,
}

impl AppState {
    /// Builds both services over one shared store.
    #[must_use]
    pub fn new(store: Arc<dyn ConcertStore>) -> Self {
        Self {
            concert_service: Arc::new(ConcertService::new(Arc::clone(&store))),
            ranking_service: Arc::new(RankingService::new(store)),
        }
    }
}
