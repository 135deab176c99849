//! # encore-gateway
//!
//! REST API serving a concert catalog ranked by crowd-sourced votes.
//!
//! Visitors cast `excited` or `interested` votes on concerts; the ranking
//! scores each concert as `2 * excited + interested` and orders the whole
//! catalog by that score, recomputed on every request.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ConcertService / RankingService (service/)
//!     ├── rank_concerts (domain/)
//!     │
//!     └── ConcertStore (persistence/)
//!           ├── PostgresStore
//!           └── InMemoryStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
