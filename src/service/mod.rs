//! Service layer: business logic orchestration.
//!
//! [`ConcertService`] owns the catalog reads and the vote write path;
//! [`RankingService`] turns stored votes into the popularity ranking.
//! Both hold the same injected [`crate::persistence::ConcertStore`].

pub mod concert_service;
pub mod ranking_service;

pub use concert_service::ConcertService;
pub use ranking_service::RankingService;
