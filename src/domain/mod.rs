//! Domain layer: catalog entries, votes, and the ranking computation.
//!
//! Everything in here is storage-agnostic. The persistence layer produces
//! these types and the service layer composes them.

pub mod concert;
pub mod ranking;
pub mod vote;

pub use concert::{Concert, ConcertId, ConcertIdError, NewConcert};
pub use ranking::{RankedConcert, rank_concerts};
pub use vote::{UnknownVoteType, Vote, VoteTally, VoteType};
