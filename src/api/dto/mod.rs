//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire.

pub mod concert_dto;
pub mod ranking_dto;
pub mod vote_dto;

pub use concert_dto::*;
pub use ranking_dto::*;
pub use vote_dto::*;
