//! REST endpoint handlers organized by resource.

pub mod concerts;
pub mod rankings;
pub mod system;
pub mod votes;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(concerts::routes())
        .merge(votes::routes())
        .merge(rankings::routes())
}
