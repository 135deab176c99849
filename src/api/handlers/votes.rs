//! Vote submission and vote statistics handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{VoteCountsDto, VoteRequest, VoteResponse, vote_stats_response};
use crate::app_state::AppState;
use crate::domain::ConcertId;
use crate::error::{ApiError, ErrorResponse};

/// `POST /vote` — Record a vote for a concert.
///
/// # Errors
///
/// Returns [`ApiError::ConcertNotFound`] for an unknown concert,
/// [`ApiError::InvalidVoteType`] for a vote type other than `excited` or
/// `interested`, and [`ApiError::InvalidRequest`] for a malformed body.
#[utoipa::path(
    post,
    path = "/api/vote",
    tag = "Votes",
    summary = "Submit a vote",
    description = "Appends an `excited` or `interested` vote for a concert and returns the stored vote. Votes are permanent.",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Invalid vote type or malformed body", body = ErrorResponse),
        (status = 404, description = "Concert not found", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
    )
)]
pub async fn submit_vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let concert_id = ConcertId::new(req.concert_id)?;

    let vote = state
        .concert_service
        .record_vote(concert_id, &req.vote_type)
        .await?;

    Ok(Json(VoteResponse::from(vote)))
}

/// `GET /vote-stats` — Vote counts per concert.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/vote-stats",
    tag = "Votes",
    summary = "Vote statistics",
    description = "Returns excited/interested counts keyed by concert id. Concerts without votes are omitted.",
    responses(
        (status = 200, description = "Counts keyed by concert id", body = std::collections::BTreeMap<String, VoteCountsDto>),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
    )
)]
pub async fn vote_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let counts = state.concert_service.vote_counts().await?;
    Ok(Json(vote_stats_response(counts)))
}

/// Vote routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vote", post(submit_vote))
        .route("/vote-stats", get(vote_stats))
}
