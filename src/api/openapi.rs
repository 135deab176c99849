//! OpenAPI document and optional Swagger UI.

use axum::Router;
use utoipa::OpenApi;

use crate::api::dto::{
    ConcertResponse, RankedConcertResponse, VoteCountsDto, VoteRequest, VoteResponse,
};
use crate::api::handlers::{concerts, rankings, system, votes};
use crate::app_state::AppState;
use crate::domain::VoteType;
use crate::error::{ErrorBody, ErrorResponse};

/// Aggregated OpenAPI description of every documented endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "encore-gateway",
        description = "Concert listings ranked by crowd-sourced votes"
    ),
    paths(
        concerts::list_concerts,
        concerts::get_concert,
        votes::submit_vote,
        votes::vote_stats,
        rankings::get_rankings,
        system::health_handler,
    ),
    components(schemas(
        ConcertResponse,
        RankedConcertResponse,
        VoteCountsDto,
        VoteRequest,
        VoteResponse,
        VoteType,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Concerts", description = "Concert catalog"),
        (name = "Votes", description = "Vote submission and counts"),
        (name = "Rankings", description = "Vote-weighted ranking"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Serves the document at `/api-docs/openapi.json`, with Swagger UI at
/// `/swagger-ui` when the `swagger-ui` feature is enabled.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

/// Serves the document at `/api-docs/openapi.json`.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", axum::routing::get(openapi_json))
}
