//! Concert catalog DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Concert;

/// A catalog entry as returned by `GET /concerts` and `GET /concerts/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConcertResponse {
    /// Concert identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Free-text date and time.
    pub date: String,
    /// Venue name.
    pub venue: String,
    /// Free-text price (`"Free"`, `"From $23.18"`, ...).
    pub price: String,
    /// Organizer name.
    pub organizer: String,
    /// Short description.
    pub description: String,
    /// Image URL.
    pub image_url: String,
}

impl From<Concert> for ConcertResponse {
    fn from(concert: Concert) -> Self {
        Self {
            id: concert.id.get(),
            title: concert.title,
            date: concert.date,
            venue: concert.venue,
            price: concert.price,
            organizer: concert.organizer,
            description: concert.description,
            image_url: concert.image_url,
        }
    }
}
