//! Startup seeding of the concert catalog.

use super::{ConcertStore, StoreError};
use crate::domain::NewConcert;

fn entry(
    title: &str,
    date: &str,
    venue: &str,
    price: &str,
    organizer: &str,
    description: &str,
    image_url: &str,
) -> NewConcert {
    NewConcert {
        title: title.to_string(),
        date: date.to_string(),
        venue: venue.to_string(),
        price: price.to_string(),
        organizer: organizer.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
    }
}

/// The built-in catalog inserted into an empty database.
#[must_use]
pub fn default_catalog() -> Vec<NewConcert> {
    vec![
        entry(
            "José Luiz Martins' Brazil Project",
            "Sunday at 7:00 PM",
            "Takoma Station Tavern",
            "From $23.18",
            "Jazz Kitchen Productions",
            "Experience the vibrant rhythms of Brazilian jazz with internationally acclaimed pianist José Luiz Martins.",
            "https://img.evbuc.com/https%3A%2F%2Fcdn.evbuc.com%2Fimages%2F1051553063%2F53596862044%2F1%2Foriginal.20250612-114654?crop=focalpoint&fit=crop&h=230&w=460&auto=format%2Ccompress&q=75&sharp=10&fp-x=0.5&fp-y=0.5&s=437618b6bf8a617d9e5b15c2f10c5200",
        ),
        entry(
            "Harpsichordist Jory Vinikour plays Sparkling Scarlatti Sonatas",
            "Sat, Jun 28, 8:00 PM",
            "St. Columba's Episcopal Church",
            "From $63.74",
            "Capriccio Baroque",
            "Renowned harpsichordist Jory Vinikour brings Scarlatti's brilliant sonatas to life in an intimate baroque setting.",
            "https://img.evbuc.com/https%3A%2F%2Fcdn.evbuc.com%2Fimages%2F923324233%2F226582576668%2F1%2Foriginal.20241226-115525?crop=focalpoint&fit=crop&h=230&w=460&auto=format%2Ccompress&q=75&sharp=10&fp-x=0.5&fp-y=0.5&s=b5c46a7077ecbac3dfc3ff9b5bed4711",
        ),
        entry(
            "Washington | 2025 Scholarship Pianists Debut Recital",
            "Fri, Jul 18, 7:30 PM",
            "La Maison Française, Embassy of France",
            "Free",
            "Embassy Cultural Program",
            "Young scholarship recipients showcase their exceptional talent in this debut performance at the French Embassy.",
            "https://img.evbuc.com/https%3A%2F%2Fcdn.evbuc.com%2Fimages%2F1012220253%2F90224703647%2F1%2Foriginal.20250418-200017?crop=focalpoint&fit=crop&auto=format%2Ccompress&q=75&sharp=10&fp-x=5e-05&fp-y=5e-05&s=5ff3ae740072ef59d20791697d58778f",
        ),
        entry(
            "Fatty Liver Foundation Benefit Recital | Celimene Daudet, Piano",
            "Thu, Oct 23, 7:30 PM",
            "La Maison Française, Embassy of France",
            "Donation",
            "Fatty Liver Foundation",
            "Celebrated pianist Celimene Daudet performs in support of fatty liver disease research and awareness.",
            "https://img.evbuc.com/https%3A%2F%2Fcdn.evbuc.com%2Fimages%2F838593109%2F90224703647%2F1%2Foriginal.20240831-144333?crop=focalpoint&fit=crop&auto=format%2Ccompress&q=75&sharp=10&fp-x=5e-05&fp-y=5e-05&s=03ddc74cba0bd3eea567787ed92885b6",
        ),
        entry(
            "DC Chamber Musicians Season Finale",
            "Saturday at 3:00 PM",
            "St Thomas Episcopal Church",
            "From $35.00",
            "DC Chamber Musicians",
            "The season concludes with an extraordinary chamber music performance featuring piano and strings.",
            "https://img.evbuc.com/https%3A%2F%2Fcdn.evbuc.com%2Fimages%2F1034149363%2F1463811440923%2F1%2Foriginal.20250519-164932?crop=focalpoint&fit=crop&auto=format%2Ccompress&q=75&sharp=10&fp-x=0.5&fp-y=0.5&s=a8ec10685630b68281387c02e91c3350",
        ),
        entry(
            "Considering Matthew Shepard",
            "Fri, Jul 11, 7:30 PM",
            "Washington National Cathedral",
            "From $23.18",
            "Berkshire Choral",
            "A powerful choral and piano performance honoring the memory of Matthew Shepard.",
            "https://img.evbuc.com/https%3A%2F%2Fcdn.evbuc.com%2Fimages%2F1040576603%2F528497426627%2F1%2Foriginal.20250528-133310?crop=focalpoint&fit=crop&h=230&w=460&auto=format%2Ccompress&q=75&sharp=10&fp-x=0.512310606061&fp-y=0.224252491694&s=359684fec5bab0f97ff22326e33009c3",
        ),
    ]
}

/// Inserts `catalog` if the store holds no concerts yet.
///
/// Returns the number of concerts inserted (zero when the catalog was
/// already populated). Safe to run from several instances at once: the
/// store performs the check and the inserts atomically.
///
/// # Errors
///
/// Returns a [`StoreError`] if counting or inserting fails.
pub async fn seed_if_empty(
    store: &dyn ConcertStore,
    catalog: &[NewConcert],
) -> Result<usize, StoreError> {
    let inserted = store.seed_catalog(catalog).await?;
    if inserted == 0 {
        tracing::debug!("catalog already populated, skipping seed");
    } else {
        tracing::info!(inserted, "seeded concert catalog");
    }
    Ok(inserted)
}
