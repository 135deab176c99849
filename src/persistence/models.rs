//! Database row types and their mapping into domain values.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::StoreError;
use crate::domain::{Concert, ConcertId, Vote, VoteTally};

/// A row from the `concerts` table.
#[derive(Debug, Clone, FromRow)]
pub struct ConcertRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Free-text date.
    pub date: String,
    /// Venue name.
    pub venue: String,
    /// Free-text price.
    pub price: String,
    /// Organizer name.
    pub organizer: String,
    /// Description.
    pub description: String,
    /// Image URL.
    pub image_url: String,
}

impl From<ConcertRow> for Concert {
    fn from(row: ConcertRow) -> Self {
        Self {
            id: ConcertId::from_db(row.id),
            title: row.title,
            date: row.date,
            venue: row.venue,
            price: row.price,
            organizer: row.organizer,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow)]
pub struct VoteRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Referenced concert.
    pub concert_id: i64,
    /// `"excited"` or `"interested"` (enforced by a CHECK constraint).
    pub vote_type: String,
    /// Insert time, assigned by the database.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for Vote {
    type Error = StoreError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        let vote_type = row
            .vote_type
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("vote {}: {e}", row.id)))?;
        Ok(Self {
            id: row.id,
            concert_id: ConcertId::from_db(row.concert_id),
            vote_type,
            created_at: row.created_at,
        })
    }
}

/// One `(concert, vote type)` group from the vote statistics query.
#[derive(Debug, Clone, FromRow)]
pub struct VoteCountRow {
    /// Referenced concert.
    pub concert_id: i64,
    /// Vote type of this group.
    pub vote_type: String,
    /// Number of votes in the group.
    pub count: i64,
}

/// A concert joined with its aggregated vote counts.
#[derive(Debug, Clone, FromRow)]
pub struct ConcertTallyRow {
    /// Catalog columns.
    #[sqlx(flatten)]
    pub concert: ConcertRow,
    /// `COUNT(*) FILTER (WHERE vote_type = 'excited')`.
    pub excited_votes: i64,
    /// `COUNT(*) FILTER (WHERE vote_type = 'interested')`.
    pub interested_votes: i64,
}

impl TryFrom<ConcertTallyRow> for (Concert, VoteTally) {
    type Error = StoreError;

    fn try_from(row: ConcertTallyRow) -> Result<Self, Self::Error> {
        let tally = VoteTally::new(
            count_to_u64(row.excited_votes)?,
            count_to_u64(row.interested_votes)?,
        );
        Ok((Concert::from(row.concert), tally))
    }
}

/// Converts a SQL `COUNT` result into an unsigned count.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] for negative values.
pub fn count_to_u64(count: i64) -> Result<u64, StoreError> {
    u64::try_from(count).map_err(|_| StoreError::Corrupt(format!("negative count {count}")))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::VoteType;

    #[test]
    fn vote_row_maps_known_types() {
        let row = VoteRow {
            id: 1,
            concert_id: 2,
            vote_type: "interested".to_string(),
            created_at: Utc::now(),
        };
        let Ok(vote) = Vote::try_from(row) else {
            panic!("expected valid vote");
        };
        assert_eq!(vote.vote_type, VoteType::Interested);
        assert_eq!(vote.concert_id.get(), 2);
    }

    #[test]
    fn vote_row_rejects_unknown_types() {
        let row = VoteRow {
            id: 1,
            concert_id: 2,
            vote_type: "loved".to_string(),
            created_at: Utc::now(),
        };
        assert!(matches!(Vote::try_from(row), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn negative_counts_are_corrupt() {
        assert_eq!(count_to_u64(3), Ok(3));
        assert!(count_to_u64(-1).is_err());
    }
}
