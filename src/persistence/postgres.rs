//! PostgreSQL implementation of the concert store.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{ConcertRow, ConcertTallyRow, VoteCountRow, VoteRow, count_to_u64};
use super::{ConcertStore, StoreError};
use crate::config::AppConfig;
use crate::domain::{Concert, ConcertId, NewConcert, Vote, VoteTally, VoteType};

const CONCERT_COLUMNS: &str = "id, title, date, venue, price, organizer, description, image_url";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Connections are checked out per statement and returned to the pool
/// when the statement completes. Every statement is bounded by
/// `statement_timeout`; pool checkout is bounded by the pool's own
/// acquire timeout.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Opens a connection pool using the database settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be
    /// reached within the connect timeout.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self::new(
            pool,
            Duration::from_secs(config.database_statement_timeout_secs),
        ))
    }

    /// Applies pending schema migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("migration failed: {e}")))
    }

    /// Runs `fut` under the statement timeout.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.statement_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Unavailable(format!(
                "statement exceeded {} ms timeout",
                self.statement_timeout.as_millis()
            ))),
        }
    }
}

/// Inserts `catalog` into an empty `concerts` table in one transaction.
///
/// The table lock conflicts with itself, so a second seeder waits for the
/// first to commit and then sees a populated table. Readers are not
/// blocked.
async fn seed_in_transaction(
    pool: &PgPool,
    catalog: &[NewConcert],
) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("LOCK TABLE concerts IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM concerts")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    for concert in catalog {
        sqlx::query(
            "INSERT INTO concerts (title, date, venue, price, organizer, description, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&concert.title)
        .bind(&concert.date)
        .bind(&concert.venue)
        .bind(&concert.price)
        .bind(&concert.organizer)
        .bind(&concert.description)
        .bind(&concert.image_url)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(catalog.len())
}

#[async_trait]
impl ConcertStore for PostgresStore {
    async fn list_concerts(&self) -> Result<Vec<Concert>, StoreError> {
        let sql = format!("SELECT {CONCERT_COLUMNS} FROM concerts ORDER BY id");
        let rows = self
            .bounded(sqlx::query_as::<_, ConcertRow>(&sql).fetch_all(&self.pool))
            .await?;

        Ok(rows.into_iter().map(Concert::from).collect())
    }

    async fn get_concert(&self, id: ConcertId) -> Result<Option<Concert>, StoreError> {
        let sql = format!("SELECT {CONCERT_COLUMNS} FROM concerts WHERE id = $1");
        let row = self
            .bounded(
                sqlx::query_as::<_, ConcertRow>(&sql)
                    .bind(id.get())
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(Concert::from))
    }

    async fn insert_vote(
        &self,
        concert_id: ConcertId,
        vote_type: VoteType,
    ) -> Result<Option<Vote>, StoreError> {
        // Selecting from `concerts` makes the existence check part of the
        // insert: no matching concert, no row.
        let row = self
            .bounded(
                sqlx::query_as::<_, VoteRow>(
                    "INSERT INTO votes (concert_id, vote_type) \
                     SELECT id, $2 FROM concerts WHERE id = $1 \
                     RETURNING id, concert_id, vote_type, created_at",
                )
                .bind(concert_id.get())
                .bind(vote_type.as_str())
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(Vote::try_from).transpose()
    }

    async fn vote_counts(&self) -> Result<BTreeMap<ConcertId, VoteTally>, StoreError> {
        let rows = self
            .bounded(
                sqlx::query_as::<_, VoteCountRow>(
                    "SELECT concert_id, vote_type, COUNT(*) AS count \
                     FROM votes GROUP BY concert_id, vote_type",
                )
                .fetch_all(&self.pool),
            )
            .await?;

        let mut counts: BTreeMap<ConcertId, VoteTally> = BTreeMap::new();
        for row in rows {
            let vote_type: VoteType = row
                .vote_type
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("concert {}: {e}", row.concert_id)))?;
            let count = count_to_u64(row.count)?;
            let tally = counts.entry(ConcertId::from_db(row.concert_id)).or_default();
            match vote_type {
                VoteType::Excited => tally.excited = count,
                VoteType::Interested => tally.interested = count,
            }
        }
        Ok(counts)
    }

    async fn concert_tallies(&self) -> Result<Vec<(Concert, VoteTally)>, StoreError> {
        let rows = self
            .bounded(
                sqlx::query_as::<_, ConcertTallyRow>(
                    "SELECT c.id, c.title, c.date, c.venue, c.price, c.organizer, \
                            c.description, c.image_url, \
                            COUNT(v.id) FILTER (WHERE v.vote_type = 'excited') AS excited_votes, \
                            COUNT(v.id) FILTER (WHERE v.vote_type = 'interested') AS interested_votes \
                     FROM concerts c \
                     LEFT JOIN votes v ON v.concert_id = c.id \
                     GROUP BY c.id \
                     ORDER BY c.id",
                )
                .fetch_all(&self.pool),
            )
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn seed_catalog(&self, catalog: &[NewConcert]) -> Result<usize, StoreError> {
        self.bounded(seed_in_transaction(&self.pool, catalog)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool))
            .await?;
        Ok(())
    }
}
