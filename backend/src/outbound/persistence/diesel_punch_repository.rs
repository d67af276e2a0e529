//! PostgreSQL-backed `PunchRepository` implementation using Diesel ORM.
//!
//! Every statement filters on the owner, so a punch belonging to someone else
//! behaves exactly like a missing one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PunchRepository, PunchRepositoryError};
use crate::domain::{Punch, PunchId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPunchRow, PunchRow, PunchTimestampUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::punches;

/// Diesel-backed implementation of the punch repository port.
#[derive(Clone)]
pub struct DieselPunchRepository {
    pool: DbPool,
}

impl DieselPunchRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PunchRepositoryError {
    map_basic_pool_error(error, PunchRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PunchRepositoryError {
    map_basic_diesel_error(
        error,
        PunchRepositoryError::query,
        PunchRepositoryError::connection,
    )
}

fn row_to_punch(row: PunchRow) -> Result<Punch, PunchRepositoryError> {
    let PunchRow {
        id,
        user_id,
        punched_at,
    } = row;
    let id = PunchId::new(id).map_err(|err| PunchRepositoryError::query(err.to_string()))?;
    Ok(Punch::new(id, UserId::from_uuid(user_id), punched_at))
}

#[async_trait]
impl PunchRepository for DieselPunchRepository {
    async fn insert(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
    ) -> Result<Punch, PunchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(punches::table)
            .values(NewPunchRow {
                user_id: *owner.as_uuid(),
                punched_at: timestamp,
            })
            .returning(PunchRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_punch(row)
    }

    async fn list_in_window(
        &self,
        owner: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Punch>, PunchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PunchRow> = punches::table
            .filter(
                punches::user_id
                    .eq(owner.as_uuid())
                    .and(punches::punched_at.ge(start))
                    .and(punches::punched_at.lt(end)),
            )
            .order((punches::punched_at.asc(), punches::id.asc()))
            .select(PunchRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_punch).collect()
    }

    async fn find(
        &self,
        owner: &UserId,
        id: PunchId,
    ) -> Result<Option<Punch>, PunchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = punches::table
            .filter(
                punches::id
                    .eq(id.get())
                    .and(punches::user_id.eq(owner.as_uuid())),
            )
            .select(PunchRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_punch).transpose()
    }

    async fn exists_at(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
        excluding: Option<PunchId>,
    ) -> Result<bool, PunchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut matching = punches::table
            .filter(
                punches::user_id
                    .eq(*owner.as_uuid())
                    .and(punches::punched_at.eq(timestamp)),
            )
            .into_boxed();
        if let Some(id) = excluding {
            matching = matching.filter(punches::id.ne(id.get()));
        }

        diesel::select(exists(matching))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update_timestamp(
        &self,
        owner: &UserId,
        id: PunchId,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Punch>, PunchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            punches::table.filter(
                punches::id
                    .eq(id.get())
                    .and(punches::user_id.eq(owner.as_uuid())),
            ),
        )
        .set(PunchTimestampUpdate {
            punched_at: timestamp,
        })
        .returning(PunchRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_punch).transpose()
    }

    async fn delete(&self, owner: &UserId, id: PunchId) -> Result<bool, PunchRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            punches::table.filter(
                punches::id
                    .eq(id.get())
                    .and(punches::user_id.eq(owner.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping; queries are exercised against embedded
    //! PostgreSQL in `tests/diesel_punch_repository.rs`.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn rows_convert_to_punches() {
        let owner = Uuid::new_v4();
        let at = Utc::now();
        let punch = row_to_punch(PunchRow {
            id: 12,
            user_id: owner,
            punched_at: at,
        })
        .expect("valid row");

        assert_eq!(punch.id().get(), 12);
        assert_eq!(punch.owner().as_uuid(), &owner);
        assert_eq!(punch.timestamp(), at);
    }

    #[rstest]
    fn non_positive_row_id_is_a_query_error() {
        let result = row_to_punch(PunchRow {
            id: 0,
            user_id: Uuid::new_v4(),
            punched_at: Utc::now(),
        });

        assert!(matches!(result, Err(PunchRepositoryError::Query { .. })));
    }

    #[rstest]
    fn pool_failure_is_a_connection_error() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, PunchRepositoryError::connection("timed out"));
    }
}
