//! Driven port for punch ledger storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Punch, PunchId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by punch repository adapters.
    pub enum PunchRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "punch repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "punch repository query failed: {message}",
    }
}

/// Storage for punches. Every operation is scoped to one owner.
///
/// Each mutation is a single atomic statement in the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PunchRepository: Send + Sync {
    /// Append a punch and return it with its newly assigned id.
    async fn insert(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
    ) -> Result<Punch, PunchRepositoryError>;

    /// Punches with `start <= timestamp < end`, ordered by `(timestamp, id)`.
    async fn list_in_window(
        &self,
        owner: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Punch>, PunchRepositoryError>;

    /// The owner's punch with this id; `None` when missing or foreign.
    async fn find(
        &self,
        owner: &UserId,
        id: PunchId,
    ) -> Result<Option<Punch>, PunchRepositoryError>;

    /// Whether the owner has a punch at exactly `timestamp`, ignoring
    /// `excluding` when given.
    async fn exists_at(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
        excluding: Option<PunchId>,
    ) -> Result<bool, PunchRepositoryError>;

    /// Move a punch to `timestamp`; `None` when the owner has no such punch.
    async fn update_timestamp(
        &self,
        owner: &UserId,
        id: PunchId,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Punch>, PunchRepositoryError>;

    /// Remove a punch; `false` when the owner has no such punch.
    async fn delete(&self, owner: &UserId, id: PunchId) -> Result<bool, PunchRepositoryError>;
}
