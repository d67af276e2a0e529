//! Driving port for punch ledger mutations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Error, Punch, PunchId, UserId};

/// When a new punch happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchTime {
    /// The service clock's current instant.
    Now,
    /// An absolute instant supplied by the caller.
    At(DateTime<Utc>),
    /// A civil date and wall-clock time in the configured day reference.
    Civil {
        date: NaiveDate,
        hour: u32,
        minute: u32,
    },
}

/// Request to record a punch for the authenticated owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPunchRequest {
    pub owner: UserId,
    pub time: PunchTime,
}

/// Request to move an existing punch to a new instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePunchRequest {
    pub owner: UserId,
    pub id: PunchId,
    pub timestamp: DateTime<Utc>,
}

/// Request to remove a punch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePunchRequest {
    pub owner: UserId,
    pub id: PunchId,
}

/// Driving port for punch write operations.
///
/// Missing punches and punches owned by someone else both fail with
/// `not_found`; callers cannot tell the two apart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PunchCommand: Send + Sync {
    /// Record a punch. Fails with `conflict` when duplicate punches are
    /// rejected and the owner already punched at that instant.
    async fn register(&self, request: RegisterPunchRequest) -> Result<Punch, Error>;

    /// Correct the timestamp of an owned punch.
    async fn update(&self, request: UpdatePunchRequest) -> Result<Punch, Error>;

    /// Hard-delete an owned punch.
    async fn delete(&self, request: DeletePunchRequest) -> Result<(), Error>;
}
