//! Driving port for punch ledger reads.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, Punch, UserId, WorkedTotal};

/// Request naming one calendar day of one owner's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRequest {
    pub owner: UserId,
    /// Raw `YYYY-MM-DD` date as supplied by the caller.
    pub date: String,
}

/// Worked time for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedHours {
    pub date: NaiveDate,
    pub total: WorkedTotal,
    /// Number of closed entry/exit pairs that contributed.
    pub intervals: usize,
    /// Whether the day ended with an unpaired entry punch.
    pub open_entry: bool,
}

/// Driving port for punch read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PunchQuery: Send + Sync {
    /// Punches inside the day window, ordered by `(timestamp, id)`. An empty
    /// day is an empty list, not an error.
    async fn list_for_day(&self, request: DayRequest) -> Result<Vec<Punch>, Error>;

    /// Total worked time for the day from positional pairing.
    async fn worked_hours(&self, request: DayRequest) -> Result<WorkedHours, Error>;
}
