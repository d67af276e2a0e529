//! Punch records held in the ledger.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};

use crate::domain::UserId;

/// Ledger-assigned punch identifier.
///
/// Identifiers are positive and increase with insertion order, so ordering by
/// id equals ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PunchId(i64);

/// Raised when a punch identifier is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("punch id must be a positive integer, got '{value}'")]
pub struct PunchIdError {
    value: String,
}

impl PunchId {
    pub fn new(raw: i64) -> Result<Self, PunchIdError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(PunchIdError {
                value: raw.to_string(),
            })
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for PunchId {
    type Err = PunchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s.parse::<i64>().map_err(|_| PunchIdError {
            value: s.to_owned(),
        })?;
        Self::new(parsed)
    }
}

impl fmt::Display for PunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single clock event owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punch {
    id: PunchId,
    owner: UserId,
    timestamp: DateTime<Utc>,
}

impl Punch {
    pub fn new(id: PunchId, owner: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            timestamp,
        }
    }

    pub fn id(&self) -> PunchId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Truncate an instant to the microsecond precision the ledger stores.
pub fn normalise_instant(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(6)
}

/// Ledger ordering: timestamp ascending, then id ascending.
pub fn sort_punches(punches: &mut [Punch]) {
    punches.sort_by_key(|punch| (punch.timestamp, punch.id));
}
