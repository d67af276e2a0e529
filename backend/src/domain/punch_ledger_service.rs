//! Punch ledger domain service.
//!
//! Implements the punch command and query driving ports on top of a
//! [`PunchRepository`]. Day boundaries, duplicate handling and duration
//! rendering are fixed per process through [`LedgerPolicy`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    DayRequest, DeletePunchRequest, PunchCommand, PunchQuery, PunchRepository,
    PunchRepositoryError, PunchTime, RegisterPunchRequest, UpdatePunchRequest, WorkedHours,
};
use crate::domain::{
    DayReference, DayWindow, DurationFormat, Error, Punch, PunchId, UserId, normalise_instant,
    pair_punches, sort_punches,
};

/// How the ledger treats two punches at the same instant for one owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Store both; they pair like any other punches.
    #[default]
    Allow,
    /// Refuse the second one with `conflict`.
    Reject,
}

/// Process-wide ledger settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerPolicy {
    pub duplicates: DuplicatePolicy,
    pub day_reference: DayReference,
    pub duration_format: DurationFormat,
}

fn map_repository_error(error: PunchRepositoryError) -> Error {
    error!(%error, "punch repository failure");
    Error::internal(format!("punch ledger error: {error}"))
}

fn punch_not_found(id: PunchId) -> Error {
    Error::not_found(format!("punch {id} not found"))
}

fn duplicate_punch(timestamp: DateTime<Utc>) -> Error {
    Error::conflict("a punch already exists at this instant").with_details(json!({
        "field": "horario",
        "value": timestamp.to_rfc3339(),
        "code": "duplicate_timestamp",
    }))
}

/// Ledger service implementing [`PunchCommand`] and [`PunchQuery`].
#[derive(Clone)]
pub struct PunchLedgerService<R> {
    punches: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: LedgerPolicy,
}

impl<R> PunchLedgerService<R> {
    /// Create a ledger service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use punchclock::domain::{LedgerPolicy, PunchLedgerService};
    /// use punchclock::outbound::memory::InMemoryPunchRepository;
    ///
    /// let service = PunchLedgerService::new(
    ///     Arc::new(InMemoryPunchRepository::default()),
    ///     Arc::new(DefaultClock),
    ///     LedgerPolicy::default(),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(punches: Arc<R>, clock: Arc<dyn Clock>, policy: LedgerPolicy) -> Self {
        Self {
            punches,
            clock,
            policy,
        }
    }

    fn resolve_time(&self, time: PunchTime) -> Result<DateTime<Utc>, Error> {
        let instant = match time {
            PunchTime::Now => self.clock.utc(),
            PunchTime::At(instant) => instant,
            PunchTime::Civil { date, hour, minute } => self
                .policy
                .day_reference
                .instant_at(date, hour, minute)
                .map_err(|err| Error::invalid_request(err.to_string()))?,
        };
        Ok(normalise_instant(instant))
    }

    fn resolve_day(&self, raw: &str) -> Result<DayWindow, Error> {
        self.policy.day_reference.resolve(raw).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "date",
                "value": raw,
                "code": "invalid_date",
            }))
        })
    }
}

impl<R> PunchLedgerService<R>
where
    R: PunchRepository,
{
    async fn ensure_instant_free(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
        excluding: Option<PunchId>,
    ) -> Result<(), Error> {
        if self.policy.duplicates == DuplicatePolicy::Allow {
            return Ok(());
        }
        let taken = self
            .punches
            .exists_at(owner, timestamp, excluding)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(duplicate_punch(timestamp));
        }
        Ok(())
    }

    async fn punches_for_day(&self, request: &DayRequest) -> Result<(DayWindow, Vec<Punch>), Error> {
        let window = self.resolve_day(&request.date)?;
        let mut punches = self
            .punches
            .list_in_window(&request.owner, window.start(), window.end())
            .await
            .map_err(map_repository_error)?;
        sort_punches(&mut punches);
        Ok((window, punches))
    }
}

#[async_trait]
impl<R> PunchCommand for PunchLedgerService<R>
where
    R: PunchRepository,
{
    async fn register(&self, request: RegisterPunchRequest) -> Result<Punch, Error> {
        let RegisterPunchRequest { owner, time } = request;
        let timestamp = self.resolve_time(time)?;
        self.ensure_instant_free(&owner, timestamp, None).await?;

        let punch = self
            .punches
            .insert(&owner, timestamp)
            .await
            .map_err(map_repository_error)?;
        debug!(owner = %owner, punch_id = %punch.id(), "punch registered");
        Ok(punch)
    }

    async fn update(&self, request: UpdatePunchRequest) -> Result<Punch, Error> {
        let UpdatePunchRequest {
            owner,
            id,
            timestamp,
        } = request;
        let timestamp = normalise_instant(timestamp);
        if self.policy.duplicates == DuplicatePolicy::Reject {
            // A missing or foreign id is not_found even when the instant is taken.
            self.punches
                .find(&owner, id)
                .await
                .map_err(map_repository_error)?
                .ok_or_else(|| punch_not_found(id))?;
            self.ensure_instant_free(&owner, timestamp, Some(id)).await?;
        }

        let punch = self
            .punches
            .update_timestamp(&owner, id, timestamp)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| punch_not_found(id))?;
        debug!(owner = %owner, punch_id = %id, "punch corrected");
        Ok(punch)
    }

    async fn delete(&self, request: DeletePunchRequest) -> Result<(), Error> {
        let DeletePunchRequest { owner, id } = request;
        let removed = self
            .punches
            .delete(&owner, id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(punch_not_found(id));
        }
        debug!(owner = %owner, punch_id = %id, "punch deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> PunchQuery for PunchLedgerService<R>
where
    R: PunchRepository,
{
    async fn list_for_day(&self, request: DayRequest) -> Result<Vec<Punch>, Error> {
        let (_, punches) = self.punches_for_day(&request).await?;
        Ok(punches)
    }

    async fn worked_hours(&self, request: DayRequest) -> Result<WorkedHours, Error> {
        let (window, punches) = self.punches_for_day(&request).await?;
        let timestamps: Vec<DateTime<Utc>> = punches.iter().map(Punch::timestamp).collect();
        let timeline = pair_punches(&timestamps);
        if let Some(open) = timeline.dangling() {
            debug!(
                owner = %request.owner,
                date = %window.date(),
                open_entry = %open,
                "ignoring unpaired trailing punch"
            );
        }

        Ok(WorkedHours {
            date: window.date(),
            total: self.policy.duration_format.render(timeline.total()),
            intervals: timeline.intervals().len(),
            open_entry: timeline.dangling().is_some(),
        })
    }
}

#[cfg(test)]
#[path = "punch_ledger_service_tests.rs"]
mod tests;
