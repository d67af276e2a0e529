//! Interval pairing over a day's punches.
//!
//! Punches carry no entry/exit marker. Position alone decides the role: the
//! first, third, fifth... punch opens an interval and the next one closes it.
//! A trailing unpaired punch contributes nothing.

use chrono::{DateTime, TimeDelta, Utc};

/// Role of a punch inferred from its position in the ordered day sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchRole {
    Entry,
    Exit,
}

impl PunchRole {
    /// Role of the punch at zero-based `index`.
    pub fn at(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Entry
        } else {
            Self::Exit
        }
    }
}

/// One closed entry/exit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkInterval {
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
}

impl WorkInterval {
    pub fn entry(&self) -> DateTime<Utc> {
        self.entry
    }

    pub fn exit(&self) -> DateTime<Utc> {
        self.exit
    }

    pub fn duration(&self) -> TimeDelta {
        self.exit - self.entry
    }
}

/// Result of pairing an ordered punch sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    intervals: Vec<WorkInterval>,
    dangling: Option<DateTime<Utc>>,
    total: TimeDelta,
}

impl Timeline {
    pub fn intervals(&self) -> &[WorkInterval] {
        &self.intervals
    }

    /// Final entry punch left without an exit, if the count was odd.
    pub fn dangling(&self) -> Option<DateTime<Utc>> {
        self.dangling
    }

    /// Sum of all closed interval durations.
    pub fn total(&self) -> TimeDelta {
        self.total
    }
}

/// Pair `(t0, t1), (t2, t3), ...` and sum their durations.
///
/// `timestamps` must already be sorted ascending; callers obtain them from the
/// ledger, which orders by `(timestamp, id)`.
///
/// # Examples
/// ```
/// use chrono::{DateTime, TimeDelta, Utc};
/// use punchclock::domain::pair_punches;
///
/// let at = |raw: &str| DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc);
/// let timeline = pair_punches(&[
///     at("2024-03-10T08:00:00Z"),
///     at("2024-03-10T12:00:00Z"),
///     at("2024-03-10T13:00:00Z"),
/// ]);
/// assert_eq!(timeline.total(), TimeDelta::hours(4));
/// assert_eq!(timeline.dangling(), Some(at("2024-03-10T13:00:00Z")));
/// ```
pub fn pair_punches(timestamps: &[DateTime<Utc>]) -> Timeline {
    let pairs = timestamps.chunks_exact(2);
    let dangling = pairs.remainder().first().copied();
    let intervals: Vec<WorkInterval> = pairs
        .filter_map(|pair| match pair {
            [entry, exit] => Some(WorkInterval {
                entry: *entry,
                exit: *exit,
            }),
            _ => None,
        })
        .collect();
    let total = intervals
        .iter()
        .fold(TimeDelta::zero(), |acc, interval| acc + interval.duration());

    Timeline {
        intervals,
        dangling,
        total,
    }
}
