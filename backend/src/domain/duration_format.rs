//! Rendering of worked durations.

use chrono::TimeDelta;

/// Display style for worked totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationFormat {
    /// `"{h}h {m}m"`
    #[default]
    HoursMinutes,
    /// `"{h}h {m}m {s}s"`
    HoursMinutesSeconds,
}

/// A worked duration ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedTotal {
    display: String,
    total_seconds: i64,
}

impl WorkedTotal {
    /// Human-readable rendering such as `"8h 0m"`.
    pub fn display(&self) -> &str {
        self.display.as_str()
    }

    /// Whole seconds worked, truncated.
    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }
}

impl DurationFormat {
    /// Render `duration`, truncating sub-second precision.
    ///
    /// Negative input cannot come out of pairing sorted punches and is clamped
    /// to zero.
    ///
    /// # Examples
    /// ```
    /// use chrono::TimeDelta;
    /// use punchclock::domain::DurationFormat;
    ///
    /// let total = DurationFormat::HoursMinutes.render(TimeDelta::seconds(27_030));
    /// assert_eq!(total.display(), "7h 30m");
    /// assert_eq!(total.total_seconds(), 27_030);
    /// ```
    pub fn render(self, duration: TimeDelta) -> WorkedTotal {
        let total_seconds = duration.num_seconds().max(0);
        let hours = total_seconds / 3600;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;
        let display = match self {
            Self::HoursMinutes => format!("{hours}h {minutes}m"),
            Self::HoursMinutesSeconds => format!("{hours}h {minutes}m {seconds}s"),
        };
        WorkedTotal {
            display,
            total_seconds,
        }
    }
}
