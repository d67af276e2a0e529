//! Calendar-day resolution under a single fixed UTC offset.
//!
//! A day is the half-open instant range `[local midnight, local midnight +
//! 24h)` at the configured offset. Fixed offsets never shift for daylight
//! saving, so every window is exactly 24 hours long.

use std::sync::OnceLock;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};
use regex::Regex;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while resolving dates, civil times, or offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DayWindowError {
    /// The value is not a valid calendar date in strict `YYYY-MM-DD` form.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
    /// Hour or minute outside the civil clock range.
    #[error("invalid time {hour}:{minute}: hour must be 0-23 and minute 0-59")]
    InvalidTime { hour: u32, minute: u32 },
    /// The offset is not of the form `+HH:MM`, `-HH:MM` or `Z`.
    #[error("invalid UTC offset '{value}': expected +HH:MM, -HH:MM or Z")]
    InvalidOffset { value: String },
}

impl DayWindowError {
    fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}

/// Half-open instant range covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayWindow {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Process-wide time reference used to turn dates into instant ranges.
///
/// # Examples
/// ```
/// use punchclock::domain::DayReference;
///
/// let reference = DayReference::parse_offset("-03:00").unwrap();
/// let window = reference.resolve("2024-03-10").unwrap();
/// assert_eq!(window.start().to_rfc3339(), "2024-03-10T03:00:00+00:00");
/// assert_eq!(window.end().to_rfc3339(), "2024-03-11T03:00:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReference {
    offset: FixedOffset,
}

impl Default for DayReference {
    fn default() -> Self {
        Self::utc()
    }
}

static OFFSET_RE: OnceLock<Regex> = OnceLock::new();

fn offset_regex() -> &'static Regex {
    OFFSET_RE.get_or_init(|| {
        Regex::new(r"^([+-])(\d{2}):?(\d{2})$")
            .unwrap_or_else(|error| panic!("offset regex failed to compile: {error}"))
    })
}

impl DayReference {
    /// Days measured in UTC.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Parse `+HH:MM`, `-HH:MM`, `+HHMM`, `Z` or `UTC`.
    pub fn parse_offset(raw: &str) -> Result<Self, DayWindowError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        let invalid = || DayWindowError::InvalidOffset {
            value: raw.to_owned(),
        };
        let captures = offset_regex().captures(trimmed).ok_or_else(invalid)?;
        let field = |index: usize| -> Result<i32, DayWindowError> {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<i32>().ok())
                .ok_or_else(invalid)
        };
        let (hours, minutes) = (field(2)?, field(3)?);
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        let seconds = hours * 3600 + minutes * 60;
        let signed = match captures.get(1).map(|m| m.as_str()) {
            Some("-") => -seconds,
            _ => seconds,
        };
        FixedOffset::east_opt(signed).map(Self::new).ok_or_else(invalid)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Parse a strict `YYYY-MM-DD` date.
    pub fn parse_date(raw: &str) -> Result<NaiveDate, DayWindowError> {
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| DayWindowError::invalid_date(raw))?;
        // chrono tolerates single-digit fields; the canonical form must round-trip.
        if date.format(DATE_FORMAT).to_string() != raw {
            return Err(DayWindowError::invalid_date(raw));
        }
        Ok(date)
    }

    /// Resolve a raw date string into its day window.
    pub fn resolve(&self, raw: &str) -> Result<DayWindow, DayWindowError> {
        let date = Self::parse_date(raw)?;
        self.window_for(date)
            .map_err(|_| DayWindowError::invalid_date(raw))
    }

    /// Day window for an already parsed date.
    pub fn window_for(&self, date: NaiveDate) -> Result<DayWindow, DayWindowError> {
        let invalid = || DayWindowError::invalid_date(date.format(DATE_FORMAT).to_string());
        let start = self
            .to_utc(date.and_time(NaiveTime::MIN))
            .ok_or_else(invalid)?;
        let end = start
            .checked_add_signed(TimeDelta::hours(24))
            .ok_or_else(invalid)?;
        Ok(DayWindow { date, start, end })
    }

    /// Instant of a civil date, hour and minute in this reference.
    pub fn instant_at(
        &self,
        date: NaiveDate,
        hour: u32,
        minute: u32,
    ) -> Result<DateTime<Utc>, DayWindowError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or(DayWindowError::InvalidTime { hour, minute })?;
        self.to_utc(date.and_time(time))
            .ok_or_else(|| DayWindowError::invalid_date(date.format(DATE_FORMAT).to_string()))
    }

    fn to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|instant| instant.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for day resolution.
    use super::*;
    use rstest::rstest;

    fn instant(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .expect("valid fixture timestamp")
            .with_timezone(&Utc)
    }

    #[rstest]
    #[case("2024-03-10")]
    #[case("2024-02-29")]
    #[case("1999-12-31")]
    fn valid_dates_span_exactly_one_day(#[case] raw: &str) {
        let window = DayReference::utc().resolve(raw).expect("valid date");
        assert_eq!(window.end() - window.start(), TimeDelta::hours(24));
        assert_eq!(window.date().format(DATE_FORMAT).to_string(), raw);
    }

    #[rstest]
    #[case("2024-13-01")]
    #[case("2023-02-29")]
    #[case("2024-1-05")]
    #[case("2024-01-5")]
    #[case("20240105")]
    #[case("05/01/2024")]
    #[case(" 2024-01-05")]
    #[case("")]
    #[case("hoje")]
    fn malformed_dates_are_rejected(#[case] raw: &str) {
        let error = DayReference::utc().resolve(raw).expect_err("must fail");
        assert!(matches!(error, DayWindowError::InvalidDate { .. }));
    }

    #[rstest]
    fn negative_offset_shifts_window_forward() {
        let reference = DayReference::parse_offset("-03:00").expect("offset");
        let window = reference.resolve("2024-03-10").expect("date");
        assert_eq!(window.start(), instant("2024-03-10T03:00:00Z"));
        assert_eq!(window.end(), instant("2024-03-11T03:00:00Z"));
    }

    #[rstest]
    #[case("2024-03-10T00:00:00Z", true)]
    #[case("2024-03-10T23:59:59Z", true)]
    #[case("2024-03-11T00:00:00Z", false)]
    #[case("2024-03-09T23:59:59Z", false)]
    fn window_is_half_open(#[case] raw: &str, #[case] expected: bool) {
        let window = DayReference::utc().resolve("2024-03-10").expect("date");
        assert_eq!(window.contains(instant(raw)), expected);
    }

    #[rstest]
    #[case("Z", 0)]
    #[case("utc", 0)]
    #[case("+00:00", 0)]
    #[case("-03:00", -10_800)]
    #[case("+0530", 19_800)]
    fn offsets_parse(#[case] raw: &str, #[case] seconds: i32) {
        let reference = DayReference::parse_offset(raw).expect("offset parses");
        assert_eq!(reference.offset().local_minus_utc(), seconds);
    }

    #[rstest]
    #[case("America/Sao_Paulo")]
    #[case("+24:00")]
    #[case("-03:60")]
    #[case("3")]
    fn bad_offsets_are_rejected(#[case] raw: &str) {
        let error = DayReference::parse_offset(raw).expect_err("must fail");
        assert!(matches!(error, DayWindowError::InvalidOffset { .. }));
    }

    #[rstest]
    fn civil_time_resolves_in_reference() {
        let reference = DayReference::parse_offset("-03:00").expect("offset");
        let date = DayReference::parse_date("2024-03-10").expect("date");
        let at = reference.instant_at(date, 8, 30).expect("time");
        assert_eq!(at, instant("2024-03-10T11:30:00Z"));
    }

    #[rstest]
    #[case(24, 0)]
    #[case(8, 60)]
    fn civil_time_out_of_range_is_rejected(#[case] hour: u32, #[case] minute: u32) {
        let date = DayReference::parse_date("2024-03-10").expect("date");
        let error = DayReference::utc()
            .instant_at(date, hour, minute)
            .expect_err("must fail");
        assert_eq!(error, DayWindowError::InvalidTime { hour, minute });
    }
}
