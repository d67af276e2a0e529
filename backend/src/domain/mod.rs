//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed punch ledger, its account model and the
//! ports that adapters implement. Nothing here knows about HTTP or Diesel.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: API error payload and stable identifiers.
//! - `Punch`, `PunchId`: ledger records.
//! - `DayReference`, `DayWindow`: calendar day to instant range resolution.
//! - `pair_punches`, `Timeline`: positional entry/exit pairing.
//! - `PunchLedgerService`, `AccountService`: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod day_window;
pub mod duration_format;
pub mod error;
pub mod ports;
pub mod punch;
pub mod punch_ledger_service;
pub mod trace_id;
pub mod user;
pub mod worked_hours;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, NewAccount};
pub use self::day_window::{DayReference, DayWindow, DayWindowError};
pub use self::duration_format::{DurationFormat, WorkedTotal};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::punch::{Punch, PunchId, PunchIdError, normalise_instant, sort_punches};
pub use self::punch_ledger_service::{DuplicatePolicy, LedgerPolicy, PunchLedgerService};
pub use self::trace_id::TraceId;
pub use self::user::{
    ACCOUNT_FIELD_MAX, EmailAddress, User, UserId, UserName, UserValidationError,
};
pub use self::worked_hours::{PunchRole, Timeline, WorkInterval, pair_punches};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use punchclock::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("punch 4 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
