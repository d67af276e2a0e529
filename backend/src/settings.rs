//! Server configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `PUNCHCLOCK_*` environment variables and an
//! optional configuration file. Every field has a fallback so an empty
//! environment starts a debug build against the in-memory store.

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{DayReference, DayWindowError, DurationFormat, DuplicatePolicy, LedgerPolicy};
use crate::outbound::security::JwtSecret;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TOKEN_TTL_HOURS: u32 = 24;
const JWT_SECRET_MIN_LEN: usize = 32;

/// Build mode used to decide how strict secret handling is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or weak secrets are tolerated with a warning.
    Debug,
    /// Missing or weak secrets abort start-up unless explicitly allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    /// ```
    /// use punchclock::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while turning raw settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid day offset: {0}")]
    InvalidDayOffset(#[from] DayWindowError),
    #[error("token_ttl_hours must be at least 1")]
    InvalidTokenTtl,
    #[error("PUNCHCLOCK_JWT_SECRET is required in release builds")]
    MissingJwtSecret,
    #[error("jwt secret too short: need >= {min_len} bytes, got {length}")]
    JwtSecretTooShort { length: usize, min_len: usize },
}

/// Process configuration for the punch clock server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PUNCHCLOCK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without one, data lives in process memory.
    pub database_url: Option<String>,
    /// Connection pool ceiling.
    pub db_max_connections: Option<u32>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    /// Permit a random per-process secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Access token lifetime.
    pub token_ttl_hours: Option<u32>,
    /// Refuse a second punch at the same instant for the same user.
    #[ortho_config(default = false)]
    pub reject_duplicate_punches: bool,
    /// Render worked totals with seconds.
    #[ortho_config(default = false)]
    pub include_seconds: bool,
    /// Fixed UTC offset defining calendar days, e.g. `-03:00`.
    pub day_offset: Option<String>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Access token lifetime, 24 hours unless configured.
    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        match self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS) {
            0 => Err(SettingsError::InvalidTokenTtl),
            hours => Ok(TimeDelta::hours(i64::from(hours))),
        }
    }

    /// Ledger behaviour derived from the duplicate, format and offset toggles.
    pub fn ledger_policy(&self) -> Result<LedgerPolicy, SettingsError> {
        let day_reference = match self.day_offset.as_deref() {
            Some(raw) => DayReference::parse_offset(raw)?,
            None => DayReference::utc(),
        };
        Ok(LedgerPolicy {
            duplicates: if self.reject_duplicate_punches {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Allow
            },
            day_reference,
            duration_format: if self.include_seconds {
                DurationFormat::HoursMinutesSeconds
            } else {
                DurationFormat::HoursMinutes
            },
        })
    }

    /// Resolve the token signing secret for `mode`.
    ///
    /// A missing secret yields an ephemeral one in debug builds or when
    /// `allow_ephemeral_secret` is set. Short secrets are rejected in release
    /// builds and only warned about in debug builds.
    pub fn jwt_secret(&self, mode: BuildMode) -> Result<JwtSecret, SettingsError> {
        let Some(secret) = self.jwt_secret.as_deref().filter(|raw| !raw.is_empty()) else {
            if mode.is_debug() || self.allow_ephemeral_secret {
                warn!("no jwt secret configured; using an ephemeral one (tokens die on restart)");
                return Ok(JwtSecret::ephemeral());
            }
            return Err(SettingsError::MissingJwtSecret);
        };

        let length = secret.len();
        if length < JWT_SECRET_MIN_LEN {
            if !mode.is_debug() {
                return Err(SettingsError::JwtSecretTooShort {
                    length,
                    min_len: JWT_SECRET_MIN_LEN,
                });
            }
            warn!(length, min_len = JWT_SECRET_MIN_LEN, "jwt secret is shorter than recommended");
        }
        Ok(JwtSecret::new(secret))
    }
}
