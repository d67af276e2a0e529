//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccessTokens, LoginService, PunchCommand, PunchQuery, UserRegistration};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub tokens: Arc<dyn AccessTokens>,
    pub punches: Arc<dyn PunchCommand>,
    pub punches_query: Arc<dyn PunchQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub tokens: Arc<dyn AccessTokens>,
    pub punches: Arc<dyn PunchCommand>,
    pub punches_query: Arc<dyn PunchQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use chrono::TimeDelta;
    /// use mockable::DefaultClock;
    /// use punchclock::domain::{AccountService, LedgerPolicy, PunchLedgerService};
    /// use punchclock::inbound::http::state::{HttpState, HttpStatePorts};
    /// use punchclock::outbound::memory::{InMemoryPunchRepository, InMemoryUserRepository};
    /// use punchclock::outbound::security::{Argon2CredentialHasher, JwtAccessTokens, JwtSecret};
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2CredentialHasher::default()),
    /// ));
    /// let ledger = Arc::new(PunchLedgerService::new(
    ///     Arc::new(InMemoryPunchRepository::default()),
    ///     clock.clone(),
    ///     LedgerPolicy::default(),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts,
    ///     tokens: Arc::new(JwtAccessTokens::new(
    ///         &JwtSecret::ephemeral(),
    ///         TimeDelta::hours(24),
    ///         clock,
    ///     )),
    ///     punches: ledger.clone(),
    ///     punches_query: ledger,
    /// });
    /// let _tokens = state.tokens.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            tokens,
            punches,
            punches_query,
        } = ports;
        Self {
            login,
            registration,
            tokens,
            punches,
            punches_query,
        }
    }
}
