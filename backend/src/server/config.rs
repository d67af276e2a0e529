//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::TimeDelta;
use punchclock::domain::LedgerPolicy;
use punchclock::outbound::persistence::DbPool;
use punchclock::outbound::security::JwtSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) token_ttl: TimeDelta,
    pub(crate) ledger_policy: LedgerPolicy,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        jwt_secret: JwtSecret,
        token_ttl: TimeDelta,
        ledger_policy: LedgerPolicy,
    ) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            token_ttl,
            ledger_policy,
            db_pool: None,
        }
    }

    /// Attach a database connection pool. Without one, accounts and punches
    /// live in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
