//! Builders for HTTP state from repository adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::warn;

use punchclock::domain::ports::{PunchRepository, UserRepository};
use punchclock::domain::{AccountService, PunchLedgerService};
use punchclock::inbound::http::state::{HttpState, HttpStatePorts};
use punchclock::outbound::memory::{InMemoryPunchRepository, InMemoryUserRepository};
use punchclock::outbound::persistence::{DieselPunchRepository, DieselUserRepository};
use punchclock::outbound::security::{Argon2CredentialHasher, JwtAccessTokens};

use super::ServerConfig;

fn ports_for<P, U>(
    punches: P,
    users: U,
    config: &ServerConfig,
    clock: &Arc<dyn Clock>,
) -> HttpStatePorts
where
    P: PunchRepository + 'static,
    U: UserRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        Arc::new(users),
        Arc::new(Argon2CredentialHasher::default()),
    ));
    let ledger = Arc::new(PunchLedgerService::new(
        Arc::new(punches),
        Arc::clone(clock),
        config.ledger_policy,
    ));
    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        tokens: Arc::new(JwtAccessTokens::new(
            &config.jwt_secret,
            config.token_ttl,
            Arc::clone(clock),
        )),
        punches: ledger.clone(),
        punches_query: ledger,
    }
}

/// Wire services onto Diesel repositories when a pool is configured, else onto
/// the in-memory store.
pub fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => ports_for(
            DieselPunchRepository::new(pool.clone()),
            DieselUserRepository::new(pool.clone()),
            config,
            &clock,
        ),
        None => {
            warn!("no database configured; punches and accounts are kept in memory");
            ports_for(
                InMemoryPunchRepository::default(),
                InMemoryUserRepository::default(),
                config,
                &clock,
            )
        }
    };
    web::Data::new(HttpState::new(ports))
}
