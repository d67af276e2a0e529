//! Punch clock entry-point: loads settings, prepares storage and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use punchclock::inbound::http::health::HealthState;
use punchclock::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use punchclock::settings::{BuildMode, ServerSettings};

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load configuration")?;
    let mode = BuildMode::from_debug_assertions();

    let mut config = ServerConfig::new(
        settings.bind_addr()?,
        settings.jwt_secret(mode)?,
        settings.token_ttl()?,
        settings.ledger_policy()?,
    );

    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let bind_addr = config.bind_addr;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "punch clock listening");
    server.await.wrap_err("server terminated with an error")
}
