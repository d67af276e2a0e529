//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain values;
//! row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module. Connections come from a shared `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use punchclock::outbound::persistence::{
//!     DbPool, DieselPunchRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! let url = "postgres://punchclock@localhost/punchclock";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let punches = DieselPunchRepository::new(pool);
//! # let _ = punches;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_punch_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_punch_repository::DieselPunchRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
