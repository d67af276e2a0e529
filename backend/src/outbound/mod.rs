//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel and `bb8`.
//! - **memory**: process-local repositories for running without a database.
//! - **security**: Argon2 password hashing and HS256 access tokens.
//!
//! Adapters translate between domain values and infrastructure types and
//! hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
