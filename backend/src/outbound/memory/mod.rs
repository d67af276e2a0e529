//! Process-local adapters used when no database is configured.
//!
//! State lives behind a `std::sync::Mutex`; a poisoned lock is reported as a
//! connection failure instead of panicking the request.

mod punch_repository;
mod user_repository;

pub use punch_repository::InMemoryPunchRepository;
pub use user_repository::InMemoryUserRepository;
