//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`PunchCommand`, `PunchQuery`, `LoginService`,
//! `UserRegistration`) are called by inbound adapters. Driven ports
//! (`PunchRepository`, `UserRepository`, `CredentialHasher`, `AccessTokens`)
//! are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_tokens;
mod credential_hasher;
mod login_service;
mod punch_command;
mod punch_query;
mod punch_repository;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use access_tokens::MockAccessTokens;
pub use access_tokens::{AccessTokenError, AccessTokens, IssuedToken};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use punch_command::MockPunchCommand;
pub use punch_command::{
    DeletePunchRequest, PunchCommand, PunchTime, RegisterPunchRequest, UpdatePunchRequest,
};
#[cfg(test)]
pub use punch_query::MockPunchQuery;
pub use punch_query::{DayRequest, PunchQuery, WorkedHours};
#[cfg(test)]
pub use punch_repository::MockPunchRepository;
pub use punch_repository::{PunchRepository, PunchRepositoryError};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
