//! Account registration and credential checks.
//!
//! Passwords only ever reach storage as hashes produced by the
//! [`CredentialHasher`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, LoginService, UserPersistenceError, UserRegistration,
    UserRepository,
};
use crate::domain::{EmailAddress, Error, LoginCredentials, NewAccount, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email already registered: {email}"))
        }
        other => {
            error!(error = %other, "user repository failure");
            Error::internal(format!("user store error: {other}"))
        }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    error!(%error, "credential hashing failure");
    Error::internal(format!("credential hashing error: {error}"))
}

/// Account service implementing [`UserRegistration`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> UserRegistration for AccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn register(&self, account: &NewAccount) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(account.password())
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            account.name().clone(),
            account.email().clone(),
        );
        self.users
            .create(&user, &password_hash)
            .await
            .map_err(map_persistence_error)?;
        debug!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        // An address that could never have registered cannot match a stored row.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let stored = self
            .users
            .find_credentials_by_email(&email)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user_id)
    }
}
