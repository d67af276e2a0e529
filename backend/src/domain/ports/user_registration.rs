//! Driving port for opening new accounts.

use async_trait::async_trait;

use crate::domain::{Error, NewAccount, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account. Fails with `conflict` when the email is taken.
    async fn register(&self, account: &NewAccount) -> Result<User, Error>;
}
