//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User};

/// Accounts keyed by normalised email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<EmailAddress, StoredCredentials>>,
}

impl InMemoryUserRepository {
    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<EmailAddress, StoredCredentials>>, UserPersistenceError>
    {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User, password_hash: &str) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        if accounts.contains_key(user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        accounts.insert(
            user.email().clone(),
            StoredCredentials {
                user_id: *user.id(),
                password_hash: password_hash.to_owned(),
            },
        );
        Ok(())
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self.lock()?.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, UserName};
    use rstest::rstest;

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            UserName::new("Ana").expect("name"),
            EmailAddress::new(email).expect("email"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn emails_are_unique_after_normalisation() {
        let repo = InMemoryUserRepository::default();
        repo.create(&user("ana@example.com"), "hash").await.expect("first");

        let error = repo
            .create(&user("ANA@example.com"), "hash")
            .await
            .expect_err("duplicate");

        assert_eq!(error, UserPersistenceError::duplicate_email("ana@example.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_round_trip_by_email() {
        let repo = InMemoryUserRepository::default();
        let account = user("ana@example.com");
        repo.create(&account, "hash").await.expect("create");

        let email = EmailAddress::new("ana@example.com").expect("email");
        let stored = repo
            .find_credentials_by_email(&email)
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(stored.user_id, *account.id());
        assert_eq!(stored.password_hash, "hash");
    }
}
