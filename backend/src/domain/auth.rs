//! Authentication inputs: login credentials and new-account requests.
//!
//! Handlers build these from raw strings before talking to a port, so the
//! services only ever see validated values.

use zeroize::Zeroizing;

use crate::domain::{EmailAddress, UserName, UserValidationError};

/// Validation failures for login and registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error(transparent)]
    Account(#[from] UserValidationError),
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty.
/// - `password` is non-empty; whitespace is preserved.
///
/// # Examples
/// ```
/// use punchclock::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ana@Example.com", "s3cret").unwrap();
/// assert_eq!(creds.email(), "ana@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated request to open a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl NewAccount {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let name = UserName::new(name)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("ana@example.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("ana@example.com", " pw ")
            .expect("valid credentials");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("", "ana@example.com", "pw", CredentialsValidationError::Account(UserValidationError::EmptyName))]
    #[case("Ana", "nope", "pw", CredentialsValidationError::Account(UserValidationError::InvalidEmail))]
    #[case("Ana", "ana@example.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_new_accounts(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = NewAccount::try_from_parts(name, email, password).expect_err("must fail");
        assert_eq!(err, expected);
    }
}
