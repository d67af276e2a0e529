//! Driven port for bearer access tokens.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or checking access tokens.
    pub enum AccessTokenError {
        /// The token is past its expiry.
        Expired => "access token expired",
        /// Bad signature, malformed token, or a subject that is not a user id.
        Invalid { message: String } => "access token invalid: {message}",
        /// Signing a new token failed.
        Signing { message: String } => "access token signing failed: {message}",
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies the tokens that identify callers on protected routes.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokens: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AccessTokenError>;

    /// Return the user the token was issued to.
    fn verify(&self, token: &str) -> Result<UserId, AccessTokenError>;
}
