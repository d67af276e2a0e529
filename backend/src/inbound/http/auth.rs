//! Bearer token extraction for protected handlers.
//!
//! Handlers take an [`AuthenticatedUser`] argument; the owner of every punch
//! operation comes from here and never from the request body.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::AccessTokenError;
use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller proven by a valid access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

fn map_token_error(error: AccessTokenError) -> Error {
    match error {
        AccessTokenError::Expired => Error::unauthorized("access token expired"),
        AccessTokenError::Invalid { message } => {
            debug!(%message, "rejected access token");
            Error::unauthorized("invalid access token")
        }
        AccessTokenError::Signing { message } => {
            Error::internal(format!("token verification failed: {message}"))
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let token =
        bearer_token(req.headers()).ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(map_token_error)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(actix_web::Error::from))
    }
}
