//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;

use crate::domain::UserId;
use crate::domain::ports::{
    AccessTokenError, MockAccessTokens, MockLoginService, MockPunchCommand, MockPunchQuery,
    MockUserRegistration,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`fixture_tokens`].
pub const VALID_TOKEN: &str = "valid-token";
/// Token [`fixture_tokens`] reports as expired.
pub const EXPIRED_TOKEN: &str = "expired";

const FIXTURE_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

pub fn fixture_user() -> UserId {
    UserId::new(FIXTURE_USER).expect("fixture user id")
}

/// `Authorization` header carrying [`VALID_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {VALID_TOKEN}"))
}

/// Token port that recognises [`VALID_TOKEN`] and [`EXPIRED_TOKEN`].
pub fn fixture_tokens() -> MockAccessTokens {
    let mut tokens = MockAccessTokens::new();
    tokens.expect_verify().returning(|token| match token {
        VALID_TOKEN => Ok(fixture_user()),
        EXPIRED_TOKEN => Err(AccessTokenError::expired()),
        other => Err(AccessTokenError::invalid(format!("unknown token {other}"))),
    });
    tokens
}

/// Builds [`HttpState`] from mocks. Ports that are not replaced carry no
/// expectations, so an unexpected call fails the test.
pub struct StateBuilder {
    login: MockLoginService,
    registration: MockUserRegistration,
    tokens: MockAccessTokens,
    punches: MockPunchCommand,
    punches_query: MockPunchQuery,
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self {
            login: MockLoginService::new(),
            registration: MockUserRegistration::new(),
            tokens: fixture_tokens(),
            punches: MockPunchCommand::new(),
            punches_query: MockPunchQuery::new(),
        }
    }
}

impl StateBuilder {
    pub fn login(mut self, login: MockLoginService) -> Self {
        self.login = login;
        self
    }

    pub fn registration(mut self, registration: MockUserRegistration) -> Self {
        self.registration = registration;
        self
    }

    pub fn tokens(mut self, tokens: MockAccessTokens) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn punches(mut self, punches: MockPunchCommand) -> Self {
        self.punches = punches;
        self
    }

    pub fn punches_query(mut self, punches_query: MockPunchQuery) -> Self {
        self.punches_query = punches_query;
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            tokens: Arc::new(self.tokens),
            punches: Arc::new(self.punches),
            punches_query: Arc::new(self.punches_query),
        })
    }
}
