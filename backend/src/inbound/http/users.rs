//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"nome":"Ana","email":"ana@example.com","password":"s3cret"}
//! POST /api/v1/login {"email":"ana@example.com","password":"s3cret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::domain::{
    CredentialsValidationError, Error, LoginCredentials, NewAccount, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const REGISTERED_MESSAGE: &str = "User created successfully";

/// Registration body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Ana Souza")]
    pub nome: String,
    #[serde(default)]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Confirmation returned after registration.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User created successfully")]
    pub message: String,
}

/// Access token returned after a successful login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

fn field_problem(field: &str, code: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let message = err.to_string();
    match err {
        CredentialsValidationError::EmptyEmail => field_problem("email", "empty_email", message),
        CredentialsValidationError::EmptyPassword => {
            field_problem("password", "empty_password", message)
        }
        CredentialsValidationError::Account(account) => match account {
            UserValidationError::EmptyName => field_problem("nome", "empty_name", message),
            UserValidationError::NameTooLong { .. } => {
                field_problem("nome", "name_too_long", message)
            }
            UserValidationError::EmptyEmail => field_problem("email", "empty_email", message),
            UserValidationError::InvalidEmail => field_problem("email", "invalid_email", message),
            UserValidationError::EmailTooLong { .. } => {
                field_problem("email", "email_too_long", message)
            }
            UserValidationError::EmptyId | UserValidationError::InvalidId => {
                Error::invalid_request(message)
            }
        },
    }
}

/// Open a new account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        nome,
        email,
        password,
    } = payload.into_inner();
    let account =
        NewAccount::try_from_parts(&nome, &email, &password).map_err(map_credentials_error)?;
    state.registration.register(&account).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: REGISTERED_MESSAGE.to_owned(),
    }))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    let issued = state.tokens.issue(&user_id).map_err(|err| {
        error!(error = %err, "failed to issue access token");
        Error::internal(format!("failed to issue access token: {err}"))
    })?;
    Ok(web::Json(TokenResponse {
        token: issued.token,
    }))
}
