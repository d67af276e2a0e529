//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP path, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the bearer token security scheme.
//! Swagger UI serves it in debug builds; `openapi_dump` prints it.

use crate::inbound::http::punches::{
    PunchResponse, RegisterPunchBody, UpdatePunchBody, WorkedHoursResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "bearer";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Punch clock API",
        description = "Record clock-in/clock-out punches and compute daily worked hours."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::punches::register_punch,
        crate::inbound::http::punches::list_punches,
        crate::inbound::http::punches::worked_hours,
        crate::inbound::http::punches::update_punch,
        crate::inbound::http::punches::delete_punch,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::health::root,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        MessageResponse,
        TokenResponse,
        RegisterPunchBody,
        UpdatePunchBody,
        PunchResponse,
        WorkedHoursResponse,
    )),
    tags(
        (name = "users", description = "Account registration and login"),
        (name = "punches", description = "Punch ledger and worked hours"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
