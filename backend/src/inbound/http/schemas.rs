//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their wire shape for utoipa.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The punch does not exist for the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate timestamp or duplicate email.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is not available yet.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "invalid date '2024-02-30'")]
    message: String,
    /// Correlation identifier, equal to the `trace-id` response header.
    #[schema(rename = "traceId", example = "0f4c7a9e-3c1d-4b8e-9a57-1d2f3e4a5b6c")]
    trace_id: Option<String>,
    /// Field-level problems, e.g. `{"field":"data","code":"invalid_date"}`.
    details: Option<serde_json::Value>,
}
