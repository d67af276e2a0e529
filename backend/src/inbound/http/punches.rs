//! Punch ledger HTTP handlers.
//!
//! ```text
//! POST   /api/v1/punches                     {} | {"horario":"..."} | {"data","hora","minuto"}
//! GET    /api/v1/punches/{date}
//! GET    /api/v1/punches/{date}/total-hours
//! PUT    /api/v1/punches/{id}                {"horario":"..."}
//! DELETE /api/v1/punches/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    DayRequest, DeletePunchRequest, PunchTime, RegisterPunchRequest, UpdatePunchRequest,
    WorkedHours,
};
use crate::domain::{DayReference, Error, Punch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, FieldName, conflicting_fields_error, missing_field_error, parse_punch_id,
    parse_rfc3339_timestamp,
};

const HORARIO: FieldName = FieldName::new("horario");
const DATA: FieldName = FieldName::new("data");
const HORA: FieldName = FieldName::new("hora");
const MINUTO: FieldName = FieldName::new("minuto");
const PUNCH_ID: FieldName = FieldName::new("id");

/// Register body. Omit everything to punch "now".
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterPunchBody {
    /// RFC 3339 instant with offset.
    #[schema(format = "date-time", example = "2024-03-10T08:00:00Z")]
    pub horario: Option<String>,
    /// Civil date `YYYY-MM-DD` in the server's day reference.
    #[schema(format = "date", example = "2024-03-10")]
    pub data: Option<String>,
    /// Hour of day, 0 to 23.
    #[schema(minimum = 0, maximum = 23)]
    pub hora: Option<i64>,
    /// Minute of hour, 0 to 59.
    #[schema(minimum = 0, maximum = 59)]
    pub minuto: Option<i64>,
}

/// Correction body for `PUT /api/v1/punches/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePunchBody {
    #[schema(format = "date-time", example = "2024-03-10T12:00:00Z")]
    pub horario: Option<String>,
}

/// Wire form of a punch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PunchResponse {
    #[schema(example = "42")]
    pub id: String,
    #[schema(format = "date-time", example = "2024-03-10T08:00:00Z")]
    pub horario: String,
}

/// Worked time for one day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkedHoursResponse {
    #[schema(example = "8h 0m")]
    pub total_trabalhado: String,
    /// Whole seconds, rendered as a decimal string.
    #[schema(example = "28800")]
    pub total_segundos: String,
}

fn render_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<Punch> for PunchResponse {
    fn from(punch: Punch) -> Self {
        Self {
            id: punch.id().to_string(),
            horario: render_instant(punch.timestamp()),
        }
    }
}

impl From<WorkedHours> for WorkedHoursResponse {
    fn from(worked: WorkedHours) -> Self {
        Self {
            total_trabalhado: worked.total.display().to_owned(),
            total_segundos: worked.total.total_seconds().to_string(),
        }
    }
}

fn parse_body<T>(body: &[u8]) -> Result<T, Error>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request(format!("invalid JSON body: {err}"))
            .with_details(json!({ "code": "invalid_json" }))
    })
}

fn bounded(value: Option<i64>, field: FieldName, max: i64, errors: &mut FieldErrors) -> u32 {
    match value {
        None => {
            errors.missing(field);
            0
        }
        Some(raw) => match u32::try_from(raw) {
            Ok(valid) if raw <= max => valid,
            _ => {
                errors.out_of_range(field, 0, max);
                0
            }
        },
    }
}

fn civil_time(data: Option<&str>, hora: Option<i64>, minuto: Option<i64>) -> Result<PunchTime, Error> {
    let mut errors = FieldErrors::default();
    let date = match data {
        None => {
            errors.missing(DATA);
            None
        }
        Some(raw) => match DayReference::parse_date(raw) {
            Ok(date) => Some(date),
            Err(err) => {
                errors.invalid_date(DATA, err.to_string());
                None
            }
        },
    };
    let hour = bounded(hora, HORA, 23, &mut errors);
    let minute = bounded(minuto, MINUTO, 59, &mut errors);
    errors.finish()?;
    let date = date.ok_or_else(|| missing_field_error(DATA))?;
    Ok(PunchTime::Civil { date, hour, minute })
}

fn punch_time(body: RegisterPunchBody) -> Result<PunchTime, Error> {
    let RegisterPunchBody {
        horario,
        data,
        hora,
        minuto,
    } = body;
    let civil_given = data.is_some() || hora.is_some() || minuto.is_some();
    match (horario, civil_given) {
        (Some(_), true) => Err(conflicting_fields_error(HORARIO, &["data", "hora", "minuto"])),
        (Some(raw), false) => parse_rfc3339_timestamp(&raw, HORARIO).map(PunchTime::At),
        (None, true) => civil_time(data.as_deref(), hora, minuto),
        (None, false) => Ok(PunchTime::Now),
    }
}

/// Record a punch for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/punches",
    request_body(content = Option<RegisterPunchBody>, description = "Empty body punches now"),
    responses(
        (status = 201, description = "Punch recorded", body = PunchResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 409, description = "A punch already exists at this instant", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["punches"],
    operation_id = "registerPunch",
    security(("bearer" = []))
)]
#[post("/punches")]
pub async fn register_punch(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let time = punch_time(parse_body(&body)?)?;
    let punch = state
        .punches
        .register(RegisterPunchRequest {
            owner: user.user_id(),
            time,
        })
        .await?;
    Ok(HttpResponse::Created().json(PunchResponse::from(punch)))
}

/// List the caller's punches for one calendar day.
#[utoipa::path(
    get,
    path = "/api/v1/punches/{date}",
    params(("date" = String, Path, description = "Calendar day, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Punches ordered by time", body = [PunchResponse]),
        (status = 400, description = "Invalid date", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["punches"],
    operation_id = "listPunches",
    security(("bearer" = []))
)]
#[get("/punches/{date}")]
pub async fn list_punches(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    date: web::Path<String>,
) -> ApiResult<web::Json<Vec<PunchResponse>>> {
    let punches = state
        .punches_query
        .list_for_day(DayRequest {
            owner: user.user_id(),
            date: date.into_inner(),
        })
        .await?;
    Ok(web::Json(
        punches.into_iter().map(PunchResponse::from).collect(),
    ))
}

/// Total worked time for one calendar day.
#[utoipa::path(
    get,
    path = "/api/v1/punches/{date}/total-hours",
    params(("date" = String, Path, description = "Calendar day, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Worked total", body = WorkedHoursResponse),
        (status = 400, description = "Invalid date", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["punches"],
    operation_id = "workedHours",
    security(("bearer" = []))
)]
#[get("/punches/{date}/total-hours")]
pub async fn worked_hours(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    date: web::Path<String>,
) -> ApiResult<web::Json<WorkedHoursResponse>> {
    let worked = state
        .punches_query
        .worked_hours(DayRequest {
            owner: user.user_id(),
            date: date.into_inner(),
        })
        .await?;
    Ok(web::Json(worked.into()))
}

/// Move one of the caller's punches to a new instant.
#[utoipa::path(
    put,
    path = "/api/v1/punches/{id}",
    params(("id" = String, Path, description = "Punch id")),
    request_body = UpdatePunchBody,
    responses(
        (status = 200, description = "Punch updated", body = PunchResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such punch for this user", body = ErrorSchema),
        (status = 409, description = "A punch already exists at this instant", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["punches"],
    operation_id = "updatePunch",
    security(("bearer" = []))
)]
#[put("/punches/{id}")]
pub async fn update_punch(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<PunchResponse>> {
    let id = parse_punch_id(&id, PUNCH_ID)?;
    let UpdatePunchBody { horario } = parse_body(&body)?;
    let raw = horario.ok_or_else(|| missing_field_error(HORARIO))?;
    let timestamp = parse_rfc3339_timestamp(&raw, HORARIO)?;
    let punch = state
        .punches
        .update(UpdatePunchRequest {
            owner: user.user_id(),
            id,
            timestamp,
        })
        .await?;
    Ok(web::Json(punch.into()))
}

/// Delete one of the caller's punches.
#[utoipa::path(
    delete,
    path = "/api/v1/punches/{id}",
    params(("id" = String, Path, description = "Punch id")),
    responses(
        (status = 204, description = "Punch deleted"),
        (status = 400, description = "Invalid punch id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such punch for this user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["punches"],
    operation_id = "deletePunch",
    security(("bearer" = []))
)]
#[delete("/punches/{id}")]
pub async fn delete_punch(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_punch_id(&id, PUNCH_ID)?;
    state
        .punches
        .delete(DeletePunchRequest {
            owner: user.user_id(),
            id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "punches_tests.rs"]
mod tests;
