//! Shared validation helpers for inbound HTTP adapters.
//!
//! Single-field failures carry `details: {field, value?, code}`. Bodies with
//! several independent fields collect every problem into
//! `details: {errors: [...]}` so clients fix them in one round trip.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::domain::{Error, PunchId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidTimestamp,
    InvalidDate,
    OutOfRange,
    InvalidPunchId,
    ConflictingFields,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidPunchId => "invalid_punch_id",
            ErrorCode::ConflictingFields => "conflicting_fields",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: Option<&str>) -> Error {
    let mut details = json!({ "field": field.as_str(), "code": code.as_str() });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), Value::String(value.to_owned()));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
        None,
    )
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::InvalidTimestamp,
        format!("{name} must be an RFC 3339 timestamp with an offset"),
        Some(value),
    )
}

pub(crate) fn parse_rfc3339_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, value))
}

pub(crate) fn parse_punch_id(value: &str, field: FieldName) -> Result<PunchId, Error> {
    value.parse::<PunchId>().map_err(|err| {
        field_error(field, ErrorCode::InvalidPunchId, err.to_string(), Some(value))
    })
}

pub(crate) fn conflicting_fields_error(field: FieldName, others: &[&str]) -> Error {
    Error::invalid_request(format!(
        "{} cannot be combined with {}",
        field.as_str(),
        others.join("/")
    ))
    .with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::ConflictingFields.as_str(),
    }))
}

/// Accumulates field problems for multi-field bodies.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<Value>);

impl FieldErrors {
    fn push(&mut self, field: FieldName, code: ErrorCode, message: String) {
        self.0.push(json!({
            "field": field.as_str(),
            "code": code.as_str(),
            "message": message,
        }));
    }

    pub(crate) fn missing(&mut self, field: FieldName) {
        self.push(
            field,
            ErrorCode::MissingField,
            format!("missing required field: {}", field.as_str()),
        );
    }

    pub(crate) fn invalid_date(&mut self, field: FieldName, message: String) {
        self.push(field, ErrorCode::InvalidDate, message);
    }

    pub(crate) fn out_of_range(&mut self, field: FieldName, min: i64, max: i64) {
        self.push(
            field,
            ErrorCode::OutOfRange,
            format!("{} must be between {min} and {max}", field.as_str()),
        );
    }

    /// `Ok(())` when nothing was recorded, otherwise one aggregated error.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.0.is_empty() {
            return Ok(());
        }
        Err(Error::invalid_request("request validation failed")
            .with_details(json!({ "errors": self.0 })))
    }
}
