//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{punches, users};

/// Insertable struct for creating accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// The columns login needs.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Row struct for reading from the punches table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = punches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PunchRow {
    pub id: i64,
    pub user_id: Uuid,
    pub punched_at: DateTime<Utc>,
}

/// Insertable struct for recording a punch; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = punches)]
pub(crate) struct NewPunchRow {
    pub user_id: Uuid,
    pub punched_at: DateTime<Utc>,
}

/// Changeset for timestamp corrections.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = punches)]
pub(crate) struct PunchTimestampUpdate {
    pub punched_at: DateTime<Utc>,
}
