//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
        /// Lower-cased; unique across accounts.
        #[max_length = 255]
        email -> Varchar,
        /// Argon2 PHC string.
        #[max_length = 255]
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clock events. Entry or exit is never stored; it is positional.
    punches (id) {
        id -> Int8,
        user_id -> Uuid,
        punched_at -> Timestamptz,
    }
}

diesel::joinable!(punches -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(punches, users);
