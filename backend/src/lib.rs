//! Punch clock backend library.
//!
//! Hexagonal layout: [`domain`] holds the ledger, pairing and account logic
//! behind ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports with Diesel, in-memory stores, Argon2 and JWT.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
