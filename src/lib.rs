//! Postline library modules.
//!
//! A small HTTP backend exposing CRUD endpoints for users, user settings,
//! posts, and group posts, backed by PostgreSQL through Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
