//! Todo backend library.
//!
//! Hexagonal layout: [`domain`] holds the todo model, service and ports,
//! [`inbound::http`] exposes the REST API, and [`outbound`] provides the
//! PostgreSQL and in-memory stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
