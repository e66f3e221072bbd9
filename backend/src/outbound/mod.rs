//! Outbound adapters implementing the todo repository port.
//!
//! - **persistence**: PostgreSQL via Diesel, `diesel-async`, and `bb8`.
//! - **memory**: process-local store used when no database is configured.
//!
//! Adapters translate between storage representations and domain types; the
//! ordering rules themselves live in the domain.

pub mod memory;
pub mod persistence;
