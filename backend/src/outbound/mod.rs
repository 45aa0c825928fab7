//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: admission stores (PostgreSQL via Diesel, in-memory)
//! - **viacep**: postal-code lookups over HTTP
//!
//! Adapters translate between domain types and transport representations.
//! They contain no business logic.

pub mod persistence;
pub mod viacep;
