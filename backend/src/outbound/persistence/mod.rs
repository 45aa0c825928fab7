//! Admission store adapters.
//!
//! - `DieselAdmissionRepository`: PostgreSQL through synchronous Diesel and
//!   an `r2d2` pool, with embedded migrations.
//! - `InMemoryAdmissionRepository`: process-local store used when no
//!   database is configured.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! internal to this module.

mod diesel_admission_repository;
mod in_memory_admission_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_admission_repository::DieselAdmissionRepository;
pub use in_memory_admission_repository::InMemoryAdmissionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PgPooledConnection, PoolConfig, PoolError};
