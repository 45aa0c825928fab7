//! Embedded schema migrations applied at startup.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::DbPool;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// No connection could be checked out.
    #[error("migration connection failed: {0}")]
    Connection(#[from] super::pool::PoolError),
    /// A migration failed to apply.
    #[error("migration failed: {message}")]
    Apply {
        /// Reason reported by the harness.
        message: String,
    },
}

/// Apply every pending migration, returning how many ran.
///
/// Blocks the calling thread.
pub fn run_pending_migrations(pool: &DbPool) -> Result<usize, MigrationError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}
