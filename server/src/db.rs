use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Error, Debug)]
pub enum DbSetupError {
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("failed to run migrations: {0}")]
    Migration(String),
}

/// Builds the pool. Every checkout pings the connection first so that
/// connections dropped while idle are replaced instead of handed out.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, DbSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .test_on_check_out(true)
        .build(manager)?;
    Ok(pool)
}

/// Applies pending embedded migrations, returning how many ran.
pub fn run_migrations(pool: &DbPool) -> Result<usize, DbSetupError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbSetupError::Migration(e.to_string()))?;

    for version in &applied {
        tracing::info!(%version, "applied migration");
    }

    Ok(applied.len())
}
