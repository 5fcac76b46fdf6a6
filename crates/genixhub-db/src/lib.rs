//! # Genix Hub DB
//!
//! Account storage for the Genix Hub API.
//!
//! - [`store`]: the [`AccountStore`] trait every handler talks to
//! - [`postgres`]: PostgreSQL implementation backed by SQLx
//! - [`memory`]: in-process implementation for tests and throwaway runs
//!
//! # Example
//!
//! ```ignore
//! use genixhub_db::{PgAccountStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! let store = PgAccountStore::new(pool);
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
pub use store::{AccountStore, UniqueField};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns the SQLx error if the database cannot be reached.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies the embedded migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
