//! Database plumbing for the `PostgreSQL` catalog.
//!
//! # Tables
//!
//! - `products` - One JSONB document per catalog product
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`, embedded at
//! build time and run via:
//! ```bash
//! techpulse migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Catalog migrations applied");
    Ok(())
}
