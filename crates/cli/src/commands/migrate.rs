//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! STOREFRONT_DATABASE_URL=postgres://... techpulse migrate
//! ```
//!
//! Migration files live in `crates/storefront/migrations/`.

use techpulse_storefront::db;

use super::Context;

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns an error if no database is configured or a migration fails.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = ctx
        .config
        .database_url
        .as_ref()
        .ok_or("STOREFRONT_DATABASE_URL not set")?;

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(database_url).await?;

    tracing::info!("Running catalog migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
