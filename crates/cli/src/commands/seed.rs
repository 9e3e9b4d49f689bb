//! Seed the catalog database from a JSON product list.
//!
//! Products are validated before the database is touched and then upserted
//! by id, so the command can be re-run after editing the file.

use std::path::Path;

use techpulse_storefront::catalog::{PgCatalog, load_seed_file};
use techpulse_storefront::db;
use tracing::info;

use super::Context;

/// Upsert every product in `file`.
///
/// # Errors
///
/// Returns an error if no database is configured, the file is invalid, or
/// the write fails.
pub async fn run(ctx: &Context, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = ctx
        .config
        .database_url
        .as_ref()
        .ok_or("STOREFRONT_DATABASE_URL not set")?;

    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    // Read and validate before connecting to the database
    let products = load_seed_file(file).await?;
    info!(count = products.len(), "Parsed seed file");

    let pool = db::create_pool(database_url).await?;
    info!("Connected to database");

    let written = PgCatalog::new(pool).upsert_all(&products).await?;
    info!("Seeding complete! Products written: {written}");
    Ok(())
}
