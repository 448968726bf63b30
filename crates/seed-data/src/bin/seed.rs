//! Seed script - tops the items table up to `SEED_TOTAL` rows
//!
//! Run with:
//! ```
//! SEED_TOTAL=50000 SEED_BATCH_SIZE=1000 cargo run -p seed-data --bin seed
//! ```

use std::sync::Arc;

use catalog::{
    config::DatabaseConfig,
    database::{self, Database},
};
use seed_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Seeding failed: {e:#}");
        return Err(e);
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let db_config = DatabaseConfig::from_env()?.with_max_connections(5);
    let seed_config = SeedConfig::from_env()?;

    let pool = database::connect(&db_config).await?;
    tracing::info!("Connected to database");

    database::migrate(&pool).await?;

    let seeder = Seeder::new(Arc::new(Database::new(pool.clone()))).with_config(seed_config);
    let result = seeder.seed().await;

    pool.close().await;
    tracing::info!("Database connection closed");

    match result? {
        SeedOutcome::AlreadySeeded { count } => {
            tracing::info!("Nothing to do: {count} items present");
        }
        SeedOutcome::Seeded {
            starting_count,
            inserted,
            batches,
        } => {
            tracing::info!("Seed completed!");
            tracing::info!("  Starting count: {starting_count}");
            tracing::info!("  Inserted: {inserted}");
            tracing::info!("  Batches: {batches}");
        }
    }

    Ok(())
}
