use std::sync::Arc;

use catalog::{
    config::{DatabaseConfig, ServerConfig},
    database::{self, Database},
    run_server,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let db_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let pool = database::connect(&db_config).await?;
    database::migrate(&pool).await?;

    run_server(Arc::new(Database::new(pool)), server_config.port).await
}
