use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use time::OffsetDateTime;

use crate::{
    config::DatabaseConfig,
    models::{Item, NewItem},
    store::{ItemStore, StoreError},
};

/// Opens a connection pool using the configured pool limits.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    tracing::info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "Connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url())
        .await
        .map_err(StoreError::Connection)?;

    Ok(pool)
}

/// Applies the bundled schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for Database {
    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_ordered(&self, limit: i64, offset: i64) -> Result<Vec<Item>, StoreError> {
        let items: Vec<Item> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM items
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn append_batch(&self, items: Vec<NewItem>) -> Result<Vec<Item>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let (names, created): (Vec<String>, Vec<Option<OffsetDateTime>>) = items
            .into_iter()
            .map(|item| (item.name, item.created_at))
            .unzip();

        // A single statement, so the whole batch commits or none of it does.
        let mut committed: Vec<Item> = sqlx::query_as(
            r#"
            INSERT INTO items (name, created_at)
            SELECT t.name, COALESCE(t.created_at, NOW())
            FROM UNNEST($1::text[], $2::timestamptz[]) WITH ORDINALITY AS t(name, created_at, ord)
            ORDER BY t.ord
            RETURNING id, name, created_at
            "#,
        )
        .bind(&names)
        .bind(&created)
        .fetch_all(&self.pool)
        .await?;

        committed.sort_by_key(|item| item.id);
        Ok(committed)
    }
}
