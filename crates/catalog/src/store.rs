//! Storage abstraction for items.
//!
//! [`ItemStore`] is the only thing the seeder and the query service know
//! about persistence. [`Database`](crate::database::Database) implements it
//! on PostgreSQL; [`MemoryStore`] keeps everything in a vector and is what
//! the unit and API tests run against.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::models::{Item, NewItem};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Persistence failure: {0}")]
    Persistence(#[source] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(err),
            _ => StoreError::Persistence(err),
        }
    }
}

/// An ordered, append-only collection of items.
///
/// Implementations must assign unique ids that reflect insertion order, and
/// `append_batch` must be all-or-nothing per call.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Total number of stored items.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Items ordered by ascending id, skipping `offset` and returning at most `limit`.
    async fn find_ordered(&self, limit: i64, offset: i64) -> Result<Vec<Item>, StoreError>;

    /// Persists `items` atomically and returns them with their assigned ids,
    /// in ascending id order.
    async fn append_batch(&self, items: Vec<NewItem>) -> Result<Vec<Item>, StoreError>;
}

#[derive(Default)]
struct MemoryState {
    items: Vec<Item>,
    next_id: i64,
}

/// In-process [`ItemStore`].
///
/// Can be told to reject one specific `append_batch` call, committing
/// nothing from it, to simulate a run interrupted mid-seed.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    attempts: AtomicUsize,
    successes: AtomicUsize,
    fail_at: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects the append attempt with zero-based index `attempt`
    /// and accepts every other one.
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    /// A store pre-filled with `count` items named `Item 1..=count`.
    pub async fn with_items(count: i64) -> Self {
        let store = Self::new();
        let items = (1..=count)
            .map(|n| NewItem::new(format!("Item {n}")))
            .collect();
        store.insert(items).await;
        store
    }

    /// Number of successful `append_batch` calls so far.
    pub fn append_calls(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored item in id order.
    pub async fn items(&self) -> Vec<Item> {
        self.state.read().await.items.clone()
    }

    async fn insert(&self, items: Vec<NewItem>) -> Vec<Item> {
        let mut state = self.state.write().await;
        let now = OffsetDateTime::now_utc();
        let mut committed = Vec::with_capacity(items.len());
        for item in items {
            state.next_id += 1;
            committed.push(Item {
                id: state.next_id,
                name: item.name,
                created_at: item.created_at.unwrap_or(now),
            });
        }
        state.items.extend(committed.iter().cloned());
        committed
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.state.read().await.items.len() as i64)
    }

    async fn find_ordered(&self, limit: i64, offset: i64) -> Result<Vec<Item>, StoreError> {
        let state = self.state.read().await;
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(state.items.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn append_batch(&self, items: Vec<NewItem>) -> Result<Vec<Item>, StoreError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(attempt) {
            return Err(StoreError::Unavailable(format!(
                "append attempt {} rejected",
                attempt + 1
            )));
        }

        let committed = self.insert(items).await;
        self.successes.fetch_add(1, Ordering::SeqCst);
        Ok(committed)
    }
}
