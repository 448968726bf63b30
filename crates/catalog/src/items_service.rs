//! Paginated item retrieval.

use std::sync::Arc;

use crate::{
    models::ItemPage,
    store::{ItemStore, StoreError},
};

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Serves pages of items in ascending id order.
///
/// Inputs are assumed to be validated already. The page read and the count
/// read are separate queries, so under concurrent writes `total` and `data`
/// may describe slightly different snapshots.
#[derive(Clone)]
pub struct ItemQueryService {
    store: Arc<dyn ItemStore>,
}

impl ItemQueryService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<ItemPage, StoreError> {
        let (data, total) = tokio::try_join!(
            self.store.find_ordered(limit, offset),
            self.store.count()
        )?;

        tracing::debug!(limit, offset, returned = data.len(), total, "Listed items");

        Ok(ItemPage {
            data,
            total,
            limit,
            offset,
        })
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        self.store.count().await
    }
}
