//! Resumable bulk item seeding.

use std::{ops::Range, sync::Arc};

use catalog::store::{ItemStore, StoreError};
use thiserror::Error;
use tracing::info;

use crate::{config::SeedConfig, generators::ItemGenerator};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Batch {batch} failed after {seeded} items were committed: {source}")]
    Batch {
        /// 1-based index of the failed batch within this run.
        batch: usize,
        /// Row count reached before the failed batch.
        seeded: i64,
        #[source]
        source: StoreError,
    },

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
}

/// Progress callback, invoked after each batch with `(seeded, target)`.
pub type ProgressCallback = Box<dyn Fn(i64, i64) + Send + Sync>;

/// One batch of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// 1-based sequence number of the first item in the batch.
    pub first_sequence: i64,
    pub len: usize,
}

impl BatchPlan {
    /// Sequence numbers covered by this batch.
    pub fn sequences(&self) -> Range<i64> {
        self.first_sequence..self.first_sequence + self.len as i64
    }
}

/// Splits the shortfall between `current` and `target` into consecutive
/// batches of at most `batch_size` items, lazily.
///
/// Sequence numbers continue from `current`, so the item at position `k`
/// of the run (0-based) gets sequence `current + k + 1`. Yields nothing
/// when there is no shortfall or `batch_size` is zero.
pub fn plan_batches(
    current: i64,
    target: i64,
    batch_size: usize,
) -> impl Iterator<Item = BatchPlan> {
    let remaining = if batch_size == 0 {
        0
    } else {
        target.saturating_sub(current).max(0)
    };
    let step = i64::try_from(batch_size).unwrap_or(i64::MAX);

    (0..remaining)
        .step_by(batch_size.max(1))
        .map(move |start| BatchPlan {
            first_sequence: current + start + 1,
            len: usize::try_from(step.min(remaining - start)).unwrap_or(usize::MAX),
        })
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held at least the target number of items.
    AlreadySeeded { count: i64 },
    /// New items were inserted.
    Seeded {
        starting_count: i64,
        inserted: i64,
        batches: usize,
    },
}

/// Tops an [`ItemStore`] up to a target row count.
///
/// Progress is derived from the store's live count on every run, so an
/// interrupted run can simply be started again. Assumes a single writer.
pub struct Seeder {
    store: Arc<dyn ItemStore>,
    config: SeedConfig,
    generator: ItemGenerator,
    progress: Option<ProgressCallback>,
}

impl Seeder {
    /// Creates a new seeder over `store` with [`SeedConfig::default`].
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            config: SeedConfig::default(),
            generator: ItemGenerator::new(),
            progress: None,
        }
    }

    pub fn with_config(mut self, config: SeedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_target_count(mut self, target_count: i64) -> Self {
        self.config.target_count = target_count;
        self
    }

    /// Sets the batch size for bulk operations.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Seeds items until the store holds `target_count` rows.
    ///
    /// Each batch is committed before the next is generated. A failed batch
    /// aborts the run; batches committed before it stay in place.
    pub async fn seed(&self) -> Result<SeedOutcome, SeedError> {
        let SeedConfig {
            target_count,
            batch_size,
        } = self.config;
        if batch_size == 0 {
            return Err(SeedError::InvalidBatchSize);
        }

        let count = self.store.count().await?;
        info!("Current item count: {count}");

        if count >= target_count {
            info!("Database already seeded with sufficient items.");
            return Ok(SeedOutcome::AlreadySeeded { count });
        }

        info!("Seeding items...");

        let mut inserted = 0i64;
        let mut batches = 0usize;

        for plan in plan_batches(count, target_count, batch_size) {
            let batch = self.generator.generate(&plan);

            let committed = self
                .store
                .append_batch(batch)
                .await
                .map_err(|source| SeedError::Batch {
                    batch: batches + 1,
                    seeded: count + inserted,
                    source,
                })?;

            batches += 1;
            inserted += committed.len() as i64;
            let seeded = (count + inserted).min(target_count);
            info!("Seeded {seeded} / {target_count} items");
            if let Some(progress) = &self.progress {
                progress(seeded, target_count);
            }
        }

        info!("Seeding completed!");

        Ok(SeedOutcome::Seeded {
            starting_count: count,
            inserted,
            batches,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Mutex};

    use catalog::store::MemoryStore;

    use super::*;

    fn names(items: &[catalog::models::Item]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    fn expected_names(range: std::ops::RangeInclusive<i64>) -> Vec<String> {
        range.map(|n| format!("Item {n}")).collect()
    }

    #[test]
    fn test_plan_partial_last_batch() {
        let plans: Vec<BatchPlan> = plan_batches(0, 250, 100).collect();
        assert_eq!(
            plans,
            vec![
                BatchPlan {
                    first_sequence: 1,
                    len: 100
                },
                BatchPlan {
                    first_sequence: 101,
                    len: 100
                },
                BatchPlan {
                    first_sequence: 201,
                    len: 50
                },
            ]
        );
    }

    #[test]
    fn test_plan_continues_from_current() {
        let plans: Vec<BatchPlan> = plan_batches(37, 100, 25).collect();
        let sizes: Vec<usize> = plans.iter().map(|p| p.len).collect();
        assert_eq!(sizes, vec![25, 25, 13]);
        assert_eq!(plans[0].first_sequence, 38);
        assert_eq!(plans[2].sequences(), 88..101);
    }

    #[test]
    fn test_plan_single_batch_when_batch_exceeds_remaining() {
        assert_eq!(
            plan_batches(990, 1_000, 1_000).collect::<Vec<_>>(),
            vec![BatchPlan {
                first_sequence: 991,
                len: 10
            }]
        );
    }

    #[test]
    fn test_plan_huge_batch_size_is_one_batch() {
        assert_eq!(
            plan_batches(0, 250, usize::MAX).collect::<Vec<_>>(),
            vec![BatchPlan {
                first_sequence: 1,
                len: 250
            }]
        );
    }

    #[test]
    fn test_plan_nothing_to_do() {
        assert_eq!(plan_batches(0, 0, 100).count(), 0);
        assert_eq!(plan_batches(0, -5, 100).count(), 0);
        assert_eq!(plan_batches(500, 250, 100).count(), 0);
        assert_eq!(plan_batches(0, 250, 0).count(), 0);
    }

    #[test]
    fn test_plan_covers_every_sequence_once() {
        let sequences: Vec<i64> = plan_batches(3, 1_234, 97)
            .flat_map(|p| p.sequences())
            .collect();
        assert_eq!(sequences, (4..=1_234).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_seed_fresh_store() {
        let store = Arc::new(MemoryStore::new());
        let seeder = Seeder::new(store.clone()).with_config(SeedConfig::new(250, 100));

        let outcome = seeder.seed().await.unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                starting_count: 0,
                inserted: 250,
                batches: 3
            }
        );
        assert_eq!(store.append_calls(), 3);
        assert_eq!(names(&store.items().await), expected_names(1..=250));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let seeder = Seeder::new(store.clone()).with_config(SeedConfig::small());

        seeder.seed().await.unwrap();
        let second = seeder.seed().await.unwrap();

        assert_eq!(second, SeedOutcome::AlreadySeeded { count: 1_000 });
        assert_eq!(store.count().await.unwrap(), 1_000);
        assert_eq!(store.append_calls(), 10);
    }

    #[tokio::test]
    async fn test_seed_tops_up_existing_rows() {
        let store = Arc::new(MemoryStore::with_items(37).await);
        let seeder = Seeder::new(store.clone())
            .with_target_count(100)
            .with_batch_size(25);

        let outcome = seeder.seed().await.unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                starting_count: 37,
                inserted: 63,
                batches: 3
            }
        );
        assert_eq!(names(&store.items().await), expected_names(1..=100));
    }

    #[tokio::test]
    async fn test_seed_resumes_after_failed_batch() {
        let store = Arc::new(MemoryStore::failing_at(2));
        let seeder = Seeder::new(store.clone()).with_config(SeedConfig::new(1_000, 100));

        let err = seeder.seed().await.unwrap_err();
        match err {
            SeedError::Batch { batch, seeded, .. } => {
                assert_eq!(batch, 3);
                assert_eq!(seeded, 200);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.count().await.unwrap(), 200);

        let outcome = seeder.seed().await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                starting_count: 200,
                inserted: 800,
                batches: 8
            }
        );

        let items = store.items().await;
        assert_eq!(names(&items), expected_names(1..=1_000));
        let unique: HashSet<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(unique.len(), 1_000);
    }

    #[tokio::test]
    async fn test_seed_with_huge_batch_size() {
        let store = Arc::new(MemoryStore::new());
        let seeder = Seeder::new(store.clone()).with_config(SeedConfig::new(250, usize::MAX));

        let outcome = seeder.seed().await.unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                starting_count: 0,
                inserted: 250,
                batches: 1
            }
        );
        assert_eq!(names(&store.items().await), expected_names(1..=250));
    }

    #[tokio::test]
    async fn test_non_positive_target_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let seeder = Seeder::new(store.clone()).with_target_count(0);

        assert_eq!(
            seeder.seed().await.unwrap(),
            SeedOutcome::AlreadySeeded { count: 0 }
        );
        assert_eq!(store.append_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_batch_size_rejected() {
        let store = Arc::new(MemoryStore::new());
        let seeder = Seeder::new(store.clone()).with_batch_size(0);

        assert!(matches!(
            seeder.seed().await,
            Err(SeedError::InvalidBatchSize)
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_progress_reported_per_batch() {
        let store = Arc::new(MemoryStore::new());
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink = reports.clone();
        let seeder = Seeder::new(store)
            .with_config(SeedConfig::new(250, 100))
            .with_progress(Box::new(move |seeded, target| {
                sink.lock().unwrap().push((seeded, target));
            }));

        seeder.seed().await.unwrap();

        assert_eq!(
            *reports.lock().unwrap(),
            vec![(100, 250), (200, 250), (250, 250)]
        );
    }
}
