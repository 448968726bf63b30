//! Database integration for seeding items.
//!
//! The [`Seeder`] tops the store up to a target row count in fixed-size
//! batches, with progress reporting. It resumes from the live row count.

mod seeder;

pub use seeder::{BatchPlan, ProgressCallback, SeedError, SeedOutcome, Seeder, plan_batches};
