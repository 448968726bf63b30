//! Bulk item seeding for the catalog service.
//!
//! Fills the `items` table up to a target row count in fixed-size batches.
//! Progress is re-derived from the live row count on every run, so an
//! interrupted seed can simply be started again.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let outcome = Seeder::new(store)
//!     .with_config(SeedConfig::new(250, 100))
//!     .seed()
//!     .await?;
//! ```

pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{BatchPlan, SeedError, SeedOutcome, Seeder, plan_batches};
    pub use crate::generators::ItemGenerator;
}
