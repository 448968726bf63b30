//! Configuration types for item seeding.

use catalog::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for seeding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Row count the store should reach.
    pub target_count: i64,

    /// Number of items persisted per insert.
    pub batch_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl SeedConfig {
    pub const fn new(target_count: i64, batch_size: usize) -> Self {
        Self {
            target_count,
            batch_size,
        }
    }

    /// Full dataset: 50,000 items in batches of 1,000.
    pub const fn full() -> Self {
        Self::new(50_000, 1_000)
    }

    /// Small dataset for local development: 1,000 items in batches of 100.
    pub const fn small() -> Self {
        Self::new(1_000, 100)
    }

    /// Reads `SEED_TOTAL` and `SEED_BATCH_SIZE`, falling back to [`SeedConfig::full`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::full();
        Ok(Self {
            target_count: parse_var("SEED_TOTAL", lookup("SEED_TOTAL"), defaults.target_count)?,
            batch_size: parse_var(
                "SEED_BATCH_SIZE",
                lookup("SEED_BATCH_SIZE"),
                defaults.batch_size,
            )?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
