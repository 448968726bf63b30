//! Entity generators for seed data.
//!
//! - [`ItemGenerator`]: sequentially named catalog items

pub mod item;

pub use item::ItemGenerator;
