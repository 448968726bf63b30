//! HTTP request handlers for the catalog API.

// Utility submodules
pub mod pagination;

// Handler modules
pub mod health;
pub mod items;

// Re-export handlers (including utoipa __path types for OpenAPI)
pub use health::{__path_health_check, health_check, not_found};
pub use items::{__path_list_items, list_items};
pub use pagination::{ListItemsQuery, MAX_LIMIT};
