//! Client for the Inventory Optimizer REST backend: products, sales,
//! forecasts, revenue aggregates and the audit log.

pub mod models;
pub mod api;
pub mod core;
pub mod dashboard;
pub mod forms;

pub use api::{ApiClient, ApiError, InventoryBackend};
pub use crate::core::config::ClientConfig;
