//! Infrastructure layer: item persistence and service configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, ServiceConfig, StoreBackend};
pub use store::{InMemoryItemStore, ItemStore, SqliteItemStore, StoreError, StoreResult};
