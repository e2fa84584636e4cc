//! Item persistence (data access layer).
//!
//! `ItemStore` is the seam between the HTTP layer and storage. Absence of a
//! record is a normal `Ok(None)` result; `Err` is reserved for store failures.

mod r#trait;

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryItemStore;
pub use r#trait::{ItemStore, StoreError, StoreResult};
pub use sqlite::SqliteItemStore;

#[cfg(test)]
pub(crate) mod conformance;
