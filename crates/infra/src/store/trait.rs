use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{Item, ItemFields, ItemFilter, ItemId, Page};

pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure failure while talking to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistent collection of item records.
///
/// Implementations own the records exclusively; callers get copies.
/// Concurrent writers to the same identifier are resolved by the backend
/// (last write wins); no additional ordering is imposed here.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Fetch one item, `None` if no record has this identifier.
    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Items in identifier order, skipping `page.skip` and returning at most `page.limit`.
    async fn list(&self, page: Page) -> StoreResult<Vec<Item>>;

    /// Insert a new record. The store assigns the identifier.
    async fn create(&self, fields: ItemFields) -> StoreResult<Item>;

    /// Overwrite every field of an existing record. Never inserts.
    async fn update(&self, id: ItemId, fields: ItemFields) -> StoreResult<Option<Item>>;

    /// Remove a record, returning its last state.
    async fn delete(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// All items matching `filter`, in identifier order. Not paginated.
    async fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>>;

    /// Release backend resources on shutdown. Pooled backends reject later calls.
    async fn close(&self) {}
}

#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        (**self).get(id).await
    }

    async fn list(&self, page: Page) -> StoreResult<Vec<Item>> {
        (**self).list(page).await
    }

    async fn create(&self, fields: ItemFields) -> StoreResult<Item> {
        (**self).create(fields).await
    }

    async fn update(&self, id: ItemId, fields: ItemFields) -> StoreResult<Option<Item>> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: ItemId) -> StoreResult<Option<Item>> {
        (**self).delete(id).await
    }

    async fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        (**self).search(filter).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
