//! In-memory item store for tests/dev.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::instrument;

use stockroom_core::{Item, ItemFields, ItemFilter, ItemId, Page};

use super::r#trait::{ItemStore, StoreError, StoreResult};

#[derive(Debug)]
struct State {
    items: BTreeMap<ItemId, Item>,
    next_id: i64,
}

/// Process-local item store.
///
/// Identifiers start at 1 and are never reused, even after a delete.
/// `BTreeMap` key order is the store order used by `list` and `search`.
#[derive(Debug)]
pub struct InMemoryItemStore {
    inner: RwLock<State>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    #[instrument(skip(self), fields(item_id = %id))]
    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.items.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page) -> StoreResult<Vec<Item>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .items
            .values()
            .skip(clamp(page.skip))
            .take(clamp(page.limit))
            .cloned()
            .collect())
    }

    #[instrument(skip(self, fields), fields(name = %fields.name))]
    async fn create(&self, fields: ItemFields) -> StoreResult<Item> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = ItemId(state.next_id);
        state.next_id += 1;

        let item = Item::from_fields(id, fields);
        state.items.insert(id, item.clone());
        tracing::debug!(item_id = %id, "item created");
        Ok(item)
    }

    #[instrument(skip(self, fields), fields(item_id = %id))]
    async fn update(&self, id: ItemId, fields: ItemFields) -> StoreResult<Option<Item>> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(state.items.get_mut(&id).map(|item| {
            item.overwrite(fields);
            item.clone()
        }))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(state.items.remove(&id))
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::conformance;

    #[tokio::test]
    async fn conforms_to_item_store_contract() {
        conformance::run_all(&InMemoryItemStore::new()).await;
    }

    #[tokio::test]
    async fn identifiers_are_not_reused_after_delete() {
        let store = InMemoryItemStore::new();
        let first = store.create(conformance::fields("A", "", 1.0, 1)).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(conformance::fields("B", "", 1.0, 1)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }
}
