use std::sync::Arc;

use stockroom_infra::{
    InMemoryItemStore, ItemStore, ServiceConfig, SqliteItemStore, StoreBackend, StoreError,
};

/// Shared state handed to every handler.
///
/// Holds only the store handle; no item data is cached between requests.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ItemStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Services backed by a fresh process-local store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryItemStore::new()))
    }

    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }
}

/// Select and open the store named by the configuration.
pub async fn build_services(config: &ServiceConfig) -> Result<AppServices, StoreError> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory item store; data is lost on restart");
            Ok(AppServices::in_memory())
        }
        StoreBackend::Sqlite => {
            let store = SqliteItemStore::connect(&config.database_url).await?;
            Ok(AppServices::new(Arc::new(store)))
        }
    }
}
