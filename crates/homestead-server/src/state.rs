use homestead::api::HomesteadApi;
use homestead::store::backend::StorageBackend;
use homestead::store::record_store::RecordStore;
use std::sync::Arc;

/// The store type the server runs against; the backend is chosen at start-up.
pub type SharedStore = RecordStore<Box<dyn StorageBackend>>;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    api: Arc<HomesteadApi<SharedStore>>,
}

impl AppState {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let store = RecordStore::with_backend(backend);
        Self {
            api: Arc::new(HomesteadApi::new(store)),
        }
    }

    pub fn api(&self) -> Arc<HomesteadApi<SharedStore>> {
        Arc::clone(&self.api)
    }
}
