use crate::store::StoreConfigProvider;
use std::any::Any;

/// Configuration for the in-memory store.
///
/// There is nothing to configure yet; the type exists so the backend
/// participates in the [crate::store::StoreConfig] downcast protocol.
#[derive(Clone, Default)]
pub struct InMemoryStoreConfig;

impl InMemoryStoreConfig {
    pub fn new() -> InMemoryStoreConfig {
        InMemoryStoreConfig
    }
}

impl StoreConfigProvider for InMemoryStoreConfig {
    fn file_path(&self) -> String {
        String::new()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
