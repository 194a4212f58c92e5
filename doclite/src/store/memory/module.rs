use crate::errors::DocLiteResult;
use crate::store::memory::{InMemoryStore, InMemoryStoreConfig};
use crate::store::{DocStore, StoreModule};

/// Store module for the in-memory backend.
///
/// This is the module `DocLiteBuilder` falls back to when no other store
/// module has been loaded.
#[derive(Default)]
pub struct InMemoryStoreModule {
    store_config: InMemoryStoreConfig,
}

impl InMemoryStoreModule {
    pub fn new() -> InMemoryStoreModule {
        InMemoryStoreModule {
            store_config: InMemoryStoreConfig::new(),
        }
    }

    pub fn with_config() -> InMemoryStoreModuleBuilder {
        InMemoryStoreModuleBuilder::new()
    }
}

impl StoreModule for InMemoryStoreModule {
    fn store(&self) -> DocLiteResult<DocStore> {
        let store = InMemoryStore::new(self.store_config.clone());
        Ok(DocStore::new(store))
    }
}

#[derive(Default)]
pub struct InMemoryStoreModuleBuilder {
    store_config: InMemoryStoreConfig,
}

impl InMemoryStoreModuleBuilder {
    pub fn new() -> InMemoryStoreModuleBuilder {
        InMemoryStoreModuleBuilder {
            store_config: InMemoryStoreConfig::new(),
        }
    }

    pub fn build(self) -> InMemoryStoreModule {
        InMemoryStoreModule {
            store_config: self.store_config,
        }
    }
}
