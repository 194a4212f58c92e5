use super::InMemoryMap;
use crate::common::constants::{COLLECTION_CATALOG, DOCLITE_VERSION};
use crate::errors::DocLiteResult;
use crate::store::memory::config::InMemoryStoreConfig;
use crate::store::{
    DocMap, DocMapProvider, DocStore, DocStoreProvider, StoreCatalog, StoreConfig,
};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory store implementation.
///
/// All data lives in a registry of [InMemoryMap]s and is lost when the
/// store closes. Suitable for tests, caches and temporary databases.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    pub fn new(store_config: InMemoryStoreConfig) -> InMemoryStore {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner::new(store_config)),
        }
    }
}

impl DocStoreProvider for InMemoryStore {
    fn open_or_create(&self) -> DocLiteResult<()> {
        Ok(())
    }

    fn is_closed(&self) -> DocLiteResult<bool> {
        self.inner.is_closed()
    }

    fn commit(&self) -> DocLiteResult<()> {
        // nothing buffered in memory
        Ok(())
    }

    fn close(&self) -> DocLiteResult<()> {
        self.inner.close()
    }

    fn has_unsaved_changes(&self) -> DocLiteResult<bool> {
        Ok(false)
    }

    fn has_map(&self, name: &str) -> DocLiteResult<bool> {
        self.inner.has_map(name)
    }

    fn open_map(&self, name: &str) -> DocLiteResult<DocMap> {
        self.inner.open_map(name, self.clone())
    }

    fn close_map(&self, name: &str) -> DocLiteResult<()> {
        self.inner.close_map(name)
    }

    fn remove_map(&self, name: &str) -> DocLiteResult<()> {
        self.inner.close_map(name)?;

        let catalog = self.store_catalog()?;
        catalog.remove_entry(name)?;
        Ok(())
    }

    fn collection_names(&self) -> DocLiteResult<HashSet<String>> {
        let catalog = self.store_catalog()?;
        catalog.collection_names()
    }

    fn store_catalog(&self) -> DocLiteResult<StoreCatalog> {
        self.inner.store_catalog(self.clone())
    }

    fn store_config(&self) -> DocLiteResult<StoreConfig> {
        self.inner.store_config()
    }

    fn store_version(&self) -> DocLiteResult<String> {
        Ok(format!("InMemory/{}", DOCLITE_VERSION))
    }
}

struct InMemoryStoreInner {
    closed: AtomicBool,
    store_config: InMemoryStoreConfig,
    map_registry: DashMap<String, InMemoryMap>,
}

impl InMemoryStoreInner {
    fn new(store_config: InMemoryStoreConfig) -> InMemoryStoreInner {
        InMemoryStoreInner {
            closed: AtomicBool::from(false),
            store_config,
            map_registry: DashMap::new(),
        }
    }

    fn store_catalog(&self, store: InMemoryStore) -> DocLiteResult<StoreCatalog> {
        let catalog_map = self.open_map(COLLECTION_CATALOG, store)?;
        StoreCatalog::new(catalog_map)
    }

    fn close(&self) -> DocLiteResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            return Ok(());
        }

        // close maps in parallel; each close evicts itself from the registry
        {
            let maps: Vec<_> = self
                .map_registry
                .iter()
                .map(|entry| entry.value().clone())
                .collect();

            std::thread::scope(|scope| {
                for map in maps {
                    scope.spawn(move || {
                        let _ = map.close();
                    });
                }
            });
        }

        self.map_registry.clear();
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn is_closed(&self) -> DocLiteResult<bool> {
        Ok(self.closed.load(Ordering::Relaxed))
    }

    fn has_map(&self, name: &str) -> DocLiteResult<bool> {
        Ok(self.map_registry.contains_key(name))
    }

    fn open_map(&self, name: &str, store: InMemoryStore) -> DocLiteResult<DocMap> {
        match self.map_registry.entry(name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                let map = entry.get();
                if map.is_closed()? || map.is_dropped()? {
                    // drop the entry reference before mutating the registry
                    drop(entry);

                    self.map_registry.remove(name);
                    let map = InMemoryMap::new(name, DocStore::new(store));
                    self.map_registry.insert(name.to_string(), map.clone());
                    Ok(DocMap::new(map))
                } else {
                    Ok(DocMap::new(map.clone()))
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let map = InMemoryMap::new(name, DocStore::new(store));
                entry.insert(map.clone());
                Ok(DocMap::new(map))
            }
        }
    }

    fn close_map(&self, name: &str) -> DocLiteResult<()> {
        if let Some((_name, map)) = self.map_registry.remove(name) {
            drop(map);
        }
        Ok(())
    }

    fn store_config(&self) -> DocLiteResult<StoreConfig> {
        Ok(StoreConfig::new(self.store_config.clone()))
    }
}
