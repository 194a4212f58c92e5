use super::{default_document_collection::DefaultDocumentCollection, DocumentCollection};
use crate::{
    common::util::{atomic, Atomic},
    common::LockRegistry,
    doclite_config::DocLiteConfig,
    errors::DocLiteResult,
};
use std::sync::Arc;
use std::{collections::HashMap, ops::Deref};

/// Cache of open collections, keyed by name.
///
/// Handing out the same [DocumentCollection] for repeated lookups keeps all
/// callers behind one lock handle. A cached entry that was dropped or closed
/// is discarded and recreated on the next lookup.
#[derive(Clone)]
pub(crate) struct CollectionFactory {
    inner: Arc<CollectionFactoryInner>,
}

impl CollectionFactory {
    pub fn new(lock_registry: LockRegistry) -> Self {
        CollectionFactory {
            inner: Arc::new(CollectionFactoryInner {
                collection_map: atomic(HashMap::new()),
                lock_registry,
            }),
        }
    }
}

impl Deref for CollectionFactory {
    type Target = Arc<CollectionFactoryInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub(crate) struct CollectionFactoryInner {
    collection_map: Atomic<HashMap<String, DocumentCollection>>,
    lock_registry: LockRegistry,
}

impl CollectionFactoryInner {
    pub fn get_collection(
        &self,
        name: &str,
        doclite_config: DocLiteConfig,
    ) -> DocLiteResult<DocumentCollection> {
        // the factory map has its own synchronization; the lock registry is
        // reserved for the collections themselves
        let cached = self.collection_map.read().get(name).cloned();

        match cached {
            Some(collection) => {
                if collection.is_dropped()? || !collection.is_open()? {
                    self.collection_map.write().remove(name);
                    return self.create_collection(name, doclite_config);
                }
                Ok(collection)
            }
            None => self.create_collection(name, doclite_config),
        }
    }

    fn create_collection(
        &self,
        name: &str,
        doclite_config: DocLiteConfig,
    ) -> DocLiteResult<DocumentCollection> {
        let store = doclite_config.doc_store()?;
        let doc_map = store.open_map(name)?;
        let lock_handle = self.lock_registry.get_lock(name);

        let collection = DocumentCollection::new(DefaultDocumentCollection::new(
            name,
            doc_map,
            store.clone(),
            lock_handle,
        ));

        self.collection_map
            .write()
            .insert(name.to_string(), collection.clone());

        let store_catalog = store.store_catalog()?;
        if !store_catalog.has_entry(name)? {
            store_catalog.write_collection_entry(name)?;
        }

        Ok(collection)
    }

    pub fn destroy_collection(&self, name: &str) -> DocLiteResult<()> {
        if let Some(collection) = self.collection_map.write().remove(name) {
            if !collection.is_dropped()? {
                collection.drop_collection()?;
            }
        }
        Ok(())
    }

    /// Closes every cached collection and empties the cache.
    pub fn clear(&self) -> DocLiteResult<()> {
        for collection in self.collection_map.read().values() {
            if collection.is_open()? {
                collection.close()?;
            }
        }
        self.collection_map.write().clear();
        Ok(())
    }
}
