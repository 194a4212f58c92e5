use crate::errors::DocLiteResult;
use crate::store::{DocMap, StoreCatalog, StoreConfig};
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

/// Low-level interface for a document store backend.
///
/// A store manages the lifecycle of named key-value maps, one per
/// collection, plus the reserved catalog map. Implementations must be
/// `Send + Sync` so the store can be shared across threads.
pub trait DocStoreProvider: Send + Sync {
    /// Opens or creates the store.
    ///
    /// Must be called before any other store operation.
    fn open_or_create(&self) -> DocLiteResult<()>;

    /// Checks if the store is closed.
    fn is_closed(&self) -> DocLiteResult<bool>;

    /// Commits all pending changes.
    ///
    /// For in-memory backends this is a no-op; persistent backends flush
    /// buffered writes here.
    fn commit(&self) -> DocLiteResult<()>;

    /// Closes the store and every map it owns.
    fn close(&self) -> DocLiteResult<()>;

    /// Checks if the store has changes not yet committed.
    fn has_unsaved_changes(&self) -> DocLiteResult<bool>;

    /// Checks if a map with the given name exists in the store.
    fn has_map(&self, name: &str) -> DocLiteResult<bool>;

    /// Opens or creates the map with the given name.
    fn open_map(&self, name: &str) -> DocLiteResult<DocMap>;

    /// Closes an opened map, evicting it from the store's registry.
    fn close_map(&self, name: &str) -> DocLiteResult<()>;

    /// Removes a map and all of its data from the store.
    fn remove_map(&self, name: &str) -> DocLiteResult<()>;

    /// Retrieves the names of all collections registered in the catalog.
    fn collection_names(&self) -> DocLiteResult<HashSet<String>>;

    /// Returns the catalog of the store.
    fn store_catalog(&self) -> DocLiteResult<StoreCatalog>;

    /// Returns the configuration of the store.
    fn store_config(&self) -> DocLiteResult<StoreConfig>;

    /// Returns the version identifier of the store backend.
    fn store_version(&self) -> DocLiteResult<String>;
}

/// Facade over a [DocStoreProvider].
///
/// Cloning is cheap; clones share the same underlying provider through an
/// `Arc`. All provider methods are reachable through `Deref`.
#[derive(Clone)]
pub struct DocStore {
    inner: Arc<dyn DocStoreProvider>,
}

impl DocStore {
    pub fn new<T: DocStoreProvider + 'static>(inner: T) -> Self {
        DocStore {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for DocStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.store_version() {
            Ok(version) => write!(f, "DocStore({})", version),
            Err(_) => write!(f, "DocStore(<unavailable>)"),
        }
    }
}

impl Deref for DocStore {
    type Target = Arc<dyn DocStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
pub(crate) use mock::MockDocStore;

#[cfg(test)]
mod mock {
    use super::*;
    use crate::errors::{DocLiteError, ErrorKind};

    /// A do-nothing store used by unit tests that only need a store handle.
    #[derive(Clone, Default)]
    pub(crate) struct MockDocStore;

    impl DocStoreProvider for MockDocStore {
        fn open_or_create(&self) -> DocLiteResult<()> {
            Ok(())
        }

        fn is_closed(&self) -> DocLiteResult<bool> {
            Ok(false)
        }

        fn commit(&self) -> DocLiteResult<()> {
            Ok(())
        }

        fn close(&self) -> DocLiteResult<()> {
            Ok(())
        }

        fn has_unsaved_changes(&self) -> DocLiteResult<bool> {
            Ok(false)
        }

        fn has_map(&self, _name: &str) -> DocLiteResult<bool> {
            Ok(false)
        }

        fn open_map(&self, name: &str) -> DocLiteResult<DocMap> {
            Err(DocLiteError::new(
                &format!("Mock store cannot open map {}", name),
                ErrorKind::InvalidOperation,
            ))
        }

        fn close_map(&self, _name: &str) -> DocLiteResult<()> {
            Ok(())
        }

        fn remove_map(&self, _name: &str) -> DocLiteResult<()> {
            Ok(())
        }

        fn collection_names(&self) -> DocLiteResult<HashSet<String>> {
            Ok(HashSet::new())
        }

        fn store_catalog(&self) -> DocLiteResult<StoreCatalog> {
            Err(DocLiteError::new(
                "Mock store has no catalog",
                ErrorKind::InvalidOperation,
            ))
        }

        fn store_config(&self) -> DocLiteResult<StoreConfig> {
            Err(DocLiteError::new(
                "Mock store has no config",
                ErrorKind::InvalidOperation,
            ))
        }

        fn store_version(&self) -> DocLiteResult<String> {
            Ok("Mock/0".to_string())
        }
    }
}
