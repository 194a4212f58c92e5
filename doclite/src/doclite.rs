use crate::{
    collection::{CollectionFactory, DocumentCollection},
    common::constants::RESERVED_NAMES,
    common::LockRegistry,
    doclite_builder::DocLiteBuilder,
    doclite_config::DocLiteConfig,
    errors::{DocLiteError, DocLiteResult, ErrorKind},
    store::DocStore,
};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// The main database instance.
///
/// `DocLite` is the entry point for all database operations: opening named
/// [DocumentCollection]s, listing and destroying them, committing and closing
/// the underlying store.
///
/// Instances are cheap to clone and thread-safe; clones share the same
/// database. The database commits and closes its store when the last clone
/// is dropped, or earlier through an explicit `close()`.
///
/// # Examples
///
/// ```rust,ignore
/// let db = DocLite::builder().open_or_create()?;
///
/// let users = db.collection("users")?;
/// users.insert(doc! { "name": "Alice" })?;
///
/// db.close()?;
/// ```
#[derive(Clone)]
pub struct DocLite {
    inner: Arc<DocLiteInner>,
}

impl DocLite {
    /// Creates a builder for configuring and opening a database.
    pub fn builder() -> DocLiteBuilder {
        DocLiteBuilder::new()
    }

    pub(crate) fn new(doclite_config: DocLiteConfig) -> Self {
        DocLite {
            inner: Arc::new(DocLiteInner::new(doclite_config)),
        }
    }

    /// Opens a collection by name, creating it if it does not exist.
    ///
    /// Repeated lookups of the same name return the same cached collection.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::ValidationError` - the name is empty, contains a space,
    ///   or is reserved
    /// * `ErrorKind::InvalidOperation` - the database is closed
    pub fn collection(&self, name: &str) -> DocLiteResult<DocumentCollection> {
        self.inner.collection(name)
    }

    /// Whether a collection with the given name exists.
    pub fn has_collection(&self, name: &str) -> DocLiteResult<bool> {
        let collections = self.list_collection_names()?;
        Ok(collections.contains(name))
    }

    /// Names of all collections registered in the store catalog.
    pub fn list_collection_names(&self) -> DocLiteResult<HashSet<String>> {
        self.inner.list_collection_names()
    }

    /// Drops a collection and removes all its data.
    pub fn destroy_collection(&self, name: &str) -> DocLiteResult<()> {
        self.inner.destroy_collection(name)
    }

    /// Commits pending changes and closes the database.
    pub fn close(&self) -> DocLiteResult<()> {
        self.inner.commit()?;
        self.inner.close()
    }

    pub fn is_closed(&self) -> DocLiteResult<bool> {
        self.inner.store()?.is_closed()
    }

    /// Commits pending changes to the backing store.
    pub fn commit(&self) -> DocLiteResult<()> {
        self.inner.commit()
    }

    pub fn has_unsaved_changes(&self) -> DocLiteResult<bool> {
        self.inner.check_opened()?;
        self.inner.store()?.has_unsaved_changes()
    }

    /// The configuration this database was opened with.
    pub fn config(&self) -> DocLiteConfig {
        self.inner.doclite_config.clone()
    }

    /// The underlying storage backend.
    pub fn store(&self) -> DocLiteResult<DocStore> {
        self.inner.store()
    }

    pub(crate) fn initialize(&self) -> DocLiteResult<()> {
        let result = self.inner.initialize();
        if let Err(cause) = result {
            let _ = self.inner.close();
            log::error!("Failed to initialize the database: {}", cause);
            return Err(DocLiteError::new_with_cause(
                "Failed to initialize the database",
                ErrorKind::IOError,
                cause,
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DocLite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let closed = self.is_closed().unwrap_or(true);
        f.debug_struct("DocLite").field("closed", &closed).finish()
    }
}

struct DocLiteInner {
    collection_factory: CollectionFactory,
    doclite_config: DocLiteConfig,
    store: OnceLock<DocStore>,
}

impl DocLiteInner {
    fn new(doclite_config: DocLiteConfig) -> Self {
        let lock_registry = LockRegistry::new();

        DocLiteInner {
            collection_factory: CollectionFactory::new(lock_registry),
            doclite_config,
            store: OnceLock::new(),
        }
    }

    fn collection(&self, name: &str) -> DocLiteResult<DocumentCollection> {
        validate_collection_name(name)?;
        self.check_opened()?;
        self.collection_factory
            .get_collection(name, self.doclite_config.clone())
    }

    fn destroy_collection(&self, name: &str) -> DocLiteResult<()> {
        self.check_opened()?;
        self.collection_factory.destroy_collection(name)?;
        self.store()?.remove_map(name)
    }

    fn list_collection_names(&self) -> DocLiteResult<HashSet<String>> {
        self.check_opened()?;
        self.store()?.collection_names()
    }

    fn commit(&self) -> DocLiteResult<()> {
        self.check_opened()?;
        self.store()?.commit()
    }

    fn close(&self) -> DocLiteResult<()> {
        self.collection_factory.clear()?;
        self.doclite_config.close()
    }

    fn store(&self) -> DocLiteResult<DocStore> {
        match self.store.get() {
            Some(store) => Ok(store.clone()),
            None => {
                log::error!("The database is not initialized");
                Err(DocLiteError::new(
                    "The database is not initialized",
                    ErrorKind::StoreNotInitialized,
                ))
            }
        }
    }

    fn check_opened(&self) -> DocLiteResult<()> {
        if self.store()?.is_closed()? {
            log::error!("The database is closed");
            return Err(DocLiteError::new(
                "The database is closed",
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }

    fn initialize(&self) -> DocLiteResult<()> {
        self.doclite_config.initialize()?;
        let store = self.doclite_config.doc_store()?;
        let store = self.store.get_or_init(|| store);
        store.open_or_create()
    }
}

fn validate_collection_name(name: &str) -> DocLiteResult<()> {
    if name.is_empty() {
        log::error!("Collection name cannot be empty");
        return Err(DocLiteError::new(
            "Collection name cannot be empty",
            ErrorKind::ValidationError,
        ));
    }

    if name.contains(' ') {
        log::error!("Collection name cannot contain a space");
        return Err(DocLiteError::new(
            "Collection name cannot contain a space",
            ErrorKind::ValidationError,
        ));
    }

    for reserved_name in RESERVED_NAMES.iter() {
        if name.eq_ignore_ascii_case(reserved_name) {
            log::error!("Collection name '{}' is reserved", reserved_name);
            return Err(DocLiteError::new(
                &format!("Collection name '{}' is reserved", reserved_name),
                ErrorKind::ValidationError,
            ));
        }
    }

    Ok(())
}

// Commits and closes the store when the last handle goes away. Implementing
// Drop on DocLite itself would close the store while clones are still live.
impl Drop for DocLiteInner {
    fn drop(&mut self) {
        if let Some(store) = self.store.get() {
            let _ = store.commit();
            let _ = store.close();
        }
    }
}
