//! Configuration for a DocLite database.

use crate::{
    errors::{DocLiteError, DocLiteResult, ErrorKind},
    store::{memory::InMemoryStoreModule, DocStore, StoreModule},
};
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Database configuration: which storage backend to use.
///
/// A configuration is built by [crate::DocLiteBuilder], sealed by
/// `initialize`, and shared by every handle of the database. The storage
/// backend is contributed by a [StoreModule]; when none is loaded,
/// `auto_configure` falls back to the in-memory backend.
#[derive(Clone)]
pub struct DocLiteConfig {
    inner: Arc<DocLiteConfigInner>,
}

impl Default for DocLiteConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DocLiteConfig {
    pub fn new() -> Self {
        DocLiteConfig {
            inner: Arc::new(DocLiteConfigInner {
                configured: AtomicBool::from(false),
                store: OnceLock::new(),
            }),
        }
    }
}

impl Deref for DocLiteConfig {
    type Target = DocLiteConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct DocLiteConfigInner {
    configured: AtomicBool,
    store: OnceLock<DocStore>,
}

impl DocLiteConfigInner {
    /// Loads a store module, making its backend the database's storage layer.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::InvalidOperation` - the configuration is already
    ///   initialized, or a store module was already loaded
    pub fn load_module<T: StoreModule + 'static>(&self, module: T) -> DocLiteResult<()> {
        self.ensure_not_configured("Cannot load a store module after initialization")?;

        let store = module.store()?;
        if self.store.set(store).is_err() {
            log::error!("A store module is already loaded");
            return Err(DocLiteError::new(
                "A store module is already loaded",
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }

    /// Falls back to the in-memory backend when no module was loaded.
    pub fn auto_configure(&self) -> DocLiteResult<()> {
        self.ensure_not_configured("Cannot auto-configure after initialization")?;

        if self.store.get().is_none() {
            let store = InMemoryStoreModule::new().store()?;
            let _ = self.store.set(store);
        }
        Ok(())
    }

    /// The configured store.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::StoreNotInitialized` - no store module was loaded and
    ///   auto-configuration has not run
    pub fn doc_store(&self) -> DocLiteResult<DocStore> {
        match self.store.get() {
            Some(store) => Ok(store.clone()),
            None => {
                log::error!("No store module is configured");
                Err(DocLiteError::new(
                    "No store module is configured",
                    ErrorKind::StoreNotInitialized,
                ))
            }
        }
    }

    /// Seals the configuration. Module loading is rejected afterwards.
    pub(crate) fn initialize(&self) -> DocLiteResult<()> {
        // a database cannot open without a storage backend
        self.doc_store()?;
        self.configured.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Closes the configured store, if any.
    pub(crate) fn close(&self) -> DocLiteResult<()> {
        if let Some(store) = self.store.get() {
            store.close()?;
        }
        Ok(())
    }

    fn ensure_not_configured(&self, message: &str) -> DocLiteResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("{}", message);
            return Err(DocLiteError::new(message, ErrorKind::InvalidOperation));
        }
        Ok(())
    }
}
