use crate::{
    doclite::DocLite,
    doclite_config::DocLiteConfig,
    errors::{DocLiteError, DocLiteResult},
    store::StoreModule,
};

/// Builder for creating and opening a [DocLite] database.
///
/// The builder captures configuration errors instead of failing mid-chain;
/// the first error wins and is surfaced by `open_or_create`.
///
/// # Examples
///
/// ```rust,ignore
/// // In-memory database with default settings
/// let db = DocLite::builder().open_or_create()?;
///
/// // Explicit store backend
/// let db = DocLite::builder()
///     .load_module(InMemoryStoreModule::new())
///     .open_or_create()?;
/// ```
#[derive(Default)]
pub struct DocLiteBuilder {
    error: Option<DocLiteError>,
    doclite_config: DocLiteConfig,
}

impl DocLiteBuilder {
    pub fn new() -> Self {
        DocLiteBuilder {
            error: None,
            doclite_config: DocLiteConfig::new(),
        }
    }

    /// Loads a store module providing the storage backend.
    ///
    /// A failure here is captured and returned by `open_or_create`.
    pub fn load_module<T: StoreModule + 'static>(mut self, module: T) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.doclite_config.load_module(module) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Opens or creates a database with the configured settings.
    ///
    /// Falls back to the in-memory backend when no store module was loaded.
    /// Any error captured during configuration is returned here.
    pub fn open_or_create(self) -> DocLiteResult<DocLite> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.doclite_config.auto_configure()?;
        let doclite = DocLite::new(self.doclite_config);
        doclite.initialize()?;
        Ok(doclite)
    }
}
