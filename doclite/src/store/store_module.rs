use crate::errors::DocLiteResult;
use crate::store::DocStore;

/// The pluggable-backend seam.
///
/// A store module knows how to build the [DocStore] for one backend.
/// Loading a module into `DocLiteConfig` makes that backend the storage
/// layer for the database.
pub trait StoreModule: Send + Sync {
    fn store(&self) -> DocLiteResult<DocStore>;
}
