use crate::collection::Document;
use crate::common::constants::{TAG_COLLECTION, TAG_MAP_METADATA};
use crate::common::{Key, Value};
use crate::errors::{DocLiteError, DocLiteResult, ErrorKind};
use crate::store::DocMap;
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

/// Catalog of collections registered in a store.
///
/// The catalog lives in a reserved map and records the name of every
/// collection the store has created, so collections survive being closed
/// and can be listed without opening their maps. Cloning is cheap and
/// clones share the backing map.
#[derive(Clone)]
pub struct StoreCatalog {
    inner: Arc<StoreCatalogInner>,
}

impl StoreCatalog {
    pub fn new(catalog_map: DocMap) -> DocLiteResult<StoreCatalog> {
        Ok(StoreCatalog {
            inner: Arc::new(StoreCatalogInner { catalog_map }),
        })
    }
}

impl Deref for StoreCatalog {
    type Target = StoreCatalogInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct StoreCatalogInner {
    catalog_map: DocMap,
}

impl StoreCatalogInner {
    /// Checks if a collection with the given name is registered.
    pub fn has_entry(&self, name: &str) -> DocLiteResult<bool> {
        for entry in self.catalog_map.entries()? {
            let (_, value) = entry?;
            match value.as_document() {
                Some(document) => {
                    let meta = CatalogMeta::new(document);
                    if meta.map_names.contains(name) {
                        return Ok(true);
                    }
                }
                None => {
                    log::warn!(
                        "Skipping invalid catalog entry, expected a document: {:?}",
                        value
                    );
                    continue;
                }
            }
        }
        Ok(false)
    }

    /// Registers a collection name in the catalog.
    pub fn write_collection_entry(&self, name: &str) -> DocLiteResult<()> {
        if name.is_empty() {
            log::error!("Collection name cannot be empty");
            return Err(DocLiteError::new(
                "Collection name cannot be empty",
                ErrorKind::ValidationError,
            ));
        }

        let document = self.read_entry(TAG_COLLECTION)?;
        let mut meta = CatalogMeta::new(&document);
        meta.map_names.insert(name.to_string());

        self.catalog_map.put(
            Key::from(TAG_COLLECTION),
            Value::from(meta.to_document()),
        )
    }

    /// Retrieves all registered collection names.
    pub fn collection_names(&self) -> DocLiteResult<HashSet<String>> {
        let document = self.read_entry(TAG_COLLECTION)?;
        Ok(CatalogMeta::new(&document).map_names)
    }

    /// Removes a collection name from the catalog. Unknown names are a
    /// silent no-op.
    pub fn remove_entry(&self, name: &str) -> DocLiteResult<()> {
        let mut updated = Vec::new();

        for entry in self.catalog_map.entries()? {
            let (catalog_key, value) = entry?;
            let document = value.as_document().ok_or_else(|| {
                log::error!("Invalid catalog entry under {}", catalog_key);
                DocLiteError::new(
                    &format!("Invalid catalog entry under {}", catalog_key),
                    ErrorKind::InvalidOperation,
                )
            })?;
            let mut meta = CatalogMeta::new(document);
            if meta.map_names.remove(name) {
                updated.push((catalog_key, meta.to_document()));
                break;
            }
        }

        for (catalog_key, meta_document) in updated {
            self.catalog_map
                .put(catalog_key, Value::from(meta_document))?;
        }
        Ok(())
    }

    fn read_entry(&self, tag: &str) -> DocLiteResult<Document> {
        match self.catalog_map.get(&Value::from(tag))? {
            None => Ok(Document::new()),
            Some(value) => {
                let document = value.as_document().ok_or_else(|| {
                    log::error!("Invalid catalog entry under {}", tag);
                    DocLiteError::new(
                        &format!("Invalid catalog entry under {}", tag),
                        ErrorKind::InvalidOperation,
                    )
                })?;
                Ok(document.clone())
            }
        }
    }
}

/// Deserialized form of a catalog entry: the set of map names registered
/// under one tag.
pub(crate) struct CatalogMeta {
    pub(crate) map_names: HashSet<String>,
}

impl CatalogMeta {
    pub(crate) fn new(metadata: &Document) -> Self {
        let mut map_names = HashSet::new();
        if let Some(names) = metadata.get(TAG_MAP_METADATA).and_then(Value::as_array) {
            map_names.reserve(names.len());
            for name in names {
                if let Some(name) = name.as_string() {
                    map_names.insert(name.to_string());
                } else {
                    log::warn!("Non-string value in catalog metadata, skipping: {:?}", name);
                }
            }
        }
        CatalogMeta { map_names }
    }

    pub(crate) fn to_document(&self) -> Document {
        let names = self
            .map_names
            .iter()
            .map(|name| Value::String(name.clone()))
            .collect::<Vec<_>>();
        let mut document = Document::new();
        // TAG_MAP_METADATA is a non-empty constant, put cannot fail
        let _ = document.put(TAG_MAP_METADATA, Value::Array(names));
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{InMemoryStore, InMemoryStoreConfig};
    use crate::store::DocStoreProvider;
    use crate::val;

    fn setup_catalog() -> StoreCatalog {
        let store = InMemoryStore::new(InMemoryStoreConfig::new());
        let catalog_map = store.open_map("catalog_test").unwrap();
        StoreCatalog::new(catalog_map).unwrap()
    }

    #[test]
    fn test_has_entry() {
        let catalog = setup_catalog();
        assert!(!catalog.has_entry("users").unwrap());

        catalog.write_collection_entry("users").unwrap();
        assert!(catalog.has_entry("users").unwrap());
    }

    #[test]
    fn test_write_collection_entry_rejects_empty_name() {
        let catalog = setup_catalog();
        let result = catalog.write_collection_entry("");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_collection_names() {
        let catalog = setup_catalog();
        catalog.write_collection_entry("users").unwrap();
        catalog.write_collection_entry("orders").unwrap();

        let names = catalog.collection_names().unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains("users"));
        assert!(names.contains("orders"));
    }

    #[test]
    fn test_write_is_idempotent() {
        let catalog = setup_catalog();
        catalog.write_collection_entry("users").unwrap();
        catalog.write_collection_entry("users").unwrap();
        assert_eq!(catalog.collection_names().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let catalog = setup_catalog();
        catalog.write_collection_entry("users").unwrap();
        catalog.write_collection_entry("orders").unwrap();

        catalog.remove_entry("users").unwrap();
        assert!(!catalog.has_entry("users").unwrap());
        assert!(catalog.has_entry("orders").unwrap());
    }

    #[test]
    fn test_remove_unknown_entry_is_noop() {
        let catalog = setup_catalog();
        catalog.write_collection_entry("users").unwrap();
        catalog.remove_entry("missing").unwrap();
        assert!(catalog.has_entry("users").unwrap());
    }

    #[test]
    fn test_catalog_meta_skips_non_string_names() {
        let mut document = Document::new();
        document
            .put(
                TAG_MAP_METADATA,
                Value::Array(vec![val!("users"), val!(42), Value::Null]),
            )
            .unwrap();

        let meta = CatalogMeta::new(&document);
        assert_eq!(meta.map_names.len(), 1);
        assert!(meta.map_names.contains("users"));
    }

    #[test]
    fn test_catalog_meta_round_trip() {
        let mut meta = CatalogMeta {
            map_names: HashSet::new(),
        };
        meta.map_names.insert("users".to_string());

        let document = meta.to_document();
        let restored = CatalogMeta::new(&document);
        assert_eq!(restored.map_names, meta.map_names);
    }
}
