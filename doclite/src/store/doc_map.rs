use crate::collection::Document;
use crate::common::constants::DOC_ID;
use crate::common::{Key, Value};
use crate::errors::{DocLiteError, DocLiteResult, ErrorKind};
use crate::store::iters::{EntryIterator, KeyIterator, ValueIterator};
use crate::store::DocStore;
use std::ops::Deref;
use std::sync::Arc;

fn unimplemented_operation<T>(name: &str) -> DocLiteResult<T> {
    log::error!("Map operation {} is not implemented by this provider", name);
    Err(DocLiteError::new(
        &format!("Map operation {} is not implemented by this provider", name),
        ErrorKind::InvalidOperation,
    ))
}

/// Low-level interface for per-collection key-value maps.
///
/// Implementers provide the concrete storage operations backing a single
/// collection: keyed access, ordered key navigation, and lifecycle control.
/// Methods a backend does not support fall back to returning
/// `InvalidOperation`.
///
/// Keys are `Value`s ordered by `Value`'s total order, so `first_key`,
/// `last_key`, `higher_key` and `lower_key` navigate the map in a stable,
/// backend-independent order.
pub trait DocMapProvider: Send + Sync {
    /// Returns the name of this map.
    fn name(&self) -> DocLiteResult<String>;

    /// Checks whether the map contains a key.
    fn contains_key(&self, key: &Key) -> DocLiteResult<bool> {
        let _ = key;
        unimplemented_operation("contains_key")
    }

    /// Retrieves the value associated with a key.
    fn get(&self, key: &Key) -> DocLiteResult<Option<Value>> {
        let _ = key;
        unimplemented_operation("get")
    }

    /// Inserts or updates a key-value pair.
    fn put(&self, key: Key, value: Value) -> DocLiteResult<()> {
        let _ = (key, value);
        unimplemented_operation("put")
    }

    /// Inserts a key-value pair only if the key does not already exist.
    ///
    /// Returns the existing value when the key was present, `None` when the
    /// pair was inserted.
    fn put_if_absent(&self, key: Key, value: Value) -> DocLiteResult<Option<Value>> {
        let _ = (key, value);
        unimplemented_operation("put_if_absent")
    }

    /// Removes a key-value pair, returning the removed value if it existed.
    fn remove(&self, key: &Key) -> DocLiteResult<Option<Value>> {
        let _ = key;
        unimplemented_operation("remove")
    }

    /// Clears all entries from the map.
    fn clear(&self) -> DocLiteResult<()> {
        unimplemented_operation("clear")
    }

    /// Returns the number of entries in the map.
    fn size(&self) -> DocLiteResult<u64> {
        unimplemented_operation("size")
    }

    /// Checks if the map is empty.
    fn is_empty(&self) -> DocLiteResult<bool> {
        Ok(self.size()? == 0)
    }

    /// Retrieves a lazy iterator over all key-value entries in key order.
    fn entries(&self) -> DocLiteResult<EntryIterator> {
        unimplemented_operation("entries")
    }

    /// Retrieves a lazy iterator over all keys in key order.
    fn keys(&self) -> DocLiteResult<KeyIterator> {
        unimplemented_operation("keys")
    }

    /// Retrieves a lazy iterator over all values in key order.
    fn values(&self) -> DocLiteResult<ValueIterator> {
        unimplemented_operation("values")
    }

    /// Returns the first (lowest) key, if the map is not empty.
    fn first_key(&self) -> DocLiteResult<Option<Key>> {
        unimplemented_operation("first_key")
    }

    /// Returns the last (highest) key, if the map is not empty.
    fn last_key(&self) -> DocLiteResult<Option<Key>> {
        unimplemented_operation("last_key")
    }

    /// Returns the least key strictly greater than the given key.
    fn higher_key(&self, key: &Key) -> DocLiteResult<Option<Key>> {
        let _ = key;
        unimplemented_operation("higher_key")
    }

    /// Returns the greatest key strictly less than the given key.
    fn lower_key(&self, key: &Key) -> DocLiteResult<Option<Key>> {
        let _ = key;
        unimplemented_operation("lower_key")
    }

    /// Closes the map. No further operations are allowed afterwards.
    fn close(&self) -> DocLiteResult<()> {
        unimplemented_operation("close")
    }

    /// Checks if the map is closed.
    fn is_closed(&self) -> DocLiteResult<bool>;

    /// Drops the map, deleting all of its data and removing it from the
    /// parent store.
    fn drop_map(&self) -> DocLiteResult<()> {
        unimplemented_operation("drop_map")
    }

    /// Checks if the map has been dropped.
    fn is_dropped(&self) -> DocLiteResult<bool>;

    /// Returns the parent [DocStore] that owns this map.
    fn store(&self) -> DocLiteResult<DocStore>;
}

/// Facade over a [DocMapProvider] with document-level helpers.
///
/// Cloning is cheap; clones share the same underlying provider. Beyond the
/// raw key-value operations exposed through `Deref`, `DocMap` knows how a
/// collection stores documents: keyed by the document's `_id`, which the
/// storage layer assigns when absent.
#[derive(Clone)]
pub struct DocMap {
    inner: Arc<dyn DocMapProvider>,
}

impl Deref for DocMap {
    type Target = Arc<dyn DocMapProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DocMap {
    pub fn new<T: DocMapProvider + 'static>(inner: T) -> Self {
        DocMap {
            inner: Arc::new(inner),
        }
    }

    /// Stores a document under its `_id`, assigning a fresh id when absent.
    ///
    /// Id generation is owned by the storage layer: a document without an
    /// `_id` receives a random UUID string before being written. Returns the
    /// key the document was stored under.
    pub fn put_document(&self, mut document: Document) -> DocLiteResult<Key> {
        let key = match document.id() {
            Some(id) => id.clone(),
            None => {
                let id = Value::String(uuid::Uuid::new_v4().to_string());
                document.put(DOC_ID, id.clone())?;
                id
            }
        };
        self.inner.put(key.clone(), Value::Document(document))?;
        Ok(key)
    }

    /// Retrieves the document stored under the given id.
    ///
    /// A stored value that is not a document indicates corruption and
    /// surfaces a `ValidationError`.
    pub fn get_document(&self, id: &Value) -> DocLiteResult<Option<Document>> {
        match self.inner.get(id)? {
            Some(Value::Document(document)) => Ok(Some(document)),
            Some(other) => {
                log::error!(
                    "Stored value for id {} is not a document: {:?}",
                    id,
                    other
                );
                Err(DocLiteError::new(
                    &format!("Stored value for id {} is not a document", id),
                    ErrorKind::ValidationError,
                ))
            }
            None => Ok(None),
        }
    }
}
