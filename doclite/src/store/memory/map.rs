use crate::common::{Key, Value};
use crate::errors::{DocLiteError, DocLiteResult, ErrorKind};
use crate::store::iters::{
    EntryIterator, KeyIterator, SingleMapEntryProvider, SingleMapKeyProvider,
    SingleMapValueProvider, ValueIterator,
};
use crate::store::{DocMap, DocMapProvider, DocStore};
use crossbeam_skiplist::SkipMap;
use std::collections::Bound::{Excluded, Unbounded};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory key-value map backed by a concurrent skip list.
///
/// Entries are held in key order, so ordered navigation (`first_key`,
/// `higher_key`, ...) is native. The map can be cloned and shared across
/// threads; every operation re-checks the closed/dropped flags.
#[derive(Clone)]
pub struct InMemoryMap {
    inner: Arc<InMemoryMapInner>,
}

impl InMemoryMap {
    pub fn new(name: &str, store: DocStore) -> Self {
        InMemoryMap {
            inner: Arc::new(InMemoryMapInner::new(name, store)),
        }
    }
}

impl DocMapProvider for InMemoryMap {
    fn name(&self) -> DocLiteResult<String> {
        self.inner.name()
    }

    fn contains_key(&self, key: &Key) -> DocLiteResult<bool> {
        self.inner.contains_key(key)
    }

    fn get(&self, key: &Key) -> DocLiteResult<Option<Value>> {
        self.inner.get(key)
    }

    fn put(&self, key: Key, value: Value) -> DocLiteResult<()> {
        self.inner.put(key, value)
    }

    fn put_if_absent(&self, key: Key, value: Value) -> DocLiteResult<Option<Value>> {
        self.inner.put_if_absent(key, value)
    }

    fn remove(&self, key: &Key) -> DocLiteResult<Option<Value>> {
        self.inner.remove(key)
    }

    fn clear(&self) -> DocLiteResult<()> {
        self.inner.clear()
    }

    fn size(&self) -> DocLiteResult<u64> {
        self.inner.size()
    }

    fn is_empty(&self) -> DocLiteResult<bool> {
        self.inner.is_empty()
    }

    fn entries(&self) -> DocLiteResult<EntryIterator> {
        let provider = SingleMapEntryProvider::new(DocMap::new(self.clone()));
        Ok(EntryIterator::new(provider))
    }

    fn keys(&self) -> DocLiteResult<KeyIterator> {
        let provider = SingleMapKeyProvider::new(DocMap::new(self.clone()));
        Ok(KeyIterator::new(provider))
    }

    fn values(&self) -> DocLiteResult<ValueIterator> {
        let provider = SingleMapValueProvider::new(DocMap::new(self.clone()));
        Ok(ValueIterator::new(provider))
    }

    fn first_key(&self) -> DocLiteResult<Option<Key>> {
        self.inner.first_key()
    }

    fn last_key(&self) -> DocLiteResult<Option<Key>> {
        self.inner.last_key()
    }

    fn higher_key(&self, key: &Key) -> DocLiteResult<Option<Key>> {
        self.inner.higher_key(key)
    }

    fn lower_key(&self, key: &Key) -> DocLiteResult<Option<Key>> {
        self.inner.lower_key(key)
    }

    fn close(&self) -> DocLiteResult<()> {
        self.inner.close()
    }

    fn is_closed(&self) -> DocLiteResult<bool> {
        self.inner.is_closed()
    }

    fn drop_map(&self) -> DocLiteResult<()> {
        self.inner.drop_map()
    }

    fn is_dropped(&self) -> DocLiteResult<bool> {
        self.inner.is_dropped()
    }

    fn store(&self) -> DocLiteResult<DocStore> {
        self.inner.store()
    }
}

struct InMemoryMapInner {
    backing_map: SkipMap<Key, Value>,
    closed: AtomicBool,
    dropped: AtomicBool,
    name: String,
    store: DocStore,
}

impl InMemoryMapInner {
    fn new(name: &str, store: DocStore) -> InMemoryMapInner {
        InMemoryMapInner {
            backing_map: SkipMap::new(),
            closed: AtomicBool::from(false),
            dropped: AtomicBool::from(false),
            name: name.to_string(),
            store,
        }
    }

    fn check_opened(&self) -> DocLiteResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Map {} is closed", self.name);
            return Err(DocLiteError::new(
                &format!("Map {} is closed", self.name),
                ErrorKind::InvalidOperation,
            ));
        }

        if self.dropped.load(Ordering::Relaxed) {
            log::error!("Map {} is dropped", self.name);
            return Err(DocLiteError::new(
                &format!("Map {} is dropped", self.name),
                ErrorKind::InvalidOperation,
            ));
        }

        Ok(())
    }

    fn name(&self) -> DocLiteResult<String> {
        Ok(self.name.clone())
    }

    fn contains_key(&self, key: &Key) -> DocLiteResult<bool> {
        self.check_opened()?;
        Ok(self.backing_map.contains_key(key))
    }

    fn get(&self, key: &Key) -> DocLiteResult<Option<Value>> {
        self.check_opened()?;

        if let Some(entry) = self.backing_map.get(key) {
            Ok(Some(entry.value().clone()))
        } else {
            Ok(None)
        }
    }

    fn put(&self, key: Key, value: Value) -> DocLiteResult<()> {
        self.check_opened()?;
        self.backing_map.insert(key, value);
        Ok(())
    }

    fn put_if_absent(&self, key: Key, value: Value) -> DocLiteResult<Option<Value>> {
        self.check_opened()?;

        if let Some(existing) = self.backing_map.get(&key) {
            return Ok(Some(existing.value().clone()));
        }

        self.backing_map.insert(key, value);
        Ok(None)
    }

    fn remove(&self, key: &Key) -> DocLiteResult<Option<Value>> {
        self.check_opened()?;

        if let Some(entry) = self.backing_map.remove(key) {
            Ok(Some(entry.value().clone()))
        } else {
            Ok(None)
        }
    }

    fn clear(&self) -> DocLiteResult<()> {
        self.check_opened()?;

        if !self.backing_map.is_empty() {
            self.backing_map.clear();
        }

        Ok(())
    }

    fn size(&self) -> DocLiteResult<u64> {
        self.check_opened()?;
        Ok(self.backing_map.len() as u64)
    }

    fn is_empty(&self) -> DocLiteResult<bool> {
        self.check_opened()?;
        Ok(self.backing_map.is_empty())
    }

    fn first_key(&self) -> DocLiteResult<Option<Key>> {
        self.check_opened()?;
        Ok(self.backing_map.front().map(|entry| entry.key().clone()))
    }

    fn last_key(&self) -> DocLiteResult<Option<Key>> {
        self.check_opened()?;
        Ok(self.backing_map.back().map(|entry| entry.key().clone()))
    }

    fn higher_key(&self, key: &Key) -> DocLiteResult<Option<Key>> {
        self.check_opened()?;
        if let Some(entry) = self.backing_map.range((Excluded(key), Unbounded)).next() {
            Ok(Some(entry.key().clone()))
        } else {
            Ok(None)
        }
    }

    fn lower_key(&self, key: &Key) -> DocLiteResult<Option<Key>> {
        self.check_opened()?;
        if let Some(entry) = self
            .backing_map
            .range((Unbounded, Excluded(key)))
            .next_back()
        {
            Ok(Some(entry.key().clone()))
        } else {
            Ok(None)
        }
    }

    fn close(&self) -> DocLiteResult<()> {
        self.backing_map.clear();
        self.closed.store(true, Ordering::Relaxed);
        self.store.close_map(&self.name)?;
        Ok(())
    }

    fn is_closed(&self) -> DocLiteResult<bool> {
        Ok(self.closed.load(Ordering::Relaxed))
    }

    fn drop_map(&self) -> DocLiteResult<()> {
        self.backing_map.clear();
        self.dropped.store(true, Ordering::Relaxed);
        self.closed.store(true, Ordering::Relaxed);
        self.store.remove_map(&self.name)?;
        Ok(())
    }

    fn is_dropped(&self) -> DocLiteResult<bool> {
        Ok(self.dropped.load(Ordering::Relaxed))
    }

    fn store(&self) -> DocLiteResult<DocStore> {
        Ok(self.store.clone())
    }
}
