use crate::common::{Key, Value};
use crate::errors::DocLiteResult;
use crate::store::DocMap;
use std::sync::Arc;

/// Contract for iterating (Key, Value) entries in both directions.
///
/// Providers are stateful: they remember the position of the last visited
/// key and navigate from there, so iteration stays lazy and never
/// materializes the whole map.
pub trait EntryIteratorProvider: Send + Sync {
    fn next_entry(&mut self) -> Option<DocLiteResult<(Key, Value)>>;

    fn prev_entry(&mut self) -> Option<DocLiteResult<(Key, Value)>>;
}

/// Contract for iterating keys in both directions.
pub trait KeyIteratorProvider: Send + Sync {
    fn next_key(&mut self) -> Option<DocLiteResult<Key>>;

    fn prev_key(&mut self) -> Option<DocLiteResult<Key>>;
}

/// Contract for iterating values in both directions.
pub trait ValueIteratorProvider: Send + Sync {
    fn next_value(&mut self) -> Option<DocLiteResult<Value>>;

    fn prev_value(&mut self) -> Option<DocLiteResult<Value>>;
}

/// Facade for bidirectional iteration over (Key, Value) entries.
///
/// Wraps any [EntryIteratorProvider] behind `Arc<Mutex<_>>`: clones are
/// cheap and share iteration state.
pub struct EntryIterator {
    provider: Arc<parking_lot::Mutex<Box<dyn EntryIteratorProvider>>>,
}

impl EntryIterator {
    pub fn new<T: EntryIteratorProvider + 'static>(provider: T) -> Self {
        EntryIterator {
            provider: Arc::new(parking_lot::Mutex::new(Box::new(provider))),
        }
    }
}

impl Clone for EntryIterator {
    fn clone(&self) -> Self {
        EntryIterator {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl Iterator for EntryIterator {
    type Item = DocLiteResult<(Key, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut provider = self.provider.lock();
        provider.next_entry()
    }
}

impl DoubleEndedIterator for EntryIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut provider = self.provider.lock();
        provider.prev_entry()
    }
}

/// Facade for bidirectional iteration over keys.
pub struct KeyIterator {
    provider: Arc<parking_lot::Mutex<Box<dyn KeyIteratorProvider>>>,
}

impl KeyIterator {
    pub fn new<T: KeyIteratorProvider + 'static>(provider: T) -> Self {
        KeyIterator {
            provider: Arc::new(parking_lot::Mutex::new(Box::new(provider))),
        }
    }
}

impl Clone for KeyIterator {
    fn clone(&self) -> Self {
        KeyIterator {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl Iterator for KeyIterator {
    type Item = DocLiteResult<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut provider = self.provider.lock();
        provider.next_key()
    }
}

impl DoubleEndedIterator for KeyIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut provider = self.provider.lock();
        provider.prev_key()
    }
}

/// Facade for bidirectional iteration over values.
pub struct ValueIterator {
    provider: Arc<parking_lot::Mutex<Box<dyn ValueIteratorProvider>>>,
}

impl ValueIterator {
    pub fn new<T: ValueIteratorProvider + 'static>(provider: T) -> Self {
        ValueIterator {
            provider: Arc::new(parking_lot::Mutex::new(Box::new(provider))),
        }
    }
}

impl Clone for ValueIterator {
    fn clone(&self) -> Self {
        ValueIterator {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl Iterator for ValueIterator {
    type Item = DocLiteResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut provider = self.provider.lock();
        provider.next_value()
    }
}

impl DoubleEndedIterator for ValueIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut provider = self.provider.lock();
        provider.prev_value()
    }
}

/// Entry provider over a single [DocMap].
///
/// Navigates with `first_key`/`higher_key` (and `last_key`/`lower_key`
/// backwards), so the traversal follows the map's key order and reflects
/// concurrent changes to the underlying map.
pub struct SingleMapEntryProvider {
    inner_map: DocMap,
    current: Option<Key>,
}

impl SingleMapEntryProvider {
    pub fn new(map: DocMap) -> Self {
        SingleMapEntryProvider {
            inner_map: map,
            current: None,
        }
    }

    fn set_current(
        &mut self,
        next_key: DocLiteResult<Option<Key>>,
    ) -> Option<DocLiteResult<(Key, Value)>> {
        match next_key {
            Ok(Some(key)) => {
                self.current = Some(key.clone());
                match self.inner_map.get(&key) {
                    Ok(Some(value)) => Some(Ok((key, value))),
                    Ok(None) => None,
                    Err(e) => Some(Err(e)),
                }
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }

    fn higher_key(&self) -> DocLiteResult<Option<Key>> {
        match &self.current {
            Some(current_key) => self.inner_map.higher_key(current_key),
            None => self.inner_map.first_key(),
        }
    }

    fn lower_key(&self) -> DocLiteResult<Option<Key>> {
        match &self.current {
            Some(current_key) => self.inner_map.lower_key(current_key),
            None => self.inner_map.last_key(),
        }
    }
}

impl EntryIteratorProvider for SingleMapEntryProvider {
    fn next_entry(&mut self) -> Option<DocLiteResult<(Key, Value)>> {
        let next_key = self.higher_key();
        self.set_current(next_key)
    }

    fn prev_entry(&mut self) -> Option<DocLiteResult<(Key, Value)>> {
        let next_key = self.lower_key();
        self.set_current(next_key)
    }
}

/// Key provider over a single [DocMap].
pub struct SingleMapKeyProvider {
    inner_map: DocMap,
    current: Option<Key>,
}

impl SingleMapKeyProvider {
    pub fn new(map: DocMap) -> Self {
        SingleMapKeyProvider {
            inner_map: map,
            current: None,
        }
    }

    fn set_current(&mut self, next_key: DocLiteResult<Option<Key>>) -> Option<DocLiteResult<Key>> {
        match next_key {
            Ok(Some(key)) => {
                self.current = Some(key.clone());
                Some(Ok(key))
            }
            Ok(None) => {
                self.current = None;
                None
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl KeyIteratorProvider for SingleMapKeyProvider {
    fn next_key(&mut self) -> Option<DocLiteResult<Key>> {
        let next_key = match &self.current {
            Some(current_key) => self.inner_map.higher_key(current_key),
            None => self.inner_map.first_key(),
        };
        self.set_current(next_key)
    }

    fn prev_key(&mut self) -> Option<DocLiteResult<Key>> {
        let next_key = match &self.current {
            Some(current_key) => self.inner_map.lower_key(current_key),
            None => self.inner_map.last_key(),
        };
        self.set_current(next_key)
    }
}

/// Value provider over a single [DocMap].
pub struct SingleMapValueProvider {
    inner_map: DocMap,
    current: Option<Key>,
}

impl SingleMapValueProvider {
    pub fn new(map: DocMap) -> Self {
        SingleMapValueProvider {
            inner_map: map,
            current: None,
        }
    }

    fn set_current(
        &mut self,
        next_key: DocLiteResult<Option<Key>>,
    ) -> Option<DocLiteResult<Value>> {
        match next_key {
            Ok(Some(key)) => {
                self.current = Some(key.clone());
                match self.inner_map.get(&key) {
                    Ok(Some(value)) => Some(Ok(value)),
                    Ok(None) => None,
                    Err(e) => Some(Err(e)),
                }
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl ValueIteratorProvider for SingleMapValueProvider {
    fn next_value(&mut self) -> Option<DocLiteResult<Value>> {
        let next_key = match &self.current {
            Some(current_key) => self.inner_map.higher_key(current_key),
            None => self.inner_map.first_key(),
        };
        self.set_current(next_key)
    }

    fn prev_value(&mut self) -> Option<DocLiteResult<Value>> {
        let next_key = match &self.current {
            Some(current_key) => self.inner_map.lower_key(current_key),
            None => self.inner_map.last_key(),
        };
        self.set_current(next_key)
    }
}
