use crate::{
    collection::Document,
    common::Key,
    errors::DocLiteResult,
    store::DocMap,
};

/// Lazy key-ordered scan over the documents of a map.
///
/// Navigates with `first_key`/`higher_key` instead of holding a map
/// iterator, so documents inserted or removed mid-scan are picked up
/// correctly. Values that are not documents are skipped with a warning.
pub(crate) struct MapValues {
    entries: DocMap,
    current: Option<Key>,
}

impl MapValues {
    pub fn new(map: DocMap) -> Self {
        Self {
            entries: map,
            current: None,
        }
    }

    fn higher_key(&self) -> DocLiteResult<Option<Key>> {
        match &self.current {
            Some(current_key) => self.entries.higher_key(current_key),
            None => self.entries.first_key(),
        }
    }
}

impl Iterator for MapValues {
    type Item = DocLiteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = match self.higher_key() {
                Ok(Some(key)) => key,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };
            self.current = Some(key.clone());

            match self.entries.get(&key) {
                Ok(Some(value)) => match value.as_document() {
                    Some(document) => return Some(Ok(document.clone())),
                    None => {
                        log::warn!(
                            "Expected a document under {:?}, found {:?}, skipping",
                            key,
                            value
                        );
                        continue;
                    }
                },
                // entry vanished between navigation and fetch, move on
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
