use super::{
    operation::{CollectionOperations, WriteResult},
    DocumentCollectionProvider, UpdateOptions,
};
use crate::{
    common::constants::{DOC_ID, SET_OPERATOR},
    common::stream::DocumentCursor,
    common::{LockHandle, Value},
    errors::{DocLiteError, DocLiteResult, ErrorKind},
    filter::Filter,
    store::{DocMap, DocStore},
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Default [DocumentCollectionProvider] backed by a store map.
///
/// Serializes access through the collection's [LockHandle]: reads take the
/// read lock, writes take the write lock. Every operation first runs the
/// open-state guard chain.
pub(crate) struct DefaultDocumentCollection {
    collection_name: String,
    doc_map: DocMap,
    store: DocStore,
    operations: CollectionOperations,
    dropped: AtomicBool,
    lock_handle: LockHandle,
}

impl DefaultDocumentCollection {
    pub fn new(
        collection_name: &str,
        doc_map: DocMap,
        store: DocStore,
        lock_handle: LockHandle,
    ) -> Self {
        let operations = CollectionOperations::new(doc_map.clone());

        Self {
            collection_name: collection_name.to_string(),
            doc_map,
            store,
            operations,
            dropped: AtomicBool::from(false),
            lock_handle,
        }
    }

    fn ensure_opened(&self) -> DocLiteResult<()> {
        if self.dropped.load(Ordering::Relaxed) {
            let message = format!("Collection '{}' is dropped", self.collection_name);
            log::error!("{}", message);
            return Err(DocLiteError::new(&message, ErrorKind::InvalidOperation));
        }

        if self.store.is_closed()? {
            log::error!(
                "Store is closed; cannot access collection '{}'",
                self.collection_name
            );
            return Err(DocLiteError::new(
                "Store is closed; reopen the database to continue operations",
                ErrorKind::InvalidOperation,
            ));
        }

        if self.doc_map.is_closed()? {
            let message = format!(
                "Collection '{}' underlying map is closed",
                self.collection_name
            );
            log::error!("{}", message);
            return Err(DocLiteError::new(&message, ErrorKind::InvalidOperation));
        }

        if self.doc_map.is_dropped()? {
            let message = format!(
                "Collection '{}' underlying map is dropped",
                self.collection_name
            );
            log::error!("{}", message);
            return Err(DocLiteError::new(&message, ErrorKind::InvalidOperation));
        }

        Ok(())
    }
}

impl DocumentCollectionProvider for DefaultDocumentCollection {
    fn insert(&self, document: super::Document) -> DocLiteResult<WriteResult> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.insert(document)
    }

    fn insert_many(&self, documents: Vec<super::Document>) -> DocLiteResult<WriteResult> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.insert_many(documents)
    }

    fn save(&self, document: super::Document) -> DocLiteResult<WriteResult> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.save(document)
    }

    fn update_with_options(
        &self,
        filter: Filter,
        update: &super::Document,
        update_options: &UpdateOptions,
    ) -> DocLiteResult<WriteResult> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.update(filter, update, update_options)
    }

    fn update_one(
        &self,
        document: &super::Document,
        insert_if_absent: bool,
    ) -> DocLiteResult<WriteResult> {
        let id = match document.id() {
            Some(id) => id.clone(),
            None => {
                log::error!("Document does not have an id");
                return Err(DocLiteError::new(
                    "Document does not have an id",
                    ErrorKind::NotIdentifiable,
                ));
            }
        };

        // the document's non-id fields become a $set command
        let mut fields = super::Document::new();
        for (key, value) in document.iter() {
            if key != DOC_ID {
                fields.put(key, value)?;
            }
        }
        let mut update = super::Document::new();
        update.put(SET_OPERATOR, Value::Document(fields))?;

        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.update_by_id(&id, &update, insert_if_absent)
    }

    fn remove_with_options(&self, filter: Filter, just_once: bool) -> DocLiteResult<WriteResult> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.remove(filter, just_once)
    }

    fn remove_one(&self, document: &super::Document) -> DocLiteResult<WriteResult> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.remove_document(document)
    }

    fn find_with_options(
        &self,
        filter: Filter,
        find_options: &super::FindOptions,
    ) -> DocLiteResult<DocumentCursor> {
        let _guard = self.lock_handle.read();
        self.ensure_opened()?;
        self.operations.find(filter, find_options)
    }

    fn find_one(&self, filter: Filter) -> DocLiteResult<Option<super::Document>> {
        let _guard = self.lock_handle.read();
        self.ensure_opened()?;
        self.operations.find_one(filter)
    }

    fn get_by_id(&self, id: &Value) -> DocLiteResult<Option<super::Document>> {
        let _guard = self.lock_handle.read();
        self.ensure_opened()?;
        self.operations.get_by_id(id)
    }

    fn drop_collection(&self) -> DocLiteResult<()> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.dispose()?;
        self.dropped.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn size(&self) -> DocLiteResult<u64> {
        let _guard = self.lock_handle.read();
        self.ensure_opened()?;
        self.operations.size()
    }

    fn clear(&self) -> DocLiteResult<()> {
        let _guard = self.lock_handle.write();
        self.ensure_opened()?;
        self.operations.clear()
    }

    fn is_dropped(&self) -> DocLiteResult<bool> {
        let _guard = self.lock_handle.read();
        Ok(self.dropped.load(Ordering::Relaxed) || self.doc_map.is_dropped()?)
    }

    fn is_open(&self) -> DocLiteResult<bool> {
        let _guard = self.lock_handle.read();
        Ok(!self.store.is_closed()?
            && !self.dropped.load(Ordering::Relaxed)
            && !self.doc_map.is_closed()?
            && !self.doc_map.is_dropped()?)
    }

    fn close(&self) -> DocLiteResult<()> {
        let _guard = self.lock_handle.write();
        self.operations.close()
    }

    fn name(&self) -> String {
        self.collection_name.clone()
    }
}
