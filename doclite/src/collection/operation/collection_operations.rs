use super::{
    read_operations::ReadOperations, write_operations::WriteOperations, write_result::WriteResult,
};
use crate::{
    collection::{Document, FindOptions, UpdateOptions},
    common::stream::DocumentCursor,
    common::Value,
    errors::DocLiteResult,
    filter::Filter,
    store::DocMap,
};

/// Composition root for a single collection's operations.
///
/// Owns the backing map and wires the read and write sides together. The
/// collection facade layers locking and lifecycle guards on top of this.
pub(crate) struct CollectionOperations {
    doc_map: DocMap,
    write_operations: WriteOperations,
    read_operations: ReadOperations,
}

impl CollectionOperations {
    pub fn new(doc_map: DocMap) -> Self {
        let read_operations = ReadOperations::new(doc_map.clone());
        let write_operations = WriteOperations::new(read_operations.clone(), doc_map.clone());

        Self {
            doc_map,
            write_operations,
            read_operations,
        }
    }

    pub fn insert(&self, document: Document) -> DocLiteResult<WriteResult> {
        self.write_operations.insert(document)
    }

    pub fn insert_many(&self, documents: Vec<Document>) -> DocLiteResult<WriteResult> {
        self.write_operations.insert_many(documents)
    }

    pub fn save(&self, document: Document) -> DocLiteResult<WriteResult> {
        self.write_operations.save(document)
    }

    pub fn update(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> DocLiteResult<WriteResult> {
        self.write_operations.update(filter, update, update_options)
    }

    /// Updates a document directly by its id without a filter scan.
    pub fn update_by_id(
        &self,
        id: &Value,
        update: &Document,
        insert_if_absent: bool,
    ) -> DocLiteResult<WriteResult> {
        self.write_operations
            .update_by_id(id, update, insert_if_absent)
    }

    pub fn remove(&self, filter: Filter, just_once: bool) -> DocLiteResult<WriteResult> {
        self.write_operations.remove(filter, just_once)
    }

    pub fn remove_document(&self, document: &Document) -> DocLiteResult<WriteResult> {
        self.write_operations.remove_document(document)
    }

    pub fn find(
        &self,
        filter: Filter,
        find_options: &FindOptions,
    ) -> DocLiteResult<DocumentCursor> {
        self.read_operations.find(filter, find_options)
    }

    pub fn find_one(&self, filter: Filter) -> DocLiteResult<Option<Document>> {
        self.read_operations.find_one(filter)
    }

    pub fn get_by_id(&self, id: &Value) -> DocLiteResult<Option<Document>> {
        self.read_operations.get_by_id(id)
    }

    pub fn size(&self) -> DocLiteResult<u64> {
        self.doc_map.size()
    }

    pub fn clear(&self) -> DocLiteResult<()> {
        self.doc_map.clear()
    }

    pub fn close(&self) -> DocLiteResult<()> {
        self.doc_map.close()
    }

    /// Drops the backing map along with its catalog entry.
    pub fn dispose(&self) -> DocLiteResult<()> {
        self.doc_map.drop_map()
    }
}
