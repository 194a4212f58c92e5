use super::{read_operations::ReadOperations, write_result::WriteResult};
use crate::collection::{Document, FindOptions, UpdateCommand, UpdateOptions};
use crate::common::constants::DOC_ID;
use crate::common::{Key, Value};
use crate::errors::{DocLiteError, DocLiteResult, ErrorKind};
use crate::filter::{is_all_filter, Filter};
use crate::store::DocMap;
use std::ops::Deref;
use std::sync::Arc;

/// Mutation side of a collection: insert, save, update and remove.
#[derive(Clone)]
pub(crate) struct WriteOperations {
    inner: Arc<WriteOperationsInner>,
}

impl WriteOperations {
    pub fn new(read_operations: ReadOperations, doc_map: DocMap) -> Self {
        Self {
            inner: Arc::new(WriteOperationsInner {
                read_operations,
                doc_map,
            }),
        }
    }
}

impl Deref for WriteOperations {
    type Target = WriteOperationsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub(crate) struct WriteOperationsInner {
    read_operations: ReadOperations,
    doc_map: DocMap,
}

impl WriteOperationsInner {
    /// Strict insert: fails if a document with the same id already exists.
    pub fn insert(&self, document: Document) -> DocLiteResult<WriteResult> {
        let id = self.insert_document(document)?;
        Ok(WriteResult::new(vec![id]))
    }

    pub fn insert_many(&self, documents: Vec<Document>) -> DocLiteResult<WriteResult> {
        let mut affected_ids = Vec::with_capacity(documents.len());
        for document in documents {
            affected_ids.push(self.insert_document(document)?);
        }
        Ok(WriteResult::new(affected_ids))
    }

    /// Insert-or-replace by id; the storage layer assigns an id if absent.
    pub fn save(&self, document: Document) -> DocLiteResult<WriteResult> {
        let id = self.doc_map.put_document(document)?;
        Ok(WriteResult::new(vec![id]))
    }

    pub fn update(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> DocLiteResult<WriteResult> {
        let command = UpdateCommand::parse(update)?;
        let cursor = self
            .read_operations
            .find(filter.clone(), &FindOptions::new())?;

        let mut affected_ids = Vec::new();
        for matched in cursor {
            let matched = matched?;
            let id = self.update_stored_document(&matched, &command)?;
            affected_ids.push(id);

            if update_options.is_just_once() {
                break;
            }
        }

        if affected_ids.is_empty() && update_options.is_insert_if_absent() {
            let id = self.upsert(&filter, &command)?;
            affected_ids.push(id);
        }

        Ok(WriteResult::new(affected_ids))
    }

    /// Applies an update to the document addressed by its own id.
    pub fn update_by_id(
        &self,
        id: &Value,
        update: &Document,
        insert_if_absent: bool,
    ) -> DocLiteResult<WriteResult> {
        let command = UpdateCommand::parse(update)?;

        match self.read_operations.get_by_id(id)? {
            Some(stored) => {
                let id = self.update_stored_document(&stored, &command)?;
                Ok(WriteResult::new(vec![id]))
            }
            None if insert_if_absent => {
                let mut seed = Document::new();
                seed.put(DOC_ID, id.clone())?;
                let inserted = command.apply(&seed)?;
                let id = self.doc_map.put_document(inserted)?;
                Ok(WriteResult::new(vec![id]))
            }
            None => Ok(WriteResult::new(vec![])),
        }
    }

    pub fn remove(&self, filter: Filter, just_once: bool) -> DocLiteResult<WriteResult> {
        if is_all_filter(&filter) && just_once {
            log::error!("Cannot remove a single document with a match-all filter");
            return Err(DocLiteError::new(
                "Cannot remove a single document with a match-all filter",
                ErrorKind::InvalidOperation,
            ));
        }

        let cursor = self.read_operations.find(filter, &FindOptions::new())?;
        let mut affected_ids = Vec::new();

        for matched in cursor {
            let matched = matched?;
            if let Some(id) = self.remove_stored_document(&matched)? {
                affected_ids.push(id);
            }

            if just_once {
                break;
            }
        }

        Ok(WriteResult::new(affected_ids))
    }

    /// Removes the document addressed by its own id.
    pub fn remove_document(&self, document: &Document) -> DocLiteResult<WriteResult> {
        let mut affected_ids = Vec::new();
        if let Some(id) = self.remove_stored_document(document)? {
            affected_ids.push(id);
        }
        Ok(WriteResult::new(affected_ids))
    }

    fn insert_document(&self, document: Document) -> DocLiteResult<Key> {
        match document.id() {
            Some(id) => {
                let id = id.clone();
                let existing = self
                    .doc_map
                    .put_if_absent(id.clone(), Value::Document(document))?;
                if existing.is_some() {
                    let message = format!("Document already exists with id {}", id);
                    log::error!("{}", message);
                    return Err(DocLiteError::new(
                        &message,
                        ErrorKind::UniqueConstraintViolation,
                    ));
                }
                Ok(id)
            }
            // a fresh storage-assigned id cannot collide
            None => self.doc_map.put_document(document),
        }
    }

    fn update_stored_document(
        &self,
        stored: &Document,
        command: &UpdateCommand,
    ) -> DocLiteResult<Value> {
        let id = document_id(stored)?;
        let updated = command.apply(stored)?;
        self.doc_map.put(id.clone(), Value::Document(updated))?;
        Ok(id)
    }

    fn remove_stored_document(&self, document: &Document) -> DocLiteResult<Option<Value>> {
        let id = document_id(document)?;
        Ok(self.doc_map.remove(&id)?.map(|_| id))
    }

    /// Synthesizes and inserts a document from the filter's literal fields.
    fn upsert(&self, filter: &Filter, command: &UpdateCommand) -> DocLiteResult<Value> {
        let mut seed = Document::new();
        let contributed = filter.seed_into(&mut seed)?;
        if !contributed {
            let message = format!("Filter '{}' has no literal fields to seed an upsert", filter);
            log::error!("{}", message);
            return Err(DocLiteError::new(&message, ErrorKind::UpsertSeedFailed));
        }

        let inserted = command.apply(&seed)?;
        self.doc_map.put_document(inserted)
    }
}

fn document_id(document: &Document) -> DocLiteResult<Value> {
    match document.id() {
        Some(id) => Ok(id.clone()),
        None => {
            log::error!("Document has no id");
            Err(DocLiteError::new(
                "Document has no id",
                ErrorKind::NotIdentifiable,
            ))
        }
    }
}
