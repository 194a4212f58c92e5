use super::{operation::WriteResult, Document, FindOptions, UpdateOptions};
use crate::{
    common::stream::DocumentCursor,
    common::Value,
    errors::DocLiteResult,
    filter::{all, Filter},
};
use std::ops::Deref;
use std::sync::Arc;

/// Trait defining the interface for a document collection.
///
/// A collection is a container for documents in DocLite. It provides methods
/// for inserting, updating, removing, and querying documents. Implementations
/// handle locking, validation, and persistence.
pub trait DocumentCollectionProvider: Send + Sync {
    /// Inserts a single document into the collection.
    ///
    /// If the document does not have an `_id` field, the storage layer assigns
    /// one. Inserting a document whose `_id` already exists fails with
    /// `UniqueConstraintViolation`.
    fn insert(&self, document: Document) -> DocLiteResult<WriteResult>;

    /// Inserts multiple documents into the collection.
    ///
    /// Stops at the first failure; documents inserted before the failure stay
    /// in the collection.
    fn insert_many(&self, documents: Vec<Document>) -> DocLiteResult<WriteResult>;

    /// Inserts the document, or replaces the stored document with the same `_id`.
    fn save(&self, document: Document) -> DocLiteResult<WriteResult>;

    /// Updates every document matching a filter with the given update command.
    ///
    /// Use [DocumentCollectionProvider::update_with_options] for upsert or
    /// first-match-only behavior.
    fn update(&self, filter: Filter, update: &Document) -> DocLiteResult<WriteResult> {
        self.update_with_options(filter, update, &UpdateOptions::default())
    }

    /// Updates documents matching a filter, honoring the given options.
    fn update_with_options(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> DocLiteResult<WriteResult>;

    /// Updates a single document addressed by its own `_id` field.
    ///
    /// The document's non-id fields become the new field values. Fails with
    /// `NotIdentifiable` when the document carries no `_id`.
    fn update_one(&self, document: &Document, insert_if_absent: bool)
        -> DocLiteResult<WriteResult>;

    /// Removes every document matching a filter.
    fn remove(&self, filter: Filter) -> DocLiteResult<WriteResult> {
        self.remove_with_options(filter, false)
    }

    /// Removes documents matching a filter.
    ///
    /// With `just_once` only the first match is removed; combining `just_once`
    /// with the match-all filter is rejected as `InvalidOperation`.
    fn remove_with_options(&self, filter: Filter, just_once: bool) -> DocLiteResult<WriteResult>;

    /// Removes a single document addressed by its own `_id` field.
    fn remove_one(&self, document: &Document) -> DocLiteResult<WriteResult>;

    /// Finds documents matching a filter.
    fn find(&self, filter: Filter) -> DocLiteResult<DocumentCursor> {
        self.find_with_options(filter, &FindOptions::new())
    }

    /// Returns a cursor over every document in the collection.
    fn find_all(&self) -> DocLiteResult<DocumentCursor> {
        self.find(all())
    }

    /// Finds documents matching a filter with pagination options.
    fn find_with_options(
        &self,
        filter: Filter,
        find_options: &FindOptions,
    ) -> DocLiteResult<DocumentCursor>;

    /// First document matching a filter, or `None`.
    fn find_one(&self, filter: Filter) -> DocLiteResult<Option<Document>>;

    /// Retrieves a document by its id without a filter scan.
    fn get_by_id(&self, id: &Value) -> DocLiteResult<Option<Document>>;

    /// Drops the collection: clears its data, removes its catalog entry and
    /// marks it dropped. Further operations fail with `InvalidOperation`.
    fn drop_collection(&self) -> DocLiteResult<()>;

    /// Number of documents in the collection.
    fn size(&self) -> DocLiteResult<u64>;

    /// Removes every document, keeping the collection itself.
    fn clear(&self) -> DocLiteResult<()>;

    fn is_dropped(&self) -> DocLiteResult<bool>;

    fn is_open(&self) -> DocLiteResult<bool>;

    /// Closes the collection's backing map.
    fn close(&self) -> DocLiteResult<()>;

    /// Returns the name of this collection.
    fn name(&self) -> String;
}

/// A named document collection in a DocLite database.
///
/// Documents in a collection are uniquely identified by their `_id` field and
/// queried with filters and options.
///
/// # Examples
///
/// ```rust,ignore
/// let db = DocLite::builder().open_or_create()?;
/// let users = db.collection("users")?;
///
/// users.insert(doc! { "name": "Alice", "age": 30 })?;
///
/// let cursor = users.find(query(&doc! { "age": { "$gt": 21 } })?)?;
/// for user in cursor {
///     println!("{}", user?);
/// }
/// ```
#[derive(Clone)]
pub struct DocumentCollection {
    inner: Arc<dyn DocumentCollectionProvider>,
}

impl DocumentCollection {
    /// Creates a new `DocumentCollection` from a provider implementation.
    pub fn new<T: DocumentCollectionProvider + 'static>(inner: T) -> Self {
        DocumentCollection {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for DocumentCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentCollection({})", self.inner.name())
    }
}

impl Deref for DocumentCollection {
    type Target = Arc<dyn DocumentCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
