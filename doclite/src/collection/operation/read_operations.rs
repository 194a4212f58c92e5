use crate::collection::{Document, FindOptions};
use crate::common::stream::filtered_stream::FilteredStream;
use crate::common::stream::map_values::MapValues;
use crate::common::stream::single_stream::SingleStream;
use crate::common::stream::DocumentCursor;
use crate::common::Value;
use crate::errors::DocLiteResult;
use crate::filter::{is_all_filter, Filter, IdFilter};
use crate::store::DocMap;
use std::ops::Deref;
use std::sync::Arc;

/// Query side of a collection: cursor construction and id lookups.
#[derive(Clone)]
pub(crate) struct ReadOperations {
    inner: Arc<ReadOperationsInner>,
}

impl ReadOperations {
    pub fn new(doc_map: DocMap) -> Self {
        Self {
            inner: Arc::new(ReadOperationsInner { doc_map }),
        }
    }
}

impl Deref for ReadOperations {
    type Target = ReadOperationsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub(crate) struct ReadOperationsInner {
    doc_map: DocMap,
}

impl ReadOperationsInner {
    /// Builds a cursor for the filter.
    ///
    /// The all-filter scans the map directly and an id filter fetches a
    /// single document; everything else walks the map through the filter.
    pub fn find(
        &self,
        filter: Filter,
        find_options: &FindOptions,
    ) -> DocLiteResult<DocumentCursor> {
        if is_all_filter(&filter) {
            let iter = Box::new(MapValues::new(self.doc_map.clone()));
            return Ok(DocumentCursor::new(Self::paginate(iter, find_options)));
        }

        if let Some(id_filter) = filter.as_any().downcast_ref::<IdFilter>() {
            let document = self.doc_map.get_document(id_filter.id())?;
            let iter = Box::new(SingleStream::new(document));
            return Ok(DocumentCursor::new(Self::paginate(iter, find_options)));
        }

        let raw_stream = Box::new(MapValues::new(self.doc_map.clone()));
        let iter = Box::new(FilteredStream::new(raw_stream, filter));
        Ok(DocumentCursor::new(Self::paginate(iter, find_options)))
    }

    /// First match for a filter, or None.
    pub fn find_one(&self, filter: Filter) -> DocLiteResult<Option<Document>> {
        let mut cursor = self.find(filter, &FindOptions::new())?;
        cursor.next().transpose()
    }

    pub fn get_by_id(&self, id: &Value) -> DocLiteResult<Option<Document>> {
        self.doc_map.get_document(id)
    }

    fn paginate(
        iter: Box<dyn Iterator<Item = DocLiteResult<Document>>>,
        find_options: &FindOptions,
    ) -> Box<dyn Iterator<Item = DocLiteResult<Document>>> {
        if find_options.skip.is_none() && find_options.limit.is_none() {
            return iter;
        }
        let skip = find_options.skip.unwrap_or(0);
        let limit = find_options.limit.unwrap_or(u64::MAX);
        Box::new(iter.skip(skip as usize).take(limit as usize))
    }
}
