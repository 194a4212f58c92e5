use crate::collection::Document;
use crate::common::stream::projected_cursor::ProjectedDocumentCursor;
use crate::errors::DocLiteResult;

/// Lazy, restartable cursor over a stream of documents.
///
/// The underlying iterator is pulled on demand and every yielded item is
/// cached, so the cursor can be [reset](DocumentCursor::reset) and walked
/// again without touching the store a second time.
pub struct DocumentCursor {
    underlying: Option<Box<dyn Iterator<Item = DocLiteResult<Document>>>>,
    cache: Vec<DocLiteResult<Document>>,
    current_index: usize,
}

impl DocumentCursor {
    pub fn new(iter: Box<dyn Iterator<Item = DocLiteResult<Document>>>) -> Self {
        DocumentCursor {
            underlying: Some(iter),
            cache: Vec::new(),
            current_index: 0,
        }
    }

    /// Resets the cursor so that it can be iterated from the beginning.
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// Total number of documents in the stream. Drains the underlying
    /// iterator if it has not been exhausted yet, then resets.
    pub fn size(&mut self) -> usize {
        if self.underlying.is_none() {
            self.reset();
            return self.cache.len();
        }
        for _ in self.by_ref() {}
        self.reset();
        self.cache.len()
    }

    pub fn first(&mut self) -> Option<DocLiteResult<Document>> {
        self.reset();
        self.next()
    }

    /// Applies a projection to every document the cursor yields.
    pub fn project(&mut self, projection: Document) -> DocLiteResult<ProjectedDocumentCursor<'_>> {
        ProjectedDocumentCursor::new(self, projection)
    }
}

impl Iterator for DocumentCursor {
    type Item = DocLiteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.cache.len() {
            let result = self.cache[self.current_index].clone();
            self.current_index += 1;
            return Some(result);
        }

        if let Some(ref mut iter) = self.underlying {
            if let Some(item) = iter.next() {
                self.cache.push(item.clone());
                self.current_index += 1;
                return Some(item);
            }
            // once exhausted, drop the underlying iterator
            self.underlying = None;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::errors::{DocLiteError, ErrorKind};

    fn create_document(first: &str, last: &str) -> Document {
        doc! {
            first: first,
            last: last,
        }
    }

    fn create_cursor(docs: Vec<DocLiteResult<Document>>) -> DocumentCursor {
        DocumentCursor::new(Box::new(docs.into_iter()))
    }

    #[test]
    fn test_next() {
        let mut cursor = create_cursor(vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ]);
        assert_eq!(
            cursor
                .next()
                .unwrap()
                .unwrap()
                .get("first")
                .unwrap()
                .as_string()
                .unwrap(),
            "John"
        );
        assert_eq!(
            cursor
                .next()
                .unwrap()
                .unwrap()
                .get("first")
                .unwrap()
                .as_string()
                .unwrap(),
            "Jane"
        );
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_next_with_error() {
        let mut cursor = create_cursor(vec![
            Ok(create_document("John", "Doe")),
            Err(DocLiteError::new("Test Error", ErrorKind::IOError)),
        ]);
        assert!(cursor.next().unwrap().is_ok());
        assert!(cursor.next().unwrap().is_err());
    }

    #[test]
    fn test_reset_replays_from_cache() {
        let mut cursor = create_cursor(vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ]);
        assert_eq!(cursor.by_ref().count(), 2);

        cursor.reset();
        assert_eq!(cursor.by_ref().count(), 2);
    }

    #[test]
    fn test_size() {
        let mut cursor = create_cursor(vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ]);
        assert_eq!(cursor.size(), 2);
        // size resets the cursor
        assert!(cursor.next().is_some());
    }

    #[test]
    fn test_size_after_partial_iteration() {
        let mut cursor = create_cursor(vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
            Ok(create_document("Bob", "Smith")),
        ]);
        cursor.next();
        assert_eq!(cursor.size(), 3);
    }

    #[test]
    fn test_first() {
        let mut cursor = create_cursor(vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ]);
        // consume everything, first still returns the head
        assert_eq!(cursor.by_ref().count(), 2);
        assert_eq!(
            cursor
                .first()
                .unwrap()
                .unwrap()
                .get("first")
                .unwrap()
                .as_string()
                .unwrap(),
            "John"
        );
    }

    #[test]
    fn test_first_on_empty_cursor() {
        let mut cursor = create_cursor(Vec::new());
        assert!(cursor.first().is_none());
    }

    #[test]
    fn test_project() {
        let mut cursor = create_cursor(vec![Ok(create_document("John", "Doe"))]);
        let projection = doc! { "first": 1 };
        let projected = cursor.project(projection).unwrap();
        let documents: Vec<_> = projected.collect();
        assert_eq!(documents.len(), 1);

        let document = documents[0].as_ref().unwrap();
        assert!(document.contains_key("first"));
        assert!(!document.contains_key("last"));
    }
}
