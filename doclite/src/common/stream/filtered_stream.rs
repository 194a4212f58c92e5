use crate::{collection::Document, errors::DocLiteResult, filter::Filter};

/// Stream adapter that keeps only documents matching a filter.
pub(crate) struct FilteredStream {
    raw_stream: Box<dyn Iterator<Item = DocLiteResult<Document>>>,
    filter: Filter,
}

impl FilteredStream {
    pub fn new(
        raw_stream: Box<dyn Iterator<Item = DocLiteResult<Document>>>,
        filter: Filter,
    ) -> Self {
        FilteredStream { raw_stream, filter }
    }
}

impl Iterator for FilteredStream {
    type Item = DocLiteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.raw_stream.next() {
                Some(Ok(document)) => match self.filter.apply(&document) {
                    Ok(true) => return Some(Ok(document)),
                    Ok(false) => continue,
                    Err(e) => return Some(Err(e)),
                },
                Some(Err(e)) => return Some(Err(e)),
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::errors::{DocLiteError, ErrorKind};
    use crate::filter::query;

    fn create_document(field1: &str) -> Document {
        doc! {
            "field1": field1,
        }
    }

    fn name_filter(value: &str) -> Filter {
        query(&doc! { "field1": value }).unwrap()
    }

    #[test]
    fn test_filtered_stream_with_matching_document() {
        let docs = vec![
            Ok(create_document("value")),
            Ok(create_document("other_value")),
        ];
        let mut filtered = FilteredStream::new(Box::new(docs.into_iter()), name_filter("value"));

        let document = filtered.next().unwrap().unwrap();
        assert_eq!(
            document.get("field1").unwrap().as_string().unwrap(),
            "value"
        );
        assert!(filtered.next().is_none());
    }

    #[test]
    fn test_filtered_stream_with_no_matching_document() {
        let docs = vec![
            Ok(create_document("other_value")),
            Ok(create_document("another_value")),
        ];
        let mut filtered = FilteredStream::new(Box::new(docs.into_iter()), name_filter("value"));
        assert!(filtered.next().is_none());
    }

    #[test]
    fn test_filtered_stream_skips_non_matching_in_between() {
        let docs = vec![
            Ok(create_document("other")),
            Ok(create_document("value")),
            Ok(create_document("other")),
            Ok(create_document("value")),
        ];
        let filtered = FilteredStream::new(Box::new(docs.into_iter()), name_filter("value"));
        assert_eq!(filtered.count(), 2);
    }

    #[test]
    fn test_filtered_stream_propagates_stream_errors() {
        let docs = vec![
            Ok(create_document("value")),
            Err(DocLiteError::new("Test Error", ErrorKind::IOError)),
        ];
        let mut filtered = FilteredStream::new(Box::new(docs.into_iter()), name_filter("value"));

        assert!(filtered.next().unwrap().is_ok());
        let err = filtered.next().unwrap().err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::IOError);
    }

    #[test]
    fn test_filtered_stream_missing_field_does_not_match() {
        let docs = vec![Ok(doc! { "unrelated": 1 })];
        let mut filtered = FilteredStream::new(Box::new(docs.into_iter()), name_filter("value"));
        assert!(filtered.next().is_none());
    }
}
