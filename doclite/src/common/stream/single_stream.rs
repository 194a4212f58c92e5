use crate::{collection::Document, errors::DocLiteResult};

/// Stream of zero or one document, used for id lookups.
pub(crate) struct SingleStream {
    pub(crate) document: Option<Document>,
}

impl SingleStream {
    pub fn new(document: Option<Document>) -> Self {
        Self { document }
    }
}

impl Iterator for SingleStream {
    type Item = DocLiteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        self.document.take().map(Ok)
    }
}
