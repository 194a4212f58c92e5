use std::collections::BTreeMap;

use crate::{
    collection::Document,
    errors::{DocLiteError, ErrorKind, DocLiteResult},
    filter::{by_id, Filter},
    Value,
};

/// Creates an empty document.
pub fn empty_document() -> Document {
    Document::new()
}

/// Creates a document from a [BTreeMap].
pub fn document_from_map(map: &BTreeMap<String, Value>) -> DocLiteResult<Document> {
    // recursively create document from map
    // and validate the key as well
    let mut doc = Document::new();
    for (key, value) in map.iter() {
        match value {
            Value::Document(obj) => {
                doc.put(key, Value::Document(obj.clone()))?;
            }
            Value::Array(arr) => {
                let mut nested_arr = Vec::with_capacity(arr.len());
                for v in arr.iter() {
                    match v {
                        Value::Document(obj) => {
                            nested_arr.push(Value::Document(obj.clone()));
                        }
                        _ => {
                            nested_arr.push(v.clone());
                        }
                    }
                }
                doc.put(key, Value::Array(nested_arr))?;
            }
            _ => {
                doc.put(key, value.clone())?;
            }
        }
    }
    Ok(doc)
}

/// Creates a document with a single key-value pair.
pub fn create_document(key: &str, value: Value) -> DocLiteResult<Document> {
    let mut doc = Document::new();
    doc.put(key, value)?;
    Ok(doc)
}

pub(crate) fn create_unique_filter(document: &Document) -> DocLiteResult<Filter> {
    match document.id() {
        Some(id) => Ok(by_id(id.clone())),
        None => {
            log::error!("Document does not have an id");
            Err(DocLiteError::new(
                "Document does not have an id",
                ErrorKind::NotIdentifiable,
            ))
        }
    }
}
