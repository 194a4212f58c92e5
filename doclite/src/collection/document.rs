use indexmap::IndexMap;

use crate::common::constants::DOC_ID;
use crate::common::{Path, PathSegment, Value};
use crate::errors::{DocLiteError, ErrorKind, DocLiteResult};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// Represents a document in DocLite database.
///
/// DocLite documents are composed of key-value pairs. The key is always a
/// [String] and value is a [Value]. Documents preserve the insertion order
/// of their keys, but two documents holding the same keys and values are
/// equal regardless of the order the keys were inserted in.
///
/// Keys are opaque: a key such as `"address.city"` names a single top-level
/// entry. Values inside nested documents and arrays are addressed through
/// the [Path] navigation methods [Document::resolve], [Document::put_path]
/// and [Document::remove_path].
///
/// The `_id` field is reserved. It is assigned by the storage layer when a
/// document is first written; the document itself never generates one.
#[derive(Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let empty_doc = Document::new();
    /// assert!(empty_doc.is_empty());
    ///
    /// let mut doc = doc!{ "key": "value" };
    /// assert!(!doc.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// This method inserts a key-value pair into the document. If the key already
    /// exists, its value is updated in place and the key keeps its original
    /// position. The key is taken literally; to write into a nested document or
    /// array, use [Document::put_path].
    ///
    /// # Arguments
    ///
    /// * `key` - The key as a string or string slice. Cannot be empty.
    /// * `value` - The value to associate with the key. Can be any type that implements
    ///   `Into<Value>` (primitives, strings, documents, arrays, etc.).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    ///
    /// # Examples
    ///
    /// Basic insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    ///
    /// Updating existing key:
    /// ```ignore
    /// let mut doc = doc!{ "status": "inactive" };
    /// doc.put("status", "active")?;
    /// assert_eq!(doc.get("status"), Some(&Value::String("active".to_string())));
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> DocLiteResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(DocLiteError::new(
                "Document does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }

        self.data.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Returns the [Value] associated with the given top-level key.
    ///
    /// The key is taken literally; nested values are read through
    /// [Document::resolve]. A missing key yields `None`, which is distinct
    /// from a present `Value::Null`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// assert_eq!(doc.get("name"), Some(&Value::String("Alice".to_string())));
    /// assert_eq!(doc.get("missing"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns the id of this document, if the storage layer has assigned one.
    ///
    /// The document never generates its own id. Until the document has been
    /// written through a collection, this returns `None`.
    pub fn id(&self) -> Option<&Value> {
        self.data.get(DOC_ID)
    }

    /// Checks if this document has an id.
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Removes the key and its value from the document.
    ///
    /// Deletes the key-value pair associated with the given literal key. If the
    /// key does not exist, the operation succeeds and returns `None`. The
    /// insertion order of the remaining keys is preserved.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = doc!{ "name": "Alice", "age": 30 };
    /// doc.remove("age");
    /// assert_eq!(doc.get("age"), None);
    /// assert_eq!(doc.size(), 1);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Returns the number of entries in the document.
    ///
    /// # Returns
    ///
    /// The count of key-value pairs in this document (top-level only, not including nested entries).
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "user": { "name": "Alice" }, "status": "active" };
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Checks if a top level key exists in the document.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to check as a string slice.
    ///
    /// # Returns
    ///
    /// `true` if the key exists at the top level, `false` otherwise.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Resolves a path against this document, producing one slot per fork.
    ///
    /// A path without a wildcard always yields exactly one slot. Each
    /// wildcard segment forks the resolution over every element of the array
    /// it reaches, so a wildcard path yields zero or more slots.
    ///
    /// A slot is `Some` when the path reaches a value, `None` when the path
    /// falls off the document: a name applied to anything but a document, or
    /// an index beyond the end of an array, resolves to a missing slot. A
    /// wildcard applied to anything but an array produces no forks at all.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "items": [ { "price": 10 }, { "price": 20 } ] };
    ///
    /// let path = Path::parse("items[].price")?;
    /// let forks = doc.resolve(&path);
    /// assert_eq!(forks, vec![Some(&val!(10)), Some(&val!(20))]);
    ///
    /// let path = Path::parse("items[5]")?;
    /// assert_eq!(doc.resolve(&path), vec![None]);
    /// ```
    pub fn resolve<'a>(&'a self, path: &Path) -> Vec<Option<&'a Value>> {
        let segments = path.segments();
        if segments.is_empty() {
            return vec![None];
        }

        let mut forks = Vec::new();
        match &segments[0] {
            PathSegment::Name(name) => {
                resolve_value(self.data.get(name), &segments[1..], &mut forks);
            }
            PathSegment::Index(_) => forks.push(None),
            PathSegment::Wildcard => {}
        }
        forks
    }

    /// Resolves a path and returns the first value it reaches, if any.
    ///
    /// Missing slots are skipped, so for a wildcard path this is the first
    /// fork that holds a value.
    pub fn resolve_first(&self, path: &Path) -> Option<Value> {
        self.resolve(path).into_iter().flatten().next().cloned()
    }

    /// Writes a value at the slot addressed by a path.
    ///
    /// Missing intermediate documents are created along the way. Arrays are
    /// navigated but never created or grown: an index segment requires an
    /// existing array and an existing position. An intermediate value of the
    /// wrong shape under a name segment is replaced by a fresh document.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::InvalidWritePath` - the path contains a wildcard
    /// * `ErrorKind::PathNotAddressable` - an index segment does not land on
    ///   an existing array position
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put_path(&Path::parse("address.city")?, val!("Kolkata"))?;
    /// assert_eq!(doc.resolve_first(&Path::parse("address.city")?), Some(val!("Kolkata")));
    ///
    /// let mut doc = doc!{ "items": [1, 2] };
    /// doc.put_path(&Path::parse("items[5]")?, val!(9)).unwrap_err();
    /// ```
    pub fn put_path(&mut self, path: &Path, value: Value) -> DocLiteResult<()> {
        if path.has_wildcard() {
            log::error!("Wildcard path '{}' is not a valid write target", path);
            return Err(DocLiteError::new(
                &format!("Wildcard path '{}' is not a valid write target", path),
                ErrorKind::InvalidWritePath,
            ));
        }
        self.put_segments(path.segments(), value)
    }

    /// Removes the slot addressed by a path.
    ///
    /// If the path does not reach a value, the operation is a silent no-op.
    /// The final segment must name a document field; removing an array
    /// element would shift its neighbors, so an index in the final position
    /// is rejected. A name segment below an index is fine: a field of a
    /// document living inside an array can be removed.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::InvalidWritePath` - the path contains a wildcard, or its
    ///   final segment is an array index
    pub fn remove_path(&mut self, path: &Path) -> DocLiteResult<()> {
        if path.has_wildcard() {
            log::error!("Wildcard path '{}' is not a valid write target", path);
            return Err(DocLiteError::new(
                &format!("Wildcard path '{}' is not a valid write target", path),
                ErrorKind::InvalidWritePath,
            ));
        }
        self.remove_segments(path.segments(), path)
    }

    /// Converts this document to a [BTreeMap].
    ///
    /// Creates a new [BTreeMap] containing all the key-value pairs from this document.
    /// This is useful for interoperability with code expecting a standard map type.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Gets an iterator over the key-value pairs of this document.
    ///
    /// Returns a [DocumentIter] that iterates over all top-level key-value pairs
    /// in the document in insertion order. Each iteration yields a tuple of
    /// (key, value) where both are owned values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// let entries: Vec<_> = doc.iter().collect();
    /// assert_eq!(entries.len(), 2);
    /// ```
    pub fn iter(&self) -> DocumentIter {
        DocumentIter {
            keys: self.data.keys().cloned().collect(),
            data: self.clone(),
            index: 0,
        }
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let estimated_size = self.data.len() * 30 + indent * 2;
        let mut json_string = String::with_capacity(estimated_size);

        json_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            json_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_pretty_json(indent + 2)
            ));
        }

        json_string.pop();
        json_string.pop();
        json_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        json_string
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let mut debug_string = String::new();
        debug_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            debug_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_debug_string(indent + 2)
            ));
        }

        debug_string.pop();
        debug_string.pop();
        debug_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        debug_string
    }

    fn put_segments(&mut self, segments: &[PathSegment], value: Value) -> DocLiteResult<()> {
        let name = match segments.first() {
            Some(PathSegment::Name(name)) => name.clone(),
            _ => {
                log::error!("A document slot requires a name segment");
                return Err(DocLiteError::new(
                    "A document slot requires a name segment",
                    ErrorKind::PathNotAddressable,
                ));
            }
        };

        if segments.len() == 1 {
            self.data.insert(name, value);
            return Ok(());
        }

        let rest = &segments[1..];
        if let Some(slot) = self.data.get_mut(&name) {
            put_value_segments(slot, rest, value)
        } else if matches!(rest[0], PathSegment::Index(_)) {
            // arrays are never created by a write
            log::error!("No array exists at '{}' to index into", name);
            Err(DocLiteError::new(
                &format!("No array exists at '{}' to index into", name),
                ErrorKind::PathNotAddressable,
            ))
        } else {
            let mut nested = Document::new();
            nested.put_segments(rest, value)?;
            self.data.insert(name, Value::Document(nested));
            Ok(())
        }
    }

    fn remove_segments(&mut self, segments: &[PathSegment], path: &Path) -> DocLiteResult<()> {
        let name = match segments.first() {
            Some(PathSegment::Name(name)) => name.clone(),
            _ => return Ok(()),
        };

        if segments.len() == 1 {
            self.data.shift_remove(&name);
            return Ok(());
        }

        match self.data.get_mut(&name) {
            Some(slot) => remove_value_segments(slot, &segments[1..], path),
            None => Ok(()),
        }
    }
}

fn resolve_value<'a>(
    value: Option<&'a Value>,
    segments: &[PathSegment],
    forks: &mut Vec<Option<&'a Value>>,
) {
    if segments.is_empty() {
        forks.push(value);
        return;
    }

    match (&segments[0], value) {
        (PathSegment::Wildcard, Some(Value::Array(arr))) => {
            for item in arr {
                resolve_value(Some(item), &segments[1..], forks);
            }
        }
        // a wildcard over anything but an array forks into nothing
        (PathSegment::Wildcard, _) => {}
        (PathSegment::Name(name), Some(Value::Document(doc))) => {
            resolve_value(doc.data.get(name), &segments[1..], forks);
        }
        (PathSegment::Index(index), Some(Value::Array(arr))) => {
            resolve_value(arr.get(*index), &segments[1..], forks);
        }
        // a name on a non-document, an index on a non-array, or anything
        // below a missing slot stays missing
        _ => forks.push(None),
    }
}

fn put_value_segments(
    slot: &mut Value,
    segments: &[PathSegment],
    value: Value,
) -> DocLiteResult<()> {
    match &segments[0] {
        PathSegment::Name(_) => {
            if let Value::Document(doc) = slot {
                doc.put_segments(segments, value)
            } else {
                // replace a non-document intermediate with a fresh document
                let mut nested = Document::new();
                nested.put_segments(segments, value)?;
                *slot = Value::Document(nested);
                Ok(())
            }
        }
        PathSegment::Index(index) => {
            let arr = match slot {
                Value::Array(arr) => arr,
                _ => {
                    log::error!("Cannot index into a non-array value");
                    return Err(DocLiteError::new(
                        "Cannot index into a non-array value",
                        ErrorKind::PathNotAddressable,
                    ));
                }
            };

            if *index >= arr.len() {
                log::error!("Array index {} is beyond the array end", index);
                return Err(DocLiteError::new(
                    &format!("Array index {} is beyond the array end", index),
                    ErrorKind::PathNotAddressable,
                ));
            }

            if segments.len() == 1 {
                arr[*index] = value;
                Ok(())
            } else {
                put_value_segments(&mut arr[*index], &segments[1..], value)
            }
        }
        PathSegment::Wildcard => {
            log::error!("Wildcard is not a valid write target");
            Err(DocLiteError::new(
                "Wildcard is not a valid write target",
                ErrorKind::InvalidWritePath,
            ))
        }
    }
}

fn remove_value_segments(
    slot: &mut Value,
    segments: &[PathSegment],
    path: &Path,
) -> DocLiteResult<()> {
    match &segments[0] {
        PathSegment::Name(_) => {
            if let Value::Document(doc) = slot {
                doc.remove_segments(segments, path)
            } else {
                Ok(())
            }
        }
        PathSegment::Index(index) => {
            let arr = match slot {
                Value::Array(arr) => arr,
                _ => return Ok(()),
            };

            if segments.len() == 1 {
                // removing an array element would shift its neighbors
                log::error!("Path '{}' ends on an array element and cannot be removed", path);
                return Err(DocLiteError::new(
                    &format!("Path '{}' ends on an array element and cannot be removed", path),
                    ErrorKind::InvalidWritePath,
                ));
            }

            match arr.get_mut(*index) {
                Some(item) => remove_value_segments(item, &segments[1..], path),
                None => Ok(()),
            }
        }
        PathSegment::Wildcard => {
            log::error!("Wildcard is not a valid write target");
            Err(DocLiteError::new(
                "Wildcard is not a valid write target",
                ErrorKind::InvalidWritePath,
            ))
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        if self.data.len() != other.data.len() {
            return false;
        }
        self.data
            .iter()
            .all(|(key, value)| other.data.get(key) == Some(value))
    }
}

impl Eq for Document {}

impl PartialOrd for Document {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Document {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // compare entries in key order so that the ordering agrees with the
        // insertion-order-insensitive equality
        let mut left: Vec<(&String, &Value)> = self.data.iter().collect();
        let mut right: Vec<(&String, &Value)> = other.data.iter().collect();
        left.sort_by_key(|(key, _)| *key);
        right.sort_by_key(|(key, _)| *key);
        left.cmp(&right)
    }
}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut keys: Vec<&String> = self.data.keys().collect();
        keys.sort();
        for key in keys {
            key.hash(state);
            if let Some(value) = self.data.get(key) {
                value.hash(state);
            }
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

pub struct DocumentIter {
    keys: Vec<String>,
    data: Document,
    index: usize,
}

impl Iterator for DocumentIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.keys.len() {
            let key = &self.keys[self.index];
            if let Some(value) = self.data.data.get(key) {
                let result = (key.clone(), value.clone());
                self.index += 1;
                return Some(result);
            }
            self.index += 1;
            self.next()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.keys.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a DocLite Document with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use doclite::doc;
///
/// // Empty document
/// let empty = doc!{};
///
/// // Simple key-value pairs
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// // With expressions
/// let base = 100;
/// let with_expr = doc!{
///     name: "Bob",
///     score: (base * 2),
///     computed: (base + 50)
/// };
///
/// // Nested documents and arrays
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces for backward compat)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document (new syntax)
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (old syntax with outer braces - for backward compat)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs (new syntax without outer braces)
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, val};

    fn path(text: &str) -> Path {
        Path::parse(text).unwrap()
    }

    mod basic_tests {
        use super::*;

        #[test]
        fn test_new_document_is_empty() {
            let doc = Document::new();
            assert!(doc.is_empty());
            assert_eq!(doc.size(), 0);
        }

        #[test]
        fn test_put_and_get() {
            let mut doc = Document::new();
            doc.put("name", "Alice").unwrap();
            doc.put("age", 30).unwrap();

            assert_eq!(doc.get("name"), Some(&val!("Alice")));
            assert_eq!(doc.get("age"), Some(&val!(30)));
            assert_eq!(doc.get("missing"), None);
            assert_eq!(doc.size(), 2);
        }

        #[test]
        fn test_put_empty_key_fails() {
            let mut doc = Document::new();
            let result = doc.put("", "value");
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidFieldName);
        }

        #[test]
        fn test_put_overwrites_keeping_position() {
            let mut doc = Document::new();
            doc.put("a", 1).unwrap();
            doc.put("b", 2).unwrap();
            doc.put("a", 10).unwrap();

            let keys: Vec<String> = doc.iter().map(|(k, _)| k).collect();
            assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(doc.get("a"), Some(&val!(10)));
        }

        #[test]
        fn test_dotted_key_is_literal() {
            let mut doc = Document::new();
            doc.put("address.city", "Kolkata").unwrap();

            assert_eq!(doc.get("address.city"), Some(&val!("Kolkata")));
            assert_eq!(doc.get("address"), None);
            assert_eq!(doc.size(), 1);
        }

        #[test]
        fn test_remove() {
            let mut doc = doc! { "name": "Alice", "age": 30 };
            assert_eq!(doc.remove("age"), Some(val!(30)));
            assert_eq!(doc.remove("age"), None);
            assert_eq!(doc.size(), 1);
        }

        #[test]
        fn test_remove_preserves_order() {
            let mut doc = doc! { "a": 1, "b": 2, "c": 3 };
            doc.remove("b");
            let keys: Vec<String> = doc.iter().map(|(k, _)| k).collect();
            assert_eq!(keys, vec!["a".to_string(), "c".to_string()]);
        }

        #[test]
        fn test_id_is_plain_accessor() {
            let mut doc = doc! { "name": "Alice" };
            assert_eq!(doc.id(), None);
            assert!(!doc.has_id());

            doc.put(DOC_ID, "some-id").unwrap();
            assert_eq!(doc.id(), Some(&val!("some-id")));
            assert!(doc.has_id());
        }

        #[test]
        fn test_contains_key() {
            let doc = doc! { "name": "Alice", "user": { "email": "a@b.c" } };
            assert!(doc.contains_key("name"));
            assert!(doc.contains_key("user"));
            assert!(!doc.contains_key("email"));
        }

        #[test]
        fn test_to_map() {
            let doc = doc! { "name": "Alice", "age": 30 };
            let map = doc.to_map();
            assert_eq!(map.len(), 2);
            assert_eq!(map.get("name"), Some(&val!("Alice")));
        }

        #[test]
        fn test_iter_in_insertion_order() {
            let doc = doc! { "z": 1, "a": 2, "m": 3 };
            let keys: Vec<String> = doc.iter().map(|(k, _)| k).collect();
            assert_eq!(keys, vec!["z".to_string(), "a".to_string(), "m".to_string()]);
        }
    }

    mod equality_tests {
        use super::*;

        #[test]
        fn test_equality_ignores_insertion_order() {
            let d1 = doc! { "a": 1, "b": 2 };
            let d2 = doc! { "b": 2, "a": 1 };
            assert_eq!(d1, d2);
        }

        #[test]
        fn test_inequality_on_values() {
            let d1 = doc! { "a": 1 };
            let d2 = doc! { "a": 2 };
            assert_ne!(d1, d2);
        }

        #[test]
        fn test_inequality_on_extra_key() {
            let d1 = doc! { "a": 1 };
            let d2 = doc! { "a": 1, "b": 2 };
            assert_ne!(d1, d2);
        }

        #[test]
        fn test_nested_equality() {
            let d1 = doc! { "user": { "name": "Alice", "age": 30 } };
            let d2 = doc! { "user": { "age": 30, "name": "Alice" } };
            assert_eq!(d1, d2);
        }

        #[test]
        fn test_ord_agrees_with_eq() {
            let d1 = doc! { "a": 1, "b": 2 };
            let d2 = doc! { "b": 2, "a": 1 };
            assert_eq!(d1.cmp(&d2), std::cmp::Ordering::Equal);
        }

        #[test]
        fn test_hash_agrees_with_eq() {
            use std::collections::hash_map::DefaultHasher;

            fn hash_of(doc: &Document) -> u64 {
                let mut hasher = DefaultHasher::new();
                doc.hash(&mut hasher);
                hasher.finish()
            }

            let d1 = doc! { "a": 1, "b": 2 };
            let d2 = doc! { "b": 2, "a": 1 };
            assert_eq!(hash_of(&d1), hash_of(&d2));
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_resolve_top_level() {
            let doc = doc! { "name": "Alice" };
            assert_eq!(doc.resolve(&path("name")), vec![Some(&val!("Alice"))]);
        }

        #[test]
        fn test_resolve_nested() {
            let doc = doc! { "address": { "city": "Kolkata" } };
            assert_eq!(
                doc.resolve(&path("address.city")),
                vec![Some(&val!("Kolkata"))]
            );
        }

        #[test]
        fn test_resolve_missing_key() {
            let doc = doc! { "name": "Alice" };
            assert_eq!(doc.resolve(&path("age")), vec![None]);
            assert_eq!(doc.resolve(&path("a.b.c")), vec![None]);
        }

        #[test]
        fn test_resolve_name_on_scalar_is_missing() {
            let doc = doc! { "name": "Alice" };
            assert_eq!(doc.resolve(&path("name.length")), vec![None]);
        }

        #[test]
        fn test_resolve_present_null_is_not_missing() {
            let doc = doc! { "value": (Value::Null) };
            assert_eq!(doc.resolve(&path("value")), vec![Some(&Value::Null)]);
        }

        #[test]
        fn test_resolve_array_index() {
            let doc = doc! { "items": [10, 20, 30] };
            assert_eq!(doc.resolve(&path("items[1]")), vec![Some(&val!(20))]);
        }

        #[test]
        fn test_resolve_index_out_of_range_is_missing() {
            let doc = doc! { "items": [10, 20] };
            assert_eq!(doc.resolve(&path("items[5]")), vec![None]);
        }

        #[test]
        fn test_resolve_index_on_non_array_is_missing() {
            let doc = doc! { "items": 42 };
            assert_eq!(doc.resolve(&path("items[0]")), vec![None]);
        }

        #[test]
        fn test_resolve_wildcard_forks_per_element() {
            let doc = doc! { "items": [1, 2, 3] };
            assert_eq!(
                doc.resolve(&path("items[]")),
                vec![Some(&val!(1)), Some(&val!(2)), Some(&val!(3))]
            );
        }

        #[test]
        fn test_resolve_wildcard_on_non_array_forks_into_nothing() {
            let doc = doc! { "items": 42 };
            assert!(doc.resolve(&path("items[]")).is_empty());

            let doc = doc! { "name": "Alice" };
            assert!(doc.resolve(&path("items[]")).is_empty());
        }

        #[test]
        fn test_resolve_wildcard_then_name() {
            let doc = doc! { "orders": [ { "total": 10 }, { "total": 20 }, 7 ] };
            assert_eq!(
                doc.resolve(&path("orders[].total")),
                vec![Some(&val!(10)), Some(&val!(20)), None]
            );
        }

        #[test]
        fn test_resolve_chained_indexes() {
            let doc = doc! { "matrix": [[1, 2], [3, 4]] };
            assert_eq!(doc.resolve(&path("matrix[1][0]")), vec![Some(&val!(3))]);
        }

        #[test]
        fn test_resolve_nested_wildcards() {
            let doc = doc! { "matrix": [[1, 2], [3]] };
            assert_eq!(
                doc.resolve(&path("matrix[][]")),
                vec![Some(&val!(1)), Some(&val!(2)), Some(&val!(3))]
            );
        }

        #[test]
        fn test_resolve_first() {
            let doc = doc! { "orders": [ 7, { "total": 10 }, { "total": 20 } ] };
            assert_eq!(doc.resolve_first(&path("orders[].total")), Some(val!(10)));
            assert_eq!(doc.resolve_first(&path("missing")), None);
        }
    }

    mod put_path_tests {
        use super::*;

        #[test]
        fn test_put_path_top_level() {
            let mut doc = Document::new();
            doc.put_path(&path("name"), val!("Alice")).unwrap();
            assert_eq!(doc.get("name"), Some(&val!("Alice")));
        }

        #[test]
        fn test_put_path_creates_intermediate_documents() {
            let mut doc = Document::new();
            doc.put_path(&path("a.b.c"), val!(1)).unwrap();
            assert_eq!(doc.resolve_first(&path("a.b.c")), Some(val!(1)));
        }

        #[test]
        fn test_put_path_into_existing_nested_document() {
            let mut doc = doc! { "user": { "name": "Alice" } };
            doc.put_path(&path("user.age"), val!(30)).unwrap();
            assert_eq!(doc.resolve_first(&path("user.name")), Some(val!("Alice")));
            assert_eq!(doc.resolve_first(&path("user.age")), Some(val!(30)));
        }

        #[test]
        fn test_put_path_replaces_scalar_intermediate() {
            let mut doc = doc! { "a": 5 };
            doc.put_path(&path("a.b"), val!(1)).unwrap();
            assert_eq!(doc.resolve_first(&path("a.b")), Some(val!(1)));
        }

        #[test]
        fn test_put_path_into_array_position() {
            let mut doc = doc! { "items": [1, 2, 3] };
            doc.put_path(&path("items[1]"), val!(99)).unwrap();
            assert_eq!(
                doc.get("items"),
                Some(&Value::Array(vec![val!(1), val!(99), val!(3)]))
            );
        }

        #[test]
        fn test_put_path_into_document_inside_array() {
            let mut doc = doc! { "items": [ { "price": 10 } ] };
            doc.put_path(&path("items[0].price"), val!(15)).unwrap();
            assert_eq!(doc.resolve_first(&path("items[0].price")), Some(val!(15)));
        }

        #[test]
        fn test_put_path_never_grows_array() {
            let mut doc = doc! { "items": [1, 2] };
            let result = doc.put_path(&path("items[2]"), val!(3));
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::PathNotAddressable);
        }

        #[test]
        fn test_put_path_never_creates_array() {
            let mut doc = Document::new();
            let result = doc.put_path(&path("items[0]"), val!(1));
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::PathNotAddressable);
        }

        #[test]
        fn test_put_path_index_into_non_array_fails() {
            let mut doc = doc! { "items": 42 };
            let result = doc.put_path(&path("items[0]"), val!(1));
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::PathNotAddressable);
        }

        #[test]
        fn test_put_path_wildcard_fails() {
            let mut doc = doc! { "items": [1, 2] };
            let result = doc.put_path(&path("items[]"), val!(0));
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidWritePath);
        }
    }

    mod remove_path_tests {
        use super::*;

        #[test]
        fn test_remove_path_top_level() {
            let mut doc = doc! { "name": "Alice", "age": 30 };
            doc.remove_path(&path("age")).unwrap();
            assert_eq!(doc.get("age"), None);
            assert_eq!(doc.size(), 1);
        }

        #[test]
        fn test_remove_path_nested() {
            let mut doc = doc! { "user": { "name": "Alice", "age": 30 } };
            doc.remove_path(&path("user.age")).unwrap();
            assert_eq!(doc.resolve(&path("user.age")), vec![None]);
            assert_eq!(doc.resolve_first(&path("user.name")), Some(val!("Alice")));
        }

        #[test]
        fn test_remove_path_absent_is_noop() {
            let mut doc = doc! { "name": "Alice" };
            doc.remove_path(&path("missing")).unwrap();
            doc.remove_path(&path("a.b.c")).unwrap();
            doc.remove_path(&path("name.inner")).unwrap();
            assert_eq!(doc.size(), 1);
        }

        #[test]
        fn test_remove_path_array_element_fails() {
            let mut doc = doc! { "items": [1, 2, 3] };
            let result = doc.remove_path(&path("items[0]"));
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidWritePath);
        }

        #[test]
        fn test_remove_path_field_inside_array_element() {
            let mut doc = doc! { "items": [ { "price": 10, "qty": 2 } ] };
            doc.remove_path(&path("items[0].price")).unwrap();
            assert_eq!(doc.resolve(&path("items[0].price")), vec![None]);
            assert_eq!(doc.resolve_first(&path("items[0].qty")), Some(val!(2)));
        }

        #[test]
        fn test_remove_path_index_out_of_range_is_noop() {
            let mut doc = doc! { "items": [ { "price": 10 } ] };
            doc.remove_path(&path("items[5].price")).unwrap();
            assert_eq!(doc.resolve_first(&path("items[0].price")), Some(val!(10)));
        }

        #[test]
        fn test_remove_path_wildcard_fails() {
            let mut doc = doc! { "items": [1, 2] };
            let result = doc.remove_path(&path("items[]"));
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidWritePath);
        }
    }

    mod macro_tests {
        use super::*;

        #[test]
        fn test_empty_doc_macro() {
            let doc = doc! {};
            assert!(doc.is_empty());
        }

        #[test]
        fn test_doc_macro_with_values() {
            let doc = doc! { "name": "Alice", "age": 30, "active": true };
            assert_eq!(doc.get("name"), Some(&val!("Alice")));
            assert_eq!(doc.get("age"), Some(&val!(30)));
            assert_eq!(doc.get("active"), Some(&val!(true)));
        }

        #[test]
        fn test_doc_macro_nested() {
            let doc = doc! {
                "user": {
                    "name": "Charlie",
                    "tags": ["admin", "user"]
                },
                "values": [1, 2, 3]
            };

            assert_eq!(
                doc.resolve_first(&path("user.name")),
                Some(val!("Charlie"))
            );
            assert_eq!(doc.resolve_first(&path("user.tags[0]")), Some(val!("admin")));
            assert_eq!(doc.resolve_first(&path("values[2]")), Some(val!(3)));
        }

        #[test]
        fn test_doc_macro_with_expression() {
            let base = 100;
            let doc = doc! { "score": (base * 2) };
            assert_eq!(doc.get("score"), Some(&val!(200)));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_empty() {
            let doc = Document::new();
            assert_eq!(format!("{}", doc), "{}");
        }

        #[test]
        fn test_display_contains_entries() {
            let doc = doc! { "name": "Alice" };
            let text = format!("{}", doc);
            assert!(text.contains("\"name\""));
            assert!(text.contains("\"Alice\""));
        }

        #[test]
        fn test_debug_contains_types() {
            let doc = doc! { "age": 30 };
            let text = format!("{:?}", doc);
            assert!(text.contains("i32(30)"));
        }
    }
}
