use std::{any::Any, fmt::Display};

use crate::{
    collection::Document,
    common::constants::DOC_ID,
    common::Path,
    errors::DocLiteResult,
    Value,
};

use super::{Filter, FilterProvider};

/// Checks a resolved path against a literal value.
///
/// The pair matches when any fork of the resolution structurally equals the
/// literal. Two softer rules apply on top of plain equality:
///
/// - a wildcard-free path that resolves to a missing slot matches a `Null`
///   literal (absence and explicit null are equivalent for equality),
/// - a fork holding an Array matches a non-Array literal when any element
///   equals it (array containment).
///
/// A literal Document or Array is otherwise whole-value equality.
pub(crate) fn matches_equality(entry: &Document, path: &Path, literal: &Value) -> bool {
    for fork in entry.resolve(path) {
        match fork {
            Some(value) => {
                if value == literal {
                    return true;
                }
                if let Value::Array(items) = value {
                    if !literal.is_array() && items.iter().any(|item| item == literal) {
                        return true;
                    }
                }
            }
            None => {
                if literal.is_null() && !path.has_wildcard() {
                    return true;
                }
            }
        }
    }
    false
}

/// A filter that matches all documents.
///
/// This filter accepts every document in the collection without applying any
/// conditions. It is the compiled form of the empty query document and the
/// default filter when no condition is specified.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> DocLiteResult<bool> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// A filter that matches a document by its `_id` field.
///
/// Collections treat this filter specially: a find with an id filter is a
/// single map lookup rather than a scan. It contributes its id to an upsert
/// seed like any other equality.
pub(crate) struct IdFilter {
    id: Value,
}

impl IdFilter {
    /// Creates a new id filter for the specified id value.
    #[inline]
    pub(crate) fn new(id: Value) -> Self {
        IdFilter { id }
    }

    /// Returns the id value this filter matches.
    pub(crate) fn id(&self) -> &Value {
        &self.id
    }
}

impl Display for IdFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", DOC_ID, self.id)
    }
}

impl FilterProvider for IdFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(entry.get(DOC_ID) == Some(&self.id))
    }

    fn seed_into(&self, seed: &mut Document) -> DocLiteResult<bool> {
        seed.put(DOC_ID, self.id.clone())?;
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that matches documents where a path resolves to a specific value.
///
/// The path may contain wildcards, in which case the filter matches when any
/// fork of the resolution equals the value. See [matches_equality] for the
/// exact rules.
pub(crate) struct EqualsFilter {
    path: Path,
    value: Value,
}

impl EqualsFilter {
    /// Creates a new equality filter for the specified path and value.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to resolve against each document
    /// * `value` - The value to match against
    #[inline]
    pub(crate) fn new(path: Path, value: Value) -> Self {
        EqualsFilter { path, value }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.path, self.value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(matches_equality(entry, &self.path, &self.value))
    }

    fn seed_into(&self, seed: &mut Document) -> DocLiteResult<bool> {
        // a wildcard path cannot address a slot in the seed
        if self.path.has_wildcard() {
            return Ok(false);
        }
        seed.put_path(&self.path, self.value.clone())?;
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that matches documents where a path does not resolve to a value.
///
/// The exact negation of [EqualsFilter] for the same pair: it matches
/// whenever the equality rule fails, including when the path is missing and
/// the value is not null.
pub(crate) struct NotEqualsFilter {
    path: Path,
    value: Value,
}

impl NotEqualsFilter {
    /// Creates a new inequality filter for the specified path and value.
    #[inline]
    pub(crate) fn new(path: Path, value: Value) -> Self {
        NotEqualsFilter { path, value }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.path, self.value)
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(!matches_equality(entry, &self.path, &self.value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that matches documents where a path resolves to any listed value.
///
/// Each candidate value is checked with the equality rules of
/// [matches_equality], so a missing slot matches a candidate `Null` and an
/// array slot matches on containment.
pub(crate) struct InFilter {
    path: Path,
    values: Vec<Value>,
}

impl InFilter {
    /// Creates a new membership filter for the specified path and candidates.
    #[inline]
    pub(crate) fn new(path: Path, values: Vec<Value>) -> Self {
        InFilter { path, values }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in {})", self.path, Value::Array(self.values.clone()))
    }
}

impl FilterProvider for InFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(self
            .values
            .iter()
            .any(|value| matches_equality(entry, &self.path, value)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that matches documents where a path resolves to none of the
/// listed values.
///
/// The exact negation of [InFilter] for the same pair.
pub(crate) struct NotInFilter {
    path: Path,
    values: Vec<Value>,
}

impl NotInFilter {
    /// Creates a new exclusion filter for the specified path and candidates.
    #[inline]
    pub(crate) fn new(path: Path, values: Vec<Value>) -> Self {
        NotInFilter { path, values }
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} not in {})", self.path, Value::Array(self.values.clone()))
    }
}

impl FilterProvider for NotInFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(!self
            .values
            .iter()
            .any(|value| matches_equality(entry, &self.path, value)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that matches documents by the presence of a path.
///
/// A path is present when any fork of its resolution holds a value; an
/// explicit `Null` counts as present. With `exists` set to false the filter
/// matches documents where the path resolves to nothing.
pub(crate) struct ExistsFilter {
    path: Path,
    exists: bool,
}

impl ExistsFilter {
    /// Creates a new existence filter for the specified path.
    #[inline]
    pub(crate) fn new(path: Path, exists: bool) -> Self {
        ExistsFilter { path, exists }
    }
}

impl Display for ExistsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} exists == {})", self.path, self.exists)
    }
}

impl FilterProvider for ExistsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        let present = entry.resolve(&self.path).iter().any(|fork| fork.is_some());
        Ok(present == self.exists)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[allow(dead_code)]
pub(crate) fn is_not_equals_filter(filter: &Filter) -> bool {
    filter.as_any().is::<NotEqualsFilter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, val};

    fn path(text: &str) -> Path {
        Path::parse(text).unwrap()
    }

    mod equals_tests {
        use super::*;

        #[test]
        fn test_equals_top_level() {
            let filter = EqualsFilter::new(path("name"), val!("Alice"));
            assert!(filter.apply(&doc! { "name": "Alice" }).unwrap());
            assert!(!filter.apply(&doc! { "name": "Bob" }).unwrap());
        }

        #[test]
        fn test_equals_nested_path() {
            let filter = EqualsFilter::new(path("address.city"), val!("Kolkata"));
            assert!(filter
                .apply(&doc! { "address": { "city": "Kolkata" } })
                .unwrap());
            assert!(!filter.apply(&doc! { "address": { "city": "Delhi" } }).unwrap());
        }

        #[test]
        fn test_missing_matches_null() {
            let filter = EqualsFilter::new(path("b"), Value::Null);
            assert!(filter.apply(&doc! { "a": 1 }).unwrap());
            assert!(!filter.apply(&doc! { "a": 1, "b": 1 }).unwrap());
        }

        #[test]
        fn test_present_null_matches_null() {
            let filter = EqualsFilter::new(path("b"), Value::Null);
            assert!(filter.apply(&doc! { "b": (Value::Null) }).unwrap());
        }

        #[test]
        fn test_missing_does_not_match_literal() {
            let filter = EqualsFilter::new(path("b"), val!(1));
            assert!(!filter.apply(&doc! { "a": 1 }).unwrap());
        }

        #[test]
        fn test_wildcard_any_element() {
            let filter = EqualsFilter::new(path("x[]"), val!(2));
            assert!(filter.apply(&doc! { "x": [1, 2, 3] }).unwrap());
            assert!(!filter.apply(&doc! { "x": [4, 5] }).unwrap());
        }

        #[test]
        fn test_wildcard_missing_never_matches_null() {
            let filter = EqualsFilter::new(path("x[]"), Value::Null);
            assert!(!filter.apply(&doc! { "a": 1 }).unwrap());
            assert!(!filter.apply(&doc! { "x": 7 }).unwrap());
        }

        #[test]
        fn test_array_containment() {
            let filter = EqualsFilter::new(path("tags"), val!("admin"));
            assert!(filter.apply(&doc! { "tags": ["admin", "user"] }).unwrap());
            assert!(!filter.apply(&doc! { "tags": ["user"] }).unwrap());
        }

        #[test]
        fn test_array_literal_is_whole_value() {
            let filter = EqualsFilter::new(path("a[2]"), Value::Array(vec![val!(3), val!(4)]));
            assert!(filter
                .apply(&doc! { "a": [[], 1, [3, 4]] })
                .unwrap());

            let reversed = EqualsFilter::new(path("a[2]"), Value::Array(vec![val!(4), val!(3)]));
            assert!(!reversed.apply(&doc! { "a": [[], 1, [3, 4]] }).unwrap());
        }

        #[test]
        fn test_chained_index_equality() {
            let doc = doc! { "a": [[], 1, [3, 4]] };
            assert!(EqualsFilter::new(path("a[2][1]"), val!(4)).apply(&doc).unwrap());
            assert!(!EqualsFilter::new(path("a[2][1]"), val!(3)).apply(&doc).unwrap());
        }

        #[test]
        fn test_document_literal_whole_value() {
            let filter = EqualsFilter::new(
                path("user"),
                Value::Document(doc! { "name": "Alice", "age": 30 }),
            );
            assert!(filter
                .apply(&doc! { "user": { "age": 30, "name": "Alice" } })
                .unwrap());
            // no subset matching
            assert!(!filter
                .apply(&doc! { "user": { "name": "Alice", "age": 30, "extra": 1 } })
                .unwrap());
        }

        #[test]
        fn test_numeric_equality_across_representations() {
            let filter = EqualsFilter::new(path("n"), val!(1.0));
            assert!(filter.apply(&doc! { "n": 1 }).unwrap());
        }

        #[test]
        fn test_seed_into() {
            let filter = EqualsFilter::new(path("a.b"), val!(1));
            let mut seed = Document::new();
            assert!(filter.seed_into(&mut seed).unwrap());
            assert_eq!(seed.resolve_first(&path("a.b")), Some(val!(1)));
        }

        #[test]
        fn test_seed_into_skips_wildcard_path() {
            let filter = EqualsFilter::new(path("a[]"), val!(1));
            let mut seed = Document::new();
            assert!(!filter.seed_into(&mut seed).unwrap());
            assert!(seed.is_empty());
        }
    }

    mod id_tests {
        use super::*;

        #[test]
        fn test_id_filter() {
            let filter = IdFilter::new(val!("id-1"));
            assert!(filter.apply(&doc! { "_id": "id-1" }).unwrap());
            assert!(!filter.apply(&doc! { "_id": "id-2" }).unwrap());
            assert!(!filter.apply(&doc! { "name": "Alice" }).unwrap());
        }

        #[test]
        fn test_id_filter_seed_into() {
            let filter = IdFilter::new(val!("id-1"));
            let mut seed = Document::new();
            assert!(filter.seed_into(&mut seed).unwrap());
            assert_eq!(seed.get(DOC_ID), Some(&val!("id-1")));
        }
    }

    mod not_equals_tests {
        use super::*;

        #[test]
        fn test_not_equals() {
            let filter = NotEqualsFilter::new(path("name"), val!("Alice"));
            assert!(!filter.apply(&doc! { "name": "Alice" }).unwrap());
            assert!(filter.apply(&doc! { "name": "Bob" }).unwrap());
        }

        #[test]
        fn test_not_equals_missing_field() {
            // missing is equivalent to null, so != null fails on absence
            let filter = NotEqualsFilter::new(path("b"), Value::Null);
            assert!(!filter.apply(&doc! { "a": 1 }).unwrap());

            let filter = NotEqualsFilter::new(path("b"), val!(1));
            assert!(filter.apply(&doc! { "a": 1 }).unwrap());
        }
    }

    mod in_tests {
        use super::*;

        #[test]
        fn test_in_filter() {
            let filter = InFilter::new(path("n"), vec![val!(1), val!(2)]);
            assert!(filter.apply(&doc! { "n": 2 }).unwrap());
            assert!(!filter.apply(&doc! { "n": 3 }).unwrap());
        }

        #[test]
        fn test_in_filter_missing_needs_null_candidate() {
            let with_null = InFilter::new(path("n"), vec![val!(1), Value::Null]);
            assert!(with_null.apply(&doc! { "a": 1 }).unwrap());

            let without_null = InFilter::new(path("n"), vec![val!(1)]);
            assert!(!without_null.apply(&doc! { "a": 1 }).unwrap());
        }

        #[test]
        fn test_not_in_filter() {
            let filter = NotInFilter::new(path("n"), vec![val!(1), val!(2)]);
            assert!(!filter.apply(&doc! { "n": 1 }).unwrap());
            assert!(filter.apply(&doc! { "n": 3 }).unwrap());
        }
    }

    mod exists_tests {
        use super::*;

        #[test]
        fn test_exists_true() {
            let filter = ExistsFilter::new(path("name"), true);
            assert!(filter.apply(&doc! { "name": "Alice" }).unwrap());
            assert!(!filter.apply(&doc! { "other": 1 }).unwrap());
        }

        #[test]
        fn test_exists_false() {
            let filter = ExistsFilter::new(path("name"), false);
            assert!(!filter.apply(&doc! { "name": "Alice" }).unwrap());
            assert!(filter.apply(&doc! { "other": 1 }).unwrap());
        }

        #[test]
        fn test_explicit_null_counts_as_present() {
            let filter = ExistsFilter::new(path("name"), true);
            assert!(filter.apply(&doc! { "name": (Value::Null) }).unwrap());
        }

        #[test]
        fn test_exists_wildcard_element() {
            let filter = ExistsFilter::new(path("items[].price"), true);
            assert!(filter
                .apply(&doc! { "items": [{ "price": 1 }, 7] })
                .unwrap());
            assert!(!filter.apply(&doc! { "items": [7] }).unwrap());
        }
    }
}
