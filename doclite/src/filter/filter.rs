use crate::collection::Document;
use crate::errors::DocLiteResult;
use crate::Value;
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::AndFilter;
use super::EqualsFilter;
use super::IdFilter;
use super::NotFilter;
use super::OrFilter;

/// Trait for implementing filters.
///
/// A `FilterProvider` defines how to evaluate a filter condition against a
/// document. Implementations can also contribute literal field values to an
/// upsert seed document.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Arguments
    ///
    /// * `entry` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the document matches the filter, `Ok(false)` otherwise
    fn apply(&self, entry: &Document) -> DocLiteResult<bool>;

    /// Writes the literal field values this filter asserts into an upsert
    /// seed document.
    ///
    /// Equality filters on wildcard-free paths contribute their literal;
    /// logical AND folds its children; every other filter contributes
    /// nothing. The return value reports whether anything was written.
    ///
    /// # Arguments
    ///
    /// * `seed` - The document being synthesized for an upsert
    ///
    /// # Returns
    ///
    /// `Ok(true)` if this filter wrote at least one field into the seed
    fn seed_into(&self, seed: &mut Document) -> DocLiteResult<bool> {
        let _ = seed;
        Ok(false)
    }

    fn as_any(&self) -> &dyn Any;
}

/// A query filter for selecting documents from a collection.
///
/// `Filter` encapsulates filter logic through a provider pattern that supports
/// custom filtering implementations. Filters are used with collection `find()` and
/// similar methods to query documents with various conditions.
///
/// Filters are usually compiled from a query document with [super::query],
/// but can also be built directly from the free constructors in this module
/// and composed with the logical combinators.
///
/// # Filter Composition
///
/// Filters can be composed using logical operators:
/// - `and(other)` - Combines with another filter using logical AND
/// - `or(other)` - Combines with another filter using logical OR
/// - `not()` - Negates the filter using logical NOT
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    ///
    /// # Arguments
    ///
    /// * `inner` - A type implementing `FilterProvider`
    ///
    /// # Returns
    ///
    /// A new `Filter` instance wrapping the provider
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter { inner: Arc::new(inner) }
    }

    /// Combines this filter with another using logical AND.
    ///
    /// # Arguments
    ///
    /// * `filter` - The other filter to combine
    ///
    /// # Returns
    ///
    /// A new `Filter` representing `self AND filter`
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Combines this filter with another using logical OR.
    ///
    /// # Arguments
    ///
    /// * `filter` - The other filter to combine
    ///
    /// # Returns
    ///
    /// A new `Filter` representing `self OR filter`
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }

    /// Negates this filter using logical NOT.
    ///
    /// # Returns
    ///
    /// A new `Filter` representing `NOT self`
    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter({})", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
///
/// This filter accepts every document in the collection without applying
/// any filtering conditions.
///
/// # Returns
///
/// A `Filter` that matches all documents
pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

/// Creates a filter that matches a document by its id.
///
/// Matches the document whose `_id` field equals the specified value.
///
/// # Arguments
///
/// * `id` - The id value to match
///
/// # Returns
///
/// A `Filter` that matches the document with the specified id
pub fn by_id(id: Value) -> Filter {
    Filter::new(IdFilter::new(id))
}

/// Combines multiple filters using logical AND.
///
/// Creates a filter that matches documents satisfying all of the provided filters.
///
/// # Arguments
///
/// * `filters` - A vector of filters to combine
///
/// # Returns
///
/// A `Filter` representing the AND of all filters
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Combines multiple filters using logical OR.
///
/// Creates a filter that matches documents satisfying at least one of the provided filters.
///
/// # Arguments
///
/// * `filters` - A vector of filters to combine
///
/// # Returns
///
/// A `Filter` representing the OR of all filters
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Negates a filter using logical NOT.
///
/// Creates a filter that matches documents not matching the provided filter.
///
/// # Arguments
///
/// * `filter` - The filter to negate
///
/// # Returns
///
/// A `Filter` representing `NOT filter`
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

pub(crate) fn is_id_filter(filter: &Filter) -> bool {
    filter.as_any().is::<IdFilter>()
}

pub(crate) fn is_equals_filter(filter: &Filter) -> bool {
    filter.as_any().is::<EqualsFilter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Document;
    use crate::errors::DocLiteResult;
    use crate::filter::query;
    use crate::{doc, val};
    use std::fmt::Formatter;

    struct MockFilter;

    impl Display for MockFilter {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "MockFilter")
        }
    }

    impl FilterProvider for MockFilter {
        fn apply(&self, _entry: &Document) -> DocLiteResult<bool> {
            Ok(true)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn test_filter_apply() {
        let filter = Filter::new(MockFilter);
        let doc = Document::new();
        assert!(filter.apply(&doc).unwrap());
    }

    #[test]
    fn test_filter_debug_wraps_display() {
        let filter = Filter::new(MockFilter);
        assert_eq!(format!("{:?}", filter), "Filter(MockFilter)");
    }

    #[test]
    fn test_filter_seed_into_default() {
        let filter = Filter::new(MockFilter);
        let mut seed = Document::new();
        assert!(!filter.seed_into(&mut seed).unwrap());
        assert!(seed.is_empty());
    }

    #[test]
    fn test_all_filter() {
        let filter = all();
        let doc = doc! { "a": 1 };
        assert!(filter.apply(&doc).unwrap());
        assert!(filter.apply(&Document::new()).unwrap());
    }

    #[test]
    fn test_by_id_filter() {
        let filter = by_id(val!("some-id"));
        let matching = doc! { "_id": "some-id", "name": "Alice" };
        let other = doc! { "_id": "other-id" };
        assert!(filter.apply(&matching).unwrap());
        assert!(!filter.apply(&other).unwrap());
    }

    #[test]
    fn test_and_combinator() {
        let filter = query(&doc! { "a": 1 })
            .unwrap()
            .and(query(&doc! { "b": 2 }).unwrap());
        assert!(filter.apply(&doc! { "a": 1, "b": 2 }).unwrap());
        assert!(!filter.apply(&doc! { "a": 1, "b": 3 }).unwrap());
    }

    #[test]
    fn test_or_combinator() {
        let filter = query(&doc! { "a": 1 })
            .unwrap()
            .or(query(&doc! { "b": 2 }).unwrap());
        assert!(filter.apply(&doc! { "a": 1 }).unwrap());
        assert!(filter.apply(&doc! { "b": 2 }).unwrap());
        assert!(!filter.apply(&doc! { "c": 3 }).unwrap());
    }

    #[test]
    fn test_not_combinator() {
        let filter = query(&doc! { "a": 1 }).unwrap().not();
        assert!(!filter.apply(&doc! { "a": 1 }).unwrap());
        assert!(filter.apply(&doc! { "a": 2 }).unwrap());
    }

    #[test]
    fn test_is_all_filter() {
        assert!(is_all_filter(&all()));
        assert!(!is_all_filter(&by_id(val!(1))));
    }

    #[test]
    fn test_is_id_filter() {
        assert!(is_id_filter(&by_id(val!(1))));
        assert!(!is_id_filter(&all()));
    }

    #[test]
    fn test_display() {
        let filter = all();
        assert_eq!(format!("{}", filter), "AllFilter");
    }
}
