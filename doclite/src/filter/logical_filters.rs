use std::{any::Any, fmt::Display};

use crate::{collection::Document, errors::DocLiteResult};

use super::{Filter, FilterProvider};

/// A filter that combines multiple filters with logical AND.
///
/// Matches documents satisfying every child filter. Evaluation
/// short-circuits on the first child that does not match. An upsert seed
/// folds over the children, so every literal equality below the AND
/// contributes its field.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    /// Creates a new AND filter over the given children.
    #[inline]
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (position, filter) in self.filters.iter().enumerate() {
            if position > 0 {
                write!(f, " && ")?;
            }
            write!(f, "{}", filter)?;
        }
        write!(f, ")")
    }
}

impl FilterProvider for AndFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn seed_into(&self, seed: &mut Document) -> DocLiteResult<bool> {
        let mut contributed = false;
        for filter in &self.filters {
            contributed |= filter.seed_into(seed)?;
        }
        Ok(contributed)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that combines multiple filters with logical OR.
///
/// Matches documents satisfying at least one child filter. Evaluation
/// short-circuits on the first child that matches. An OR asserts no literal
/// field value, so it never contributes to an upsert seed.
pub(crate) struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    /// Creates a new OR filter over the given children.
    #[inline]
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (position, filter) in self.filters.iter().enumerate() {
            if position > 0 {
                write!(f, " || ")?;
            }
            write!(f, "{}", filter)?;
        }
        write!(f, ")")
    }
}

impl FilterProvider for OrFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that negates another filter.
pub(crate) struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    /// Creates a new NOT filter around the given child.
    #[inline]
    pub(crate) fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!({})", self.filter)
    }
}

impl FilterProvider for NotFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(!self.filter.apply(entry)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
