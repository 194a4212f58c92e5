use std::{any::Any, fmt::Display};

use crate::{collection::Document, common::Path, errors::DocLiteResult, Value};

use super::FilterProvider;

/// Comparison modes for ordered field comparisons.
///
/// This enum specifies the ordering operator applied when filtering by a
/// comparable field value:
/// - `Greater` from the `$gt` operator
/// - `GreaterEqual` from the `$gte` operator
/// - `Lesser` from the `$lt` operator
/// - `LesserEqual` from the `$lte` operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    #[inline]
    fn accepts(&self, ordering: std::cmp::Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering.is_gt(),
            ComparisonMode::GreaterEqual => ordering.is_ge(),
            ComparisonMode::Lesser => ordering.is_lt(),
            ComparisonMode::LesserEqual => ordering.is_le(),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        }
    }
}

/// Orders two values of the same broad class.
///
/// Numbers order by numeric value across representations, strings and
/// timestamps by their natural order. Everything else, and any cross-class
/// pair, is incomparable for query purposes: nulls, booleans, documents and
/// arrays never satisfy an ordering operator.
fn ordered(value: &Value, operand: &Value) -> Option<std::cmp::Ordering> {
    let comparable = (value.is_number() && operand.is_number())
        || (value.is_string() && operand.is_string())
        || (value.is_date_time() && operand.is_date_time());
    if !comparable {
        return None;
    }
    value.compare_to(operand)
}

/// A filter that matches documents where a path satisfies an ordering
/// against an operand.
///
/// The filter matches when any fork of the path resolution is comparable
/// with the operand (numeric with numeric, string with string, timestamp
/// with timestamp) and satisfies the comparison. Missing and incomparable
/// forks never satisfy. When a fork holds an array and the operand is a
/// scalar, each element is tried in turn.
pub(crate) struct ComparisonFilter {
    path: Path,
    operand: Value,
    comparison_mode: ComparisonMode,
}

impl ComparisonFilter {
    /// Creates a new comparison filter.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to resolve against each document
    /// * `operand` - The comparison operand
    /// * `comparison_mode` - The ordering operator (>, >=, <, or <=)
    #[inline]
    pub(crate) fn new(path: Path, operand: Value, comparison_mode: ComparisonMode) -> Self {
        ComparisonFilter {
            path,
            operand,
            comparison_mode,
        }
    }

    #[inline]
    fn satisfied_by(&self, value: &Value) -> bool {
        if let Some(ordering) = ordered(value, &self.operand) {
            return self.comparison_mode.accepts(ordering);
        }
        // an array slot compared with a scalar tries each element
        if let Value::Array(items) = value {
            if !self.operand.is_array() {
                return items.iter().any(|item| {
                    ordered(item, &self.operand)
                        .is_some_and(|ordering| self.comparison_mode.accepts(ordering))
                });
            }
        }
        false
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.path,
            self.comparison_mode.symbol(),
            self.operand
        )
    }
}

impl FilterProvider for ComparisonFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocLiteResult<bool> {
        Ok(entry
            .resolve(&self.path)
            .into_iter()
            .flatten()
            .any(|value| self.satisfied_by(value)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
