use crate::collection::Document;
use crate::common::Path;
use crate::errors::{DocLiteError, ErrorKind, DocLiteResult};
use crate::Value;

use super::range_filters::{ComparisonFilter, ComparisonMode};
use super::{
    all, AndFilter, EqualsFilter, ExistsFilter, Filter, InFilter, NotEqualsFilter, NotInFilter,
    OrFilter,
};

const OR_TOKEN: &str = "$or";
const AND_TOKEN: &str = "$and";

/// Compiles a query document into a [Filter].
///
/// A query document maps path strings to conditions. A condition is either a
/// literal value (equality), an operator document such as `{"$gt": 30}`, or,
/// at the top level only, `$or`/`$and` over an array of sub-queries:
///
/// ```rust,ignore
/// use doclite::{doc, filter};
///
/// let filter = filter::query(&doc! {
///     "address.city": "Kolkata",
///     "age": { "$gt": 30 },
///     "tags[]": "admin"
/// })?;
/// ```
///
/// All pairs of a query document must hold for a document to match; the
/// empty query matches everything.
///
/// # Errors
///
/// * `ErrorKind::MalformedPath` - a key is not a valid path
/// * `ErrorKind::ValidationError` - an unknown `$` operator, a non-array
///   `$or`/`$and`/`$in`/`$nin` operand, or a non-boolean `$exists` operand
pub fn query(query: &Document) -> DocLiteResult<Filter> {
    let mut filters = Vec::with_capacity(query.size());
    for (key, condition) in query.iter() {
        if key == OR_TOKEN || key == AND_TOKEN {
            filters.push(compile_logical(&key, &condition)?);
        } else if key.starts_with('$') {
            log::error!("Unknown top-level operator '{}' in query", key);
            return Err(DocLiteError::new(
                &format!("Unknown top-level operator '{}' in query", key),
                ErrorKind::ValidationError,
            ));
        } else {
            let path = Path::parse(&key)?;
            compile_condition(path, condition, &mut filters)?;
        }
    }

    Ok(match filters.len() {
        0 => all(),
        1 => filters.remove(0),
        _ => Filter::new(AndFilter::new(filters)),
    })
}

fn compile_logical(token: &str, operand: &Value) -> DocLiteResult<Filter> {
    let sub_queries = match operand {
        Value::Array(sub_queries) => sub_queries,
        _ => {
            log::error!("Operand of '{}' must be an array of queries", token);
            return Err(DocLiteError::new(
                &format!("Operand of '{}' must be an array of queries", token),
                ErrorKind::ValidationError,
            ));
        }
    };

    let mut compiled = Vec::with_capacity(sub_queries.len());
    for sub_query in sub_queries {
        match sub_query {
            Value::Document(sub_query) => compiled.push(query(sub_query)?),
            _ => {
                log::error!("Operand of '{}' must contain only query documents", token);
                return Err(DocLiteError::new(
                    &format!("Operand of '{}' must contain only query documents", token),
                    ErrorKind::ValidationError,
                ));
            }
        }
    }

    Ok(if token == OR_TOKEN {
        Filter::new(OrFilter::new(compiled))
    } else {
        Filter::new(AndFilter::new(compiled))
    })
}

fn compile_condition(
    path: Path,
    condition: Value,
    filters: &mut Vec<Filter>,
) -> DocLiteResult<()> {
    // a document operand is an operator document only when its keys are
    // operator tokens; otherwise it is a whole-value equality literal
    let operators = match &condition {
        Value::Document(operand) if is_operator_document(operand) => operand.clone(),
        _ => {
            filters.push(Filter::new(EqualsFilter::new(path, condition)));
            return Ok(());
        }
    };

    for (operator, operand) in operators.iter() {
        let filter = match operator.as_str() {
            "$gt" => Filter::new(ComparisonFilter::new(
                path.clone(),
                operand,
                ComparisonMode::Greater,
            )),
            "$gte" => Filter::new(ComparisonFilter::new(
                path.clone(),
                operand,
                ComparisonMode::GreaterEqual,
            )),
            "$lt" => Filter::new(ComparisonFilter::new(
                path.clone(),
                operand,
                ComparisonMode::Lesser,
            )),
            "$lte" => Filter::new(ComparisonFilter::new(
                path.clone(),
                operand,
                ComparisonMode::LesserEqual,
            )),
            "$ne" => Filter::new(NotEqualsFilter::new(path.clone(), operand)),
            "$in" => Filter::new(InFilter::new(path.clone(), candidates(&operator, operand)?)),
            "$nin" => Filter::new(NotInFilter::new(
                path.clone(),
                candidates(&operator, operand)?,
            )),
            "$exists" => match operand {
                Value::Bool(exists) => Filter::new(ExistsFilter::new(path.clone(), exists)),
                _ => {
                    log::error!("Operand of '$exists' must be a boolean");
                    return Err(DocLiteError::new(
                        "Operand of '$exists' must be a boolean",
                        ErrorKind::ValidationError,
                    ));
                }
            },
            _ => {
                log::error!("Unknown operator '{}' for path '{}'", operator, path);
                return Err(DocLiteError::new(
                    &format!("Unknown operator '{}' for path '{}'", operator, path),
                    ErrorKind::ValidationError,
                ));
            }
        };
        filters.push(filter);
    }
    Ok(())
}

fn is_operator_document(operand: &Document) -> bool {
    !operand.is_empty() && operand.iter().all(|(key, _)| key.starts_with('$'))
}

fn candidates(operator: &str, operand: Value) -> DocLiteResult<Vec<Value>> {
    match operand {
        Value::Array(values) => Ok(values),
        _ => {
            log::error!("Operand of '{}' must be an array", operator);
            Err(DocLiteError::new(
                &format!("Operand of '{}' must be an array", operator),
                ErrorKind::ValidationError,
            ))
        }
    }
}
