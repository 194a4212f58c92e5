use crate::collection::Document;
use crate::common::constants::{INC_OPERATOR, PUSH_OPERATOR, SET_OPERATOR, UNSET_OPERATOR};
use crate::common::Path;
use crate::errors::{DocLiteError, ErrorKind, DocLiteResult};
use crate::Value;

/// The mutation operators of an update document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOperator {
    /// `$set` - replace the slot with the operand
    Set,
    /// `$inc` - add the operand to a numeric slot, seeding an absent slot
    Inc,
    /// `$unset` - remove the slot from its parent document
    Unset,
    /// `$push` - append the operand to an array slot, creating it if absent
    Push,
}

impl UpdateOperator {
    fn token(&self) -> &'static str {
        match self {
            UpdateOperator::Set => SET_OPERATOR,
            UpdateOperator::Inc => INC_OPERATOR,
            UpdateOperator::Unset => UNSET_OPERATOR,
            UpdateOperator::Push => PUSH_OPERATOR,
        }
    }
}

/// A parsed update document.
///
/// An update document maps operator keys (`$set`, `$inc`, `$unset`, `$push`)
/// to sub-documents of path → operand pairs:
///
/// ```rust,ignore
/// use doclite::collection::UpdateCommand;
/// use doclite::doc;
///
/// let command = UpdateCommand::parse(&doc! {
///     "$inc": { "comments[0].rate_up": 1 },
///     "$push": { "comments[0].rate_ups": 99 }
/// })?;
/// let updated = command.apply(&stored)?;
/// ```
///
/// Parsing validates every key once, so a command can be applied to many
/// documents without re-validation. `apply` is pure: it clones its input and
/// returns the updated document, leaving the caller to decide how the result
/// is written back.
pub struct UpdateCommand {
    operations: Vec<(UpdateOperator, Vec<(Path, Value)>)>,
}

impl UpdateCommand {
    /// Parses an update document into a command.
    ///
    /// Operator groups and pairs within a group keep the insertion order of
    /// the update document; `apply` replays them in that order.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::ValidationError` - a top-level key is not an update
    ///   operator, or an operator's operand is not a document
    /// * `ErrorKind::MalformedPath` - a pair's key is not a valid path
    /// * `ErrorKind::InvalidWritePath` - a pair's path contains a wildcard
    /// * `ErrorKind::TypeMismatch` - a `$inc` operand is not numeric
    pub fn parse(update: &Document) -> DocLiteResult<UpdateCommand> {
        if update.is_empty() {
            log::error!("Update document is empty");
            return Err(DocLiteError::new(
                "Update document is empty",
                ErrorKind::ValidationError,
            ));
        }

        let mut operations = Vec::with_capacity(update.size());
        for (key, operand) in update.iter() {
            let operator = match key.as_str() {
                SET_OPERATOR => UpdateOperator::Set,
                INC_OPERATOR => UpdateOperator::Inc,
                UNSET_OPERATOR => UpdateOperator::Unset,
                PUSH_OPERATOR => UpdateOperator::Push,
                _ => {
                    log::error!("Update document key '{}' is not an update operator", key);
                    return Err(DocLiteError::new(
                        &format!("Update document key '{}' is not an update operator", key),
                        ErrorKind::ValidationError,
                    ));
                }
            };

            let pairs = match operand {
                Value::Document(pairs) => pairs,
                _ => {
                    log::error!("Operand of '{}' must be a document", key);
                    return Err(DocLiteError::new(
                        &format!("Operand of '{}' must be a document", key),
                        ErrorKind::ValidationError,
                    ));
                }
            };

            let mut parsed = Vec::with_capacity(pairs.size());
            for (path_text, value) in pairs.iter() {
                let path = Path::parse(&path_text)?;
                if path.has_wildcard() {
                    log::error!("Wildcard path '{}' is not a valid update target", path);
                    return Err(DocLiteError::new(
                        &format!("Wildcard path '{}' is not a valid update target", path),
                        ErrorKind::InvalidWritePath,
                    ));
                }
                if operator == UpdateOperator::Inc && !value.is_number() {
                    log::error!("Operand of '$inc' for path '{}' must be numeric", path);
                    return Err(DocLiteError::new(
                        &format!("Operand of '$inc' for path '{}' must be numeric", path),
                        ErrorKind::TypeMismatch,
                    ));
                }
                parsed.push((path, value));
            }
            operations.push((operator, parsed));
        }

        Ok(UpdateCommand { operations })
    }

    /// Applies this command to a document, returning the updated copy.
    ///
    /// The input is never mutated. Operator groups apply in the order they
    /// appeared in the update document.
    ///
    /// # Errors
    ///
    /// * `ErrorKind::TypeMismatch` - `$inc` on a non-numeric slot, or
    ///   `$push` on a non-array slot
    /// * `ErrorKind::PathNotAddressable` - a path indexes past the end of an
    ///   array (arrays are never grown)
    /// * `ErrorKind::InvalidWritePath` - `$unset` targeting an array element
    pub fn apply(&self, document: &Document) -> DocLiteResult<Document> {
        let mut updated = document.clone();
        for (operator, pairs) in &self.operations {
            for (path, operand) in pairs {
                match operator {
                    UpdateOperator::Set => updated.put_path(path, operand.clone())?,
                    UpdateOperator::Inc => apply_inc(&mut updated, path, operand)?,
                    UpdateOperator::Unset => updated.remove_path(path)?,
                    UpdateOperator::Push => apply_push(&mut updated, path, operand)?,
                }
            }
        }
        Ok(updated)
    }

    /// Returns the operators this command applies, in application order.
    pub fn operators(&self) -> Vec<UpdateOperator> {
        self.operations
            .iter()
            .map(|(operator, _)| *operator)
            .collect()
    }
}

impl std::fmt::Display for UpdateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, (operator, pairs)) in self.operations.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}({} paths)", operator.token(), pairs.len())?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for UpdateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UpdateCommand({})", self)
    }
}

fn apply_inc(document: &mut Document, path: &Path, operand: &Value) -> DocLiteResult<()> {
    let incremented = match document.resolve_first(path) {
        // an absent slot starts from zero
        None => operand.clone(),
        Some(slot) if slot.is_integer() && operand.is_integer() => {
            match (slot.as_integer(), operand.as_integer()) {
                (Some(current), Some(step)) => {
                    let sum = current
                        .checked_add(step)
                        .and_then(|sum| i64::try_from(sum).ok());
                    match sum {
                        Some(sum) => Value::I64(sum),
                        None => {
                            log::error!("'$inc' at '{}' overflows the integer range", path);
                            return Err(DocLiteError::new(
                                &format!("'$inc' at '{}' overflows the integer range", path),
                                ErrorKind::TypeMismatch,
                            ));
                        }
                    }
                }
                _ => operand.clone(),
            }
        }
        Some(slot) if slot.is_number() => {
            let current = slot.as_number().unwrap_or(0.0);
            let step = operand.as_number().unwrap_or(0.0);
            Value::F64(current + step)
        }
        Some(slot) => {
            log::error!("Cannot apply '$inc' to non-numeric value at '{}'", path);
            return Err(DocLiteError::new(
                &format!(
                    "Cannot apply '$inc' to non-numeric value {:?} at '{}'",
                    slot, path
                ),
                ErrorKind::TypeMismatch,
            ));
        }
    };
    document.put_path(path, incremented)
}

fn apply_push(document: &mut Document, path: &Path, operand: &Value) -> DocLiteResult<()> {
    let appended = match document.resolve_first(path) {
        None => Value::Array(vec![operand.clone()]),
        Some(Value::Array(mut items)) => {
            items.push(operand.clone());
            Value::Array(items)
        }
        Some(slot) => {
            log::error!("Cannot apply '$push' to non-array value at '{}'", path);
            return Err(DocLiteError::new(
                &format!(
                    "Cannot apply '$push' to non-array value {:?} at '{}'",
                    slot, path
                ),
                ErrorKind::TypeMismatch,
            ));
        }
    };
    document.put_path(path, appended)
}
