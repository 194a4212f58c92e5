use crate::common::Value;

/// The result of a write operation (insert, save, update, remove).
///
/// Carries the `_id` values of the affected documents in the order the
/// operation touched them.
///
/// # Examples
///
/// ```rust,ignore
/// let result = collection.insert(doc)?;
/// for id in result {
///     println!("Inserted document with id {}", id);
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteResult {
    affected_ids: Vec<Value>,
}

impl WriteResult {
    /// Creates a new `WriteResult` with the specified affected ids.
    pub fn new(affected_ids: Vec<Value>) -> Self {
        Self { affected_ids }
    }

    /// The ids affected by the write operation, in operation order.
    pub fn affected_ids(&self) -> &[Value] {
        &self.affected_ids
    }

    /// Number of documents affected by the write operation.
    pub fn affected_count(&self) -> usize {
        self.affected_ids.len()
    }
}

impl IntoIterator for WriteResult {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.affected_ids.into_iter()
    }
}
