/// Options for controlling find operations on documents.
///
/// `FindOptions` allows you to paginate query results. It supports method
/// chaining for convenient configuration.
///
/// # Examples
///
/// ```rust,ignore
/// use doclite::collection::FindOptions;
///
/// // Create options with skip and limit
/// let options = FindOptions::new()
///     .skip(10)
///     .limit(20);
///
/// // Use convenience functions
/// let options = skip_by(5);
/// let options = limit_to(100);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindOptions {
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

/// Creates `FindOptions` that skips a number of results.
///
/// Useful for pagination: skip the first N results and process the remaining.
///
/// # Arguments
///
/// * `skip` - Number of documents to skip
///
/// # Returns
///
/// A new `FindOptions` with skip configured
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions {
        skip: Some(skip),
        limit: None,
    }
}

/// Creates `FindOptions` that limits the number of results.
///
/// Combined with skip for pagination: skip(10).limit(20) returns results 11-30.
///
/// # Arguments
///
/// * `limit` - Maximum number of documents to return
///
/// # Returns
///
/// A new `FindOptions` with limit configured
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions {
        skip: None,
        limit: Some(limit),
    }
}

impl FindOptions {
    /// Creates a new `FindOptions` with default settings.
    pub fn new() -> FindOptions {
        FindOptions {
            skip: None,
            limit: None,
        }
    }

    /// Sets the number of documents to skip.
    ///
    /// # Arguments
    ///
    /// * `skip` - Number of documents to skip from the beginning
    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    /// Sets the maximum number of documents to return.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of documents to return
    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }
}
