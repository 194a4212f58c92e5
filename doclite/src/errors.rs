use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::{atomic, Atomic};

/// Error kinds for DocLite operations
///
/// This enum represents all possible error types that can occur during DocLite database operations.
/// Each error kind describes a specific category of failure, enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use doclite::errors::{DocLiteError, ErrorKind, DocLiteResult};
///
/// fn example() -> DocLiteResult<()> {
///     Err(DocLiteError::new("Malformed path", ErrorKind::MalformedPath))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Path Errors - actively used in path parsing and navigation
    /// The path string could not be parsed
    MalformedPath,
    /// The path cannot be used as a write target
    InvalidWritePath,
    /// The path does not address a writable slot in the document
    PathNotAddressable,

    // Filter Errors - actively used in query parsing and evaluation
    /// Error during filter evaluation or construction
    FilterError,

    // Update Errors - actively used in update operator application
    /// An update operator was applied to a value of an incompatible type
    TypeMismatch,
    /// An upsert could not derive a base document from its filter
    UpsertSeedFailed,

    // ID and Identity Errors - actively used in collection operations
    /// The entity is not identifiable
    NotIdentifiable,

    // Operation Errors - actively used for invalid/unsupported operations
    /// The operation is not valid in the current context
    InvalidOperation,

    // IO and Storage Errors - actively used in store operations
    /// Generic IO error
    IOError,

    // Constraint Violation Errors - actively used in id uniqueness checks
    /// A unique constraint was violated
    UniqueConstraintViolation,

    // Validation Errors - actively used in field/data validation
    /// Generic validation error
    ValidationError,
    /// Invalid data type for operation
    InvalidDataType,
    /// Invalid field name
    InvalidFieldName,

    // Backend and Store Errors - actively used in store state management
    /// Error from storage backend
    BackendError,
    /// Store has not been initialized
    StoreNotInitialized,
    /// Store has already been closed
    StoreAlreadyClosed,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedPath => write!(f, "Malformed path"),
            ErrorKind::InvalidWritePath => write!(f, "Invalid write path"),
            ErrorKind::PathNotAddressable => write!(f, "Path not addressable"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::UpsertSeedFailed => write!(f, "Upsert seed failed"),
            ErrorKind::NotIdentifiable => write!(f, "Not identifiable"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::StoreNotInitialized => write!(f, "Store not initialized"),
            ErrorKind::StoreAlreadyClosed => write!(f, "Store already closed"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom DocLite error type.
///
/// `DocLiteError` encapsulates error information including the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use doclite::errors::{DocLiteError, ErrorKind};
///
/// // Create a simple error
/// let err = DocLiteError::new("Malformed path", ErrorKind::MalformedPath);
///
/// // Create an error with a cause
/// let cause = DocLiteError::new("IO failed", ErrorKind::IOError);
/// let err = DocLiteError::new_with_cause("Store open failed", ErrorKind::BackendError, cause);
/// ```
///
/// # Type alias
///
/// The `DocLiteResult<T>` type alias is equivalent to `Result<T, DocLiteError>` and is used
/// throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct DocLiteError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocLiteError>>,
    backtrace: Atomic<Backtrace>,
}

impl DocLiteError {
    /// Creates a new `DocLiteError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `DocLiteError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocLiteError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `DocLiteError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_type` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `DocLiteError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_type: ErrorKind, cause: DocLiteError) -> Self {
        DocLiteError {
            message: message.to_string(),
            error_kind: error_type,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<DocLiteError>> {
        self.cause.as_ref()
    }
}

impl Display for DocLiteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocLiteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for DocLiteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for DocLite operations.
///
/// `DocLiteResult<T>` is shorthand for `Result<T, DocLiteError>`.
/// All fallible DocLite operations return this type.
///
/// # Examples
///
/// ```rust,ignore
/// use doclite::errors::DocLiteResult;
///
/// fn find_collection(name: &str) -> DocLiteResult<String> {
///     // Return success
///     Ok(name.to_string())
///     // Or return error
///     // Err(DocLiteError::new("Invalid collection name", ErrorKind::ValidationError))
/// }
/// ```
pub type DocLiteResult<T> = Result<T, DocLiteError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for DocLiteError {
    fn from(err: std::io::Error) -> Self {
        DocLiteError::new(&format!("IO error: {}", err), ErrorKind::IOError)
    }
}

impl From<std::num::ParseIntError> for DocLiteError {
    fn from(err: std::num::ParseIntError) -> Self {
        DocLiteError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<String> for DocLiteError {
    fn from(msg: String) -> Self {
        DocLiteError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DocLiteError {
    fn from(msg: &str) -> Self {
        DocLiteError::new(msg, ErrorKind::InternalError)
    }
}
