use crate::errors::{DocLiteError, DocLiteResult, ErrorKind};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Configuration surface every store backend exposes.
///
/// A backend with an empty file path is in-memory by definition.
pub trait StoreConfigProvider: Any + Send + Sync {
    fn file_path(&self) -> String;

    fn is_read_only(&self) -> bool;

    fn is_in_memory(&self) -> bool {
        self.file_path().is_empty()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Facade over a [StoreConfigProvider].
#[derive(Clone)]
pub struct StoreConfig {
    inner: Arc<dyn StoreConfigProvider>,
}

impl StoreConfig {
    pub fn new<T: StoreConfigProvider + 'static>(inner: T) -> Self {
        StoreConfig {
            inner: Arc::new(inner),
        }
    }

    /// Downcasts to a concrete backend config type.
    pub fn as_ref<T: StoreConfigProvider + 'static>(&self) -> DocLiteResult<&T> {
        self.inner.as_any().downcast_ref::<T>().ok_or_else(|| {
            log::error!("StoreConfig type mismatch: cannot downcast to requested config type");
            DocLiteError::new(
                "StoreConfig type mismatch: cannot downcast to requested config type",
                ErrorKind::InvalidOperation,
            )
        })
    }
}

impl Deref for StoreConfig {
    type Target = Arc<dyn StoreConfigProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStoreConfig {
        file_path: String,
        read_only: bool,
    }

    impl StoreConfigProvider for MockStoreConfig {
        fn file_path(&self) -> String {
            self.file_path.clone()
        }

        fn is_read_only(&self) -> bool {
            self.read_only
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_file_path_and_read_only() {
        let config = StoreConfig::new(MockStoreConfig {
            file_path: String::from("/path/to/store"),
            read_only: true,
        });
        assert_eq!(config.file_path(), "/path/to/store");
        assert!(config.is_read_only());
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_empty_path_means_in_memory() {
        let config = StoreConfig::new(MockStoreConfig {
            file_path: String::new(),
            read_only: false,
        });
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_downcast_correct_type() {
        let config = StoreConfig::new(MockStoreConfig {
            file_path: String::from("/path"),
            read_only: false,
        });
        let concrete = config.as_ref::<MockStoreConfig>();
        assert!(concrete.is_ok());
        assert_eq!(concrete.unwrap().file_path(), "/path");
    }

    #[test]
    fn test_downcast_wrong_type_fails() {
        #[derive(Debug)]
        struct OtherConfig;
        impl StoreConfigProvider for OtherConfig {
            fn file_path(&self) -> String {
                String::new()
            }
            fn is_read_only(&self) -> bool {
                false
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let config = StoreConfig::new(MockStoreConfig {
            file_path: String::from("/path"),
            read_only: false,
        });
        let result = config.as_ref::<OtherConfig>();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidOperation);
    }
}
