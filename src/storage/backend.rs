//! Storage backend contracts
//!
//! This module defines the narrow key/blob contract every backend implements
//! ([`Backend`]) plus the optional per-backend metadata capability
//! ([`MetadataSupport`]). The read-through adapter consumes exactly these two
//! traits and exposes them again, so it is substitutable wherever a plain
//! backend is expected.

use crate::error::{StorageError, StorageResult};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Key-scoped attribute mapping attached to stored objects
pub type Metadata = HashMap<String, String>;

/// Base storage contract for key/blob backends
///
/// Keys are opaque strings; backends may interpret them as paths but the
/// contract itself implies no hierarchy. All operations are synchronous and
/// safe to call from multiple threads.
pub trait Backend: Send + Sync {
    /// Read the content stored under a key
    ///
    /// Fails with [`StorageError::NotFound`] if the key is absent.
    fn read(&self, key: &str) -> StorageResult<Bytes>;

    /// Store content under a key, replacing any previous content
    fn write(&self, key: &str, content: Bytes) -> StorageResult<()>;

    /// Delete the content stored under a key
    ///
    /// Fails with [`StorageError::NotFound`] if the key is absent.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Rename a key, keeping its content
    fn rename(&self, key: &str, new_key: &str) -> StorageResult<()>;

    /// Check whether a key exists
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Check whether a key denotes a directory
    ///
    /// Backends with a flat namespace always return false.
    fn is_directory(&self, key: &str) -> StorageResult<bool>;

    /// List every key held by this backend
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Last modification time of a key
    ///
    /// Fails with [`StorageError::NotFound`] if the key is absent.
    fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>>;

    /// Query the optional metadata capability of this backend
    ///
    /// Returns `Some` when the backend supports key-scoped metadata, `None`
    /// otherwise. Callers must check this before attempting metadata
    /// operations; there is no downcasting involved.
    fn metadata(&self) -> Option<&dyn MetadataSupport> {
        None
    }
}

/// Optional metadata capability for storage backends
pub trait MetadataSupport {
    /// Fetch the metadata stored for a key, if any
    fn get_metadata(&self, key: &str) -> StorageResult<Option<Metadata>>;

    /// Attach metadata to a key, replacing any previous metadata
    fn set_metadata(&self, key: &str, metadata: Metadata) -> StorageResult<()>;
}

/// Utility functions shared by storage backends
pub mod utils {
    use super::*;

    /// Maximum storage key length
    pub const MAX_KEY_LENGTH: usize = 1024;

    /// Validate storage key
    pub fn validate_key(key: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::OperationFailed {
                operation: "validate_key".to_string(),
                reason: "Key cannot be empty".to_string(),
            });
        }

        if key.len() > MAX_KEY_LENGTH {
            return Err(StorageError::OperationFailed {
                operation: "validate_key".to_string(),
                reason: format!("Key too long (max {} characters)", MAX_KEY_LENGTH),
            });
        }

        if key.contains('\0') || key.contains('\n') || key.contains('\r') {
            return Err(StorageError::OperationFailed {
                operation: "validate_key".to_string(),
                reason: "Key contains invalid characters".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(utils::validate_key("valid/key").is_ok());
        assert!(utils::validate_key("").is_err());
        assert!(utils::validate_key("key\0with\0nulls").is_err());
        assert!(utils::validate_key("key\nwith\nnewlines").is_err());
    }

    #[test]
    fn test_validate_key_length() {
        let long_key = "k".repeat(utils::MAX_KEY_LENGTH);
        assert!(utils::validate_key(&long_key).is_ok());

        let too_long = "k".repeat(utils::MAX_KEY_LENGTH + 1);
        assert!(utils::validate_key(&too_long).is_err());
    }

    #[test]
    fn test_metadata_capability_defaults_to_none() {
        struct Bare;

        impl Backend for Bare {
            fn read(&self, key: &str) -> StorageResult<Bytes> {
                Err(StorageError::NotFound {
                    key: key.to_string(),
                })
            }
            fn write(&self, _key: &str, _content: Bytes) -> StorageResult<()> {
                Ok(())
            }
            fn delete(&self, key: &str) -> StorageResult<()> {
                Err(StorageError::NotFound {
                    key: key.to_string(),
                })
            }
            fn rename(&self, key: &str, new_key: &str) -> StorageResult<()> {
                Err(StorageError::RenameFailed {
                    from: key.to_string(),
                    to: new_key.to_string(),
                    reason: "empty backend".to_string(),
                })
            }
            fn exists(&self, _key: &str) -> StorageResult<bool> {
                Ok(false)
            }
            fn is_directory(&self, _key: &str) -> StorageResult<bool> {
                Ok(false)
            }
            fn keys(&self) -> StorageResult<Vec<String>> {
                Ok(Vec::new())
            }
            fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>> {
                Err(StorageError::NotFound {
                    key: key.to_string(),
                })
            }
        }

        let backend = Bare;
        assert!(backend.metadata().is_none());
    }
}
