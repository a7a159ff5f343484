//! Error types for the read-through storage library
//!
//! This module provides a unified error handling system using `thiserror` for
//! all storage backends and the read-through adapter.

use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key not found in the consulted backend(s)
    #[error("Key not found: {key}")]
    NotFound {
        /// The key that could not be found.
        key: String,
    },

    /// Write operation failed
    #[error("Write failed for {key}: {reason}")]
    WriteFailed {
        /// The key that failed to be written.
        key: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// Rename operation failed
    #[error("Rename failed from {from} to {to}: {reason}")]
    RenameFailed {
        /// The source key of the rename.
        from: String,
        /// The destination key of the rename.
        to: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// Storage operation failed
    #[error("Storage operation failed: {operation}: {reason}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

impl StorageError {
    /// True if this error represents a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Convenience type alias for storage Results
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = StorageError::NotFound {
            key: "missing/key".to_string(),
        };
        assert!(error.to_string().contains("Key not found"));
        assert!(error.to_string().contains("missing/key"));
    }

    #[test]
    fn test_is_not_found() {
        let not_found = StorageError::NotFound {
            key: "k".to_string(),
        };
        assert!(not_found.is_not_found());

        let write_failed = StorageError::WriteFailed {
            key: "k".to_string(),
            reason: "disk full".to_string(),
        };
        assert!(!write_failed.is_not_found());
    }
}
