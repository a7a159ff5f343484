//! # Read-Through Storage
//!
//! A two-tier read-through storage adapter for key/blob data, with pluggable
//! backends behind a common storage trait.
//!
//! The central type is [`storage::ReadthroughStorage`]: a decorator that
//! composes a *primary* and a *fallback* backend and presents a single
//! storage interface. Reads prefer the primary and transparently fall back
//! on a miss, optionally copying the result into the primary so the next
//! read is served locally. Writes, deletes, and renames always target the
//! primary only.
//!
//! ## Features
//!
//! - **Storage trait**: a narrow key/blob contract implemented by every
//!   backend and by the adapter itself, so adapters nest transparently
//! - **Metadata capability**: optional per-backend key-scoped attributes,
//!   brokered across both tiers by the adapter
//! - **Fill on miss**: opt-in promotion of fallback-served reads into the
//!   primary tier
//! - **Backends**: in-memory storage (with metadata support) and local
//!   filesystem storage
//!
//! ## Example
//!
//! ```rust
//! use readthrough_storage::storage::{Backend, MemoryStorage, ReadthroughStorage};
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let primary = Arc::new(MemoryStorage::new());
//! let fallback = Arc::new(MemoryStorage::new());
//! fallback.write("greeting.txt", Bytes::from("hello"))?;
//!
//! let storage = ReadthroughStorage::with_fill_on_miss(primary.clone(), fallback, true);
//!
//! // Served from the fallback, then promoted into the primary
//! assert_eq!(storage.read("greeting.txt")?, Bytes::from("hello"));
//! assert!(primary.exists("greeting.txt")?);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{StorageError, StorageResult};

// Core modules
pub mod error;
pub mod storage;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::error::{StorageError, StorageResult};
    pub use crate::storage::{
        Backend, LocalStorage, MemoryStorage, Metadata, MetadataSupport, ReadthroughStorage,
    };
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "readthrough-storage");
    }
}
