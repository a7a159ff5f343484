//! Storage module: backend contracts, concrete backends, and the
//! read-through adapter
//!
//! Every backend implements the [`Backend`] trait, and may additionally
//! implement [`MetadataSupport`] for key-scoped attributes. The
//! [`ReadthroughStorage`] adapter composes two backends — a primary and a
//! fallback — behind the same pair of traits, so adapters can decorate other
//! adapters.
//!
//! # Examples
//!
//! ## Warming a local tier from a slower one
//!
//! ```rust
//! use readthrough_storage::storage::{
//!     Backend, LocalConfig, LocalStorage, MemoryStorage, ReadthroughStorage,
//! };
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = tempfile::TempDir::new()?;
//! let primary = Arc::new(MemoryStorage::new());
//! let fallback = Arc::new(LocalStorage::new(LocalConfig {
//!     base_path: dir.path().to_path_buf(),
//!     ..Default::default()
//! })?);
//! fallback.write("report.txt", Bytes::from("quarterly numbers"))?;
//!
//! let storage = ReadthroughStorage::with_fill_on_miss(primary.clone(), fallback, true);
//!
//! // First read hits the filesystem; the content is promoted into memory
//! storage.read("report.txt")?;
//! assert!(primary.exists("report.txt")?);
//! # Ok(())
//! # }
//! ```

// Backend contracts
pub mod backend;

// The read-through adapter
pub mod readthrough;

// Concrete backends
pub mod local;
pub mod memory;

// Re-export main types for convenience
pub use backend::{Backend, Metadata, MetadataSupport};
pub use local::{LocalConfig, LocalStorage};
pub use memory::MemoryStorage;
pub use readthrough::ReadthroughStorage;
