//! Two-tier read-through storage adapter
//!
//! [`ReadthroughStorage`] composes a primary and a fallback backend behind
//! the single [`Backend`] contract. All writes happen against the primary.
//! Reads attempt the primary first; on a miss the read happens against the
//! fallback, optionally filling the primary so the next read is served
//! locally. The fallback is never mutated through the adapter.

use crate::error::StorageResult;
use crate::storage::backend::{Backend, Metadata, MetadataSupport};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Read-through decorator over a primary and a fallback backend
///
/// The adapter holds shared references to two already-initialized backends;
/// callers keep their own handles and remain free to address either tier
/// directly. The adapter itself carries no other state, so per-key "state"
/// is implicit in which tier currently holds the key.
///
/// With `fill_on_miss` enabled, a fallback-served read copies the content
/// (and, when both tiers support it, the metadata) into the primary. Two
/// concurrent reads of the same missing key may both fill; the overwrite is
/// idempotent and the adapter adds no locking of its own.
pub struct ReadthroughStorage {
    primary: Arc<dyn Backend>,
    fallback: Arc<dyn Backend>,
    fill_on_miss: bool,
}

impl ReadthroughStorage {
    /// Create a read-through adapter with fill-on-miss disabled
    pub fn new(primary: Arc<dyn Backend>, fallback: Arc<dyn Backend>) -> Self {
        Self {
            primary,
            fallback,
            fill_on_miss: false,
        }
    }

    /// Create a read-through adapter with an explicit fill-on-miss policy
    pub fn with_fill_on_miss(
        primary: Arc<dyn Backend>,
        fallback: Arc<dyn Backend>,
        fill_on_miss: bool,
    ) -> Self {
        Self {
            primary,
            fallback,
            fill_on_miss,
        }
    }

    /// Whether fallback-served reads fill the primary tier
    pub fn fill_on_miss(&self) -> bool {
        self.fill_on_miss
    }

    /// Copy content read from the fallback into the primary, along with the
    /// fallback's metadata when both tiers support the capability.
    fn fill_primary(&self, key: &str, content: &Bytes) -> StorageResult<()> {
        self.primary.write(key, content.clone())?;

        if let (Some(primary_meta), Some(fallback_meta)) =
            (self.primary.metadata(), self.fallback.metadata())
        {
            if let Some(metadata) = fallback_meta.get_metadata(key)? {
                primary_meta.set_metadata(key, metadata)?;
            }
        }

        Ok(())
    }
}

impl Backend for ReadthroughStorage {
    fn read(&self, key: &str) -> StorageResult<Bytes> {
        if self.primary.exists(key)? {
            return self.primary.read(key);
        }

        let content = self.fallback.read(key)?;

        if self.fill_on_miss {
            debug!(key, "fill on miss: promoting fallback content to primary");
            self.fill_primary(key, &content)?;
        }

        Ok(content)
    }

    // Metadata supplied alongside content is not forwarded here; it must be
    // set through set_metadata.
    fn write(&self, key: &str, content: Bytes) -> StorageResult<()> {
        self.primary.write(key, content)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        // The fallback keeps its copy; it is a lower tier, not a mirror.
        self.primary.delete(key)
    }

    fn rename(&self, key: &str, new_key: &str) -> StorageResult<()> {
        self.primary.rename(key, new_key)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.primary.exists(key)? || self.fallback.exists(key)?)
    }

    fn is_directory(&self, key: &str) -> StorageResult<bool> {
        Ok(self.primary.is_directory(key)? || self.fallback.is_directory(key)?)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut merged = self.primary.keys()?;
        merged.extend(self.fallback.keys()?);
        merged.sort();
        merged.dedup();
        Ok(merged)
    }

    // Primary only: a fallback-resident key has no mtime through the adapter
    // until a fill promotes it.
    fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>> {
        self.primary.mtime(key)
    }

    fn metadata(&self) -> Option<&dyn MetadataSupport> {
        if self.primary.metadata().is_some() || self.fallback.metadata().is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl MetadataSupport for ReadthroughStorage {
    fn get_metadata(&self, key: &str) -> StorageResult<Option<Metadata>> {
        let Some(primary_meta) = self.primary.metadata() else {
            return Ok(None);
        };

        if self.primary.exists(key)? {
            primary_meta.get_metadata(key)
        } else if let Some(fallback_meta) = self.fallback.metadata() {
            fallback_meta.get_metadata(key)
        } else {
            Ok(None)
        }
    }

    fn set_metadata(&self, key: &str, metadata: Metadata) -> StorageResult<()> {
        let Some(primary_meta) = self.primary.metadata() else {
            // Primary cannot hold metadata; degrade silently.
            return Ok(());
        };

        if !self.primary.exists(key)? && self.fallback.exists(key)? {
            debug!(key, "promoting fallback content before metadata write");
            self.primary.write(key, self.fallback.read(key)?)?;
        }

        primary_meta.set_metadata(key, metadata)
    }
}
