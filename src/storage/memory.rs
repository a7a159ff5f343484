//! In-memory storage backend
//!
//! A flat-namespace backend keeping content and metadata in process memory.
//! Supports the metadata capability, which makes it the canonical primary or
//! fallback tier in tests and small tools.

use crate::error::{StorageError, StorageResult};
use crate::storage::backend::{utils, Backend, Metadata, MetadataSupport};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
struct ObjectRecord {
    content: Bytes,
    mtime: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<String, ObjectRecord>,
    // Metadata lives beside the objects; it may be attached before the
    // content arrives.
    metadata: HashMap<String, Metadata>,
}

/// In-memory storage backend with metadata support
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().objects.len()
    }

    /// True if no objects are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Bytes> {
        let inner = self.inner.read().unwrap();
        inner
            .objects
            .get(key)
            .map(|record| record.content.clone())
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    fn write(&self, key: &str, content: Bytes) -> StorageResult<()> {
        utils::validate_key(key)?;

        let mut inner = self.inner.write().unwrap();
        inner.objects.insert(
            key.to_string(),
            ObjectRecord {
                content,
                mtime: Utc::now(),
            },
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.objects.remove(key).is_none() {
            return Err(StorageError::NotFound {
                key: key.to_string(),
            });
        }
        inner.metadata.remove(key);
        Ok(())
    }

    fn rename(&self, key: &str, new_key: &str) -> StorageResult<()> {
        utils::validate_key(new_key)?;

        let mut inner = self.inner.write().unwrap();
        let record = inner
            .objects
            .remove(key)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })?;
        inner.objects.insert(new_key.to_string(), record);

        if let Some(metadata) = inner.metadata.remove(key) {
            inner.metadata.insert(new_key.to_string(), metadata);
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.inner.read().unwrap().objects.contains_key(key))
    }

    // Flat namespace: keys carry no hierarchy here.
    fn is_directory(&self, _key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let inner = self.inner.read().unwrap();
        let mut keys: Vec<String> = inner.objects.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn mtime(&self, key: &str) -> StorageResult<DateTime<Utc>> {
        let inner = self.inner.read().unwrap();
        inner
            .objects
            .get(key)
            .map(|record| record.mtime)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    fn metadata(&self) -> Option<&dyn MetadataSupport> {
        Some(self)
    }
}

impl MetadataSupport for MemoryStorage {
    fn get_metadata(&self, key: &str) -> StorageResult<Option<Metadata>> {
        Ok(self.inner.read().unwrap().metadata.get(key).cloned())
    }

    fn set_metadata(&self, key: &str, metadata: Metadata) -> StorageResult<()> {
        utils::validate_key(key)?;

        self.inner
            .write()
            .unwrap()
            .metadata
            .insert(key.to_string(), metadata);
        Ok(())
    }
}
