//! Blob storage backends.
//!
//! A [`BlobStore`] holds opaque named records. Writes must be atomic: a
//! reader sees either the complete old record or the complete new one,
//! never a partial write.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};

/// Atomic storage for named records.
pub trait BlobStore: Send + Sync {
    /// Reads a record by name.
    ///
    /// Returns `Ok(None)` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically writes a record, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_atomic(&self, name: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Deletes a record. Deleting an absent record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only for actual I/O failures.
    fn delete(&self, name: &str) -> StoreResult<()>;

    /// Checks if a record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.read(name)?.is_some())
    }
}

// MemoryBlobStore

/// In-memory blob store backed by a `HashMap`.
///
/// The persistence analogue of browser session storage: records survive for
/// the lifetime of the process only. Also the test backend.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Creates a new empty memory blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no records are stored.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.read().unwrap().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.blobs.read().unwrap().get(name).cloned())
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        self.blobs
            .write()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        self.blobs.write().unwrap().remove(name);
        Ok(())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.blobs.read().unwrap().contains_key(name))
    }
}

// FsBlobStore

/// Filesystem blob store with atomic write semantics.
///
/// Writes follow the write-to-temp-then-rename pattern:
///
/// 1. Write data to `{name}.tmp` in the store directory
/// 2. `fsync` the temporary file
/// 3. Atomically rename it over the target name
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Opens a blob store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|err| StoreError::io(format!("create {}", root.display()), err))?;
        Ok(Self { root })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BlobStore for FsBlobStore {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(format!("read {name}"), err)),
        }
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let target = self.path_for(name);
        let tmp = self.path_for(&format!("{name}.tmp"));

        let mut file =
            File::create(&tmp).map_err(|err| StoreError::io(format!("create {name}.tmp"), err))?;
        file.write_all(bytes)
            .map_err(|err| StoreError::io(format!("write {name}.tmp"), err))?;
        file.sync_all()
            .map_err(|err| StoreError::io(format!("sync {name}.tmp"), err))?;
        drop(file);

        fs::rename(&tmp, &target).map_err(|err| StoreError::io(format!("rename {name}"), err))
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(format!("delete {name}"), err)),
        }
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.path_for(name).exists())
    }
}
