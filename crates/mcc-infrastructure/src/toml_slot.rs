//! A single durable TOML slot with atomic replacement.
//!
//! The history collection lives in one named file that is read whole and
//! rewritten whole. Writes go through a temp file, fsync, and rename so a
//! crash mid-write never leaves a torn file, and an advisory lock serializes
//! writers.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use mcc_core::error::{MccError, Result};

/// Handle to one atomically replaced TOML file.
pub struct TomlSlot<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> TomlSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the slot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: parsed contents
    /// - `Ok(None)`: the file does not exist or is empty
    /// - `Err(_)`: the file exists but could not be read or parsed
    pub fn read(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Replaces the slot contents atomically.
    ///
    /// Serializes to a temp file in the same directory, fsyncs, then renames
    /// over the slot. An advisory lock is held for the duration of the
    /// write.
    pub fn replace(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = SlotLock::acquire(&self.path)?;

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| MccError::io("Slot path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| MccError::io("Slot path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Advisory lock guard, released on drop.
struct SlotLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl SlotLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| MccError::data_access(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(SlotLock { file, lock_path })
    }
}

impl Drop for SlotLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}
