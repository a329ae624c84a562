//! File-backed store
//!
//! One JSON file per key inside a data directory. Writes land in a `.tmp`
//! sibling under an exclusive lock and are renamed into place.

use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Store, StoreError};

const APP_DIR: &str = "task-search";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory
    pub fn default_location() -> Result<Self, StoreError> {
        default_data_dir().map(Self::new).ok_or_else(|| {
            StoreError::Unavailable("could not determine a data directory".to_string())
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`; characters unsafe in file names become `_`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

/// Platform data directory for the application
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR))
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        debug!("Read {} bytes from {}", contents.len(), path.display());
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            info!("Created data directory: {}", self.dir.display());
        }

        let tmp_path = path.with_extension("json.tmp");
        // The lock file stays in place so every writer locks the same inode
        let lock_path = path.with_extension("lock");
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;

        let written = fs::write(&tmp_path, value).and_then(|_| fs::rename(&tmp_path, &path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }

        lock_file.unlock()?;
        written?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
