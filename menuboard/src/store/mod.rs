//! Capacity-bounded local storage.
//!
//! Values are JSON text stored under string keys. Every store enforces a
//! byte quota over all of its values; a write that would exceed it is
//! rejected with [`StoreError::QuotaExceeded`] and the previous value stays
//! in place.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Saved-menu library built on top of a store.
pub mod library;

pub use library::{MenuCategory, MenuLibrary, SavedMenu};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would push the store over its quota.
    #[error("storage quota exceeded writing `{key}`: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: u64,
        /// Configured quota.
        quota: u64,
    },

    /// Keys are limited to ASCII letters, digits, `-` and `_`.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A stored value is not valid JSON for the expected type.
    #[error("stored value is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// String-keyed storage of JSON text.
pub trait KeyValueStore {
    /// Reads a value.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value. On error the previous value is left untouched.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

fn check_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

fn check_quota(key: &str, used: u64, replaced: u64, incoming: u64, quota: u64) -> StoreResult<()> {
    let needed = used.saturating_sub(replaced) + incoming;
    if needed > quota {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}

/// A store keeping one `<key>.json` file per value in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: u64,
}

impl FileStore {
    /// Opens (and creates if needed) a store directory.
    pub fn open(dir: impl AsRef<Path>, quota_bytes: u64) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, quota_bytes })
    }

    /// Directory backing the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Bytes currently occupied by stored values.
    pub fn used_bytes(&self) -> StoreResult<u64> {
        let mut total = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                total += entry.metadata()?.len();
            }
        }
        Ok(total)
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let replaced = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        check_quota(
            key,
            self.used_bytes()?,
            replaced,
            value.len() as u64,
            self.quota_bytes,
        )?;

        // 先写临时文件再重命名，失败时旧值保持不变
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, value) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        fs::rename(&tmp, &path)?;
        debug!("stored {} bytes under `{key}`", value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// An in-memory store with the same quota rules as [`FileStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota_bytes: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new(quota_bytes: u64) -> Self {
        Self {
            values: HashMap::new(),
            quota_bytes,
        }
    }

    /// Bytes currently occupied by stored values.
    pub fn used_bytes(&self) -> u64 {
        self.values.values().map(|v| v.len() as u64).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        let replaced = self.values.get(key).map_or(0, |v| v.len() as u64);
        check_quota(
            key,
            self.used_bytes(),
            replaced,
            value.len() as u64,
            self.quota_bytes,
        )?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        check_key(key)?;
        self.values.remove(key);
        Ok(())
    }
}
