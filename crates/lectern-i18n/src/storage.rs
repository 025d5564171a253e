//! Durable preference storage.
//!
//! # Design
//! - One string value per key; values are stored verbatim, not JSON-encoded.
//! - Reads never fail: an unreadable entry is treated as absent.
//! - Writes report failures to the caller, which decides whether to log or propagate.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::warn;

use crate::error::StorageError;

/// Key-value store that survives restarts.
pub trait PreferenceStorage {
    /// Current value for `key`, if present and readable.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// JSON object file holding string entries, replaced atomically on write.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| StorageError::Serde {
            operation: "decode",
            source,
        })
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    key,
                    error = %err,
                    "preference file unreadable; treating entry as absent"
                );
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        let payload = serde_json::to_string_pretty(&entries).map_err(|source| {
            StorageError::Serde {
                operation: "encode",
                source,
            }
        })?;

        let io_error = |operation: &'static str, path: &Path| {
            let path = path.to_path_buf();
            move |source| StorageError::Io {
                operation,
                path,
                source,
            }
        };

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error("create_dir", parent))?;
        }
        let staging = staging_path(&self.path);
        fs::write(&staging, payload).map_err(io_error("write", &staging))?;
        fs::rename(&staging, &self.path).map_err(io_error("rename", &self.path))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// `window.localStorage`, holding plain string values.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl PreferenceStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        use gloo::storage::{LocalStorage, Storage as _};
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo::storage::{LocalStorage, Storage as _};
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Browser {
                operation: "set_item",
                detail: format!("{err:?}"),
            })
    }
}
