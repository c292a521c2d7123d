// # File Backend
//
// File-based implementation of StorageBackend with crash recovery.
//
// ## Purpose
//
// Gives headless hosts the same "survives across page loads" guarantee a
// browser's origin-scoped storage gives. One file per origin.
//
// ## Crash Recovery
//
// - Atomic writes: Uses write-then-rename for atomicity
// - Corruption detection: Validates JSON on load
// - Automatic backup: Keeps .backup of last known good state
// - Recovery: Falls back to backup if corruption detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "items": {
//     "hexo-like:/posts/a": "1",
//     "hexo-like:/posts/a:count": "1"
//   }
// }
// ```

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::Error;
use crate::traits::StorageBackend;

/// Storage file format version
const STORAGE_FILE_VERSION: &str = "1.0";

/// Serializable storage file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StorageFileFormat {
    version: String,
    items: HashMap<String, String>,
}

/// File-backed storage with write-through persistence
///
/// Every successful `set_item` / `remove_item` is on disk before it returns.
///
/// # Example
///
/// ```rust,no_run
/// use like_core::storage::FileBackend;
/// use like_core::traits::StorageBackend;
///
/// let backend = FileBackend::open("/var/lib/likectl/blog.example.json")?;
/// backend.set_item("hexo-like:/posts/a", "1")?;
/// # Ok::<(), like_core::Error>(())
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    items: RwLock<HashMap<String, String>>,
}

impl FileBackend {
    /// Create or load a file backend
    ///
    /// This will:
    /// 1. Create parent directories if needed
    /// 2. Try to load the existing file
    /// 3. If it is corrupt, try the backup
    /// 4. If both fail, start empty
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                Error::config(format!(
                    "Failed to create storage directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let items = Self::load_with_recovery(&path)?;

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_with_recovery(path: &Path) -> Result<HashMap<String, String>, Error> {
        match Self::load(path) {
            Ok(items) => {
                tracing::debug!("Loaded storage file: {} items", items.len());
                Ok(items)
            }
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "Storage file appears corrupted: {}. Attempting recovery from backup.",
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty storage.");
                    return Ok(HashMap::new());
                }

                match Self::load(&backup_path) {
                    Ok(items) => {
                        tracing::info!("Recovered storage from backup: {} items", items.len());
                        if let Err(restore_err) = fs::copy(&backup_path, path) {
                            tracing::error!(
                                "Failed to restore storage file from backup: {}",
                                restore_err
                            );
                        }
                        Ok(items)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also corrupted: {}. Starting with empty storage.",
                            backup_err
                        );
                        Ok(HashMap::new())
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    fn load(path: &Path) -> Result<HashMap<String, String>, Error> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path)?;
        let file: StorageFileFormat = serde_json::from_str(&content)?;

        if file.version != STORAGE_FILE_VERSION {
            tracing::warn!(
                "Storage file version mismatch: expected {}, got {}. Attempting to load anyway.",
                STORAGE_FILE_VERSION,
                file.version
            );
        }

        Ok(file.items)
    }

    /// Write items to disk atomically
    fn write(&self, items: &HashMap<String, String>) -> Result<(), Error> {
        let file = StorageFileFormat {
            version: STORAGE_FILE_VERSION.to_string(),
            items: items.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let temp_path = self.temp_path();
        {
            let mut temp = fs::File::create(&temp_path).map_err(|e| {
                Error::storage(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            temp.write_all(json.as_bytes())?;
            temp.flush()?;
        }

        if self.path.exists()
            && let Err(e) = fs::copy(&self.path, Self::backup_path(&self.path))
        {
            tracing::warn!("Failed to create backup: {}", e);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            Error::storage(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Storage written to file: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let guard = self
            .items
            .read()
            .map_err(|_| Error::storage("file backend lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| Error::storage("file backend lock poisoned"))?;

        let previous = guard.insert(key.to_string(), value.to_string());
        if let Err(e) = self.write(&guard) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => guard.insert(key.to_string(), old),
                None => guard.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| Error::storage("file backend lock poisoned"))?;

        if guard.remove(key).is_some() {
            self.write(&guard)?;
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
