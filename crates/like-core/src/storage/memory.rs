// # Memory Backend
//
// In-memory implementation of StorageBackend.
//
// ## Purpose
//
// Session-scoped storage that disappears with the process. Clones share
// the same map, which lets tests "reload the page" by binding a fresh
// widget over the same backend.
//
// ## Quota
//
// An optional quota (in bytes of keys plus values) makes writes fail the
// way a full browser store does.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::Error;
use crate::traits::StorageBackend;

/// In-memory storage backend
///
/// # Example
///
/// ```rust
/// use like_core::storage::MemoryBackend;
/// use like_core::traits::StorageBackend;
///
/// let backend = MemoryBackend::new();
/// backend.set_item("hexo-like:/posts/a", "1").unwrap();
/// assert_eq!(backend.get_item("hexo-like:/posts/a").unwrap().as_deref(), Some("1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that rejects writes beyond `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: Arc::default(),
            quota: Some(quota),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.inner.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether the backend holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn used_bytes(map: &HashMap<String, String>) -> usize {
        map.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let guard = self
            .inner
            .read()
            .map_err(|_| Error::storage("memory backend lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| Error::storage("memory backend lock poisoned"))?;

        if let Some(quota) = self.quota {
            let replaced = guard.get(key).map(|old| key.len() + old.len()).unwrap_or(0);
            let needed = Self::used_bytes(&guard) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(Error::storage(format!(
                    "quota exceeded: {} of {} bytes",
                    needed, quota
                )));
            }
        }

        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| Error::storage("memory backend lock poisoned"))?;
        guard.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_basic() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());

        backend.set_item("a", "1").unwrap();
        assert_eq!(backend.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.len(), 1);

        backend.remove_item("a").unwrap();
        assert_eq!(backend.get_item("a").unwrap(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let backend = MemoryBackend::new();
        let reloaded = backend.clone();

        backend.set_item("a", "1").unwrap();
        assert_eq!(reloaded.get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_quota_rejects_oversized_writes() {
        let backend = MemoryBackend::with_quota(8);

        backend.set_item("ab", "cd").unwrap();
        // Replacing an entry only counts the difference
        backend.set_item("ab", "cdef").unwrap();

        let err = backend.set_item("long-key", "value").unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(backend.get_item("long-key").unwrap(), None);
    }
}
