// # Local Persistence
//
// Durable key/value storage with graceful degradation.
//
// [`LocalPersistence`] is the adapter every provider depends on, remote
// ones included. It never fails: a backend error turns a read into `None`
// and a write into a logged no-op, so the widget degrades to in-memory
// state for the rest of the page view.
//
// ## Keys
//
// - `"<namespace>:<identity>"` → `"1"` | `"0"`
// - `"<namespace>:<identity>:count"` → decimal string

pub mod disabled;
pub mod file;
pub mod memory;

pub use disabled::DisabledBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::fmt;
use std::sync::Arc;

use crate::config::LikeSettings;
use crate::model::{LikeIdentity, parse_count};
use crate::traits::StorageBackend;

const LIKED: &str = "1";
const NOT_LIKED: &str = "0";

/// Never-failing persistence adapter over a [`StorageBackend`]
#[derive(Clone)]
pub struct LocalPersistence {
    backend: Option<Arc<dyn StorageBackend>>,
    namespace: String,
}

impl fmt::Debug for LocalPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPersistence")
            .field(
                "backend",
                &self.backend.as_ref().map(|b| b.backend_name()),
            )
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl LocalPersistence {
    /// Wrap a backend
    pub fn new(backend: Arc<dyn StorageBackend>, settings: &LikeSettings) -> Self {
        Self {
            backend: Some(backend),
            namespace: settings.namespace.clone(),
        }
    }

    /// Adapter for a host with no storage at all
    pub fn unavailable(settings: &LikeSettings) -> Self {
        Self {
            backend: None,
            namespace: settings.namespace.clone(),
        }
    }

    /// Read a value, `None` on absence or any backend failure
    pub fn get(&self, key: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "Local storage read failed ({}): {}",
                    backend.backend_name(),
                    e
                );
                None
            }
        }
    }

    /// Write a value, silently dropping it on backend failure
    pub fn set(&self, key: &str, value: &str) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if let Err(e) = backend.set_item(key, value) {
            tracing::warn!(
                "Local storage write failed ({}): {}",
                backend.backend_name(),
                e
            );
        }
    }

    /// Key of the toggle flag for `identity`
    pub fn flag_key(&self, identity: &LikeIdentity) -> String {
        format!("{}:{}", self.namespace, identity)
    }

    /// Key of the count for `identity`
    pub fn count_key(&self, identity: &LikeIdentity) -> String {
        format!("{}:{}:count", self.namespace, identity)
    }

    /// Persisted toggle flag, `false` when absent
    pub fn load_liked(&self, identity: &LikeIdentity) -> bool {
        self.get(&self.flag_key(identity)).as_deref() == Some(LIKED)
    }

    /// Persisted count, 0 when absent or corrupt
    pub fn load_count(&self, identity: &LikeIdentity) -> u64 {
        parse_count(self.get(&self.count_key(identity)).as_deref())
    }

    /// Persist the toggle flag
    pub fn save_liked(&self, identity: &LikeIdentity, liked: bool) {
        let value = if liked { LIKED } else { NOT_LIKED };
        self.set(&self.flag_key(identity), value);
    }

    /// Persist the count
    pub fn save_count(&self, identity: &LikeIdentity, count: u64) {
        self.set(&self.count_key(identity), &count.to_string());
    }
}
