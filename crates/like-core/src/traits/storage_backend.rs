// # Storage Backend Trait
//
// Raw key/value storage underneath the persistence adapter.
//
// ## Purpose
//
// Backends model what a browser's origin-scoped storage does, including
// its failure modes: disabled storage, exceeded quota, unreadable files.
// They report those failures as errors. Only
// [`LocalPersistence`](crate::storage::LocalPersistence) swallows them.
//
// ## Implementations
//
// - `MemoryBackend`: in-process map with an optional quota
// - `FileBackend`: JSON file with atomic writes and backup recovery
// - `DisabledBackend`: always fails

/// Trait for raw storage backends
///
/// # Thread Safety
///
/// Backends are shared between widgets through `Arc` and must be safe to
/// call from any task. Calls are synchronous: the optimistic phase of a
/// click must finish before any remote call is dispatched.
pub trait StorageBackend: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: The stored value
    /// - `Ok(None)`: No entry for `key`
    /// - `Err(Error)`: Storage unavailable
    fn get_item(&self, key: &str) -> Result<Option<String>, crate::Error>;

    /// Create or replace a value
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Stored
    /// - `Err(Error)`: Storage unavailable or quota exceeded
    fn set_item(&self, key: &str, value: &str) -> Result<(), crate::Error>;

    /// Remove a value (no-op when absent)
    fn remove_item(&self, key: &str) -> Result<(), crate::Error>;

    /// Backend name (for logging)
    fn backend_name(&self) -> &'static str;
}
