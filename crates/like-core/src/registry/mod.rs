//! Provider selector
//!
//! The registry maps provider names to factories so remote provider crates
//! can plug themselves in without the core knowing about them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use like_core::{ProviderRegistry, ProviderConfig, LikeTarget};
//!
//! let registry = ProviderRegistry::new();
//! like_provider_worker::register(&registry);
//!
//! let config = ProviderConfig::new("worker").with_endpoint("/api/like");
//! let target = LikeTarget::new("/posts/a", "Post A", "https://blog.example");
//! let provider = registry.select(&config, &target);
//! ```
//!
//! ## Selection rules
//!
//! - `local` is always registered
//! - Unknown names resolve to `local`
//! - A factory that fails resolves to `local`
//! - Factories themselves fall back to `local` when prerequisites are
//!   missing, so selection never fails

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{DEFAULT_PROVIDER, ProviderConfig};
use crate::providers::{LocalFactory, LocalProvider};
use crate::traits::{LikeProvider, LikeProviderFactory, LikeTarget};

/// Provider registry
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
pub struct ProviderRegistry {
    factories: RwLock<HashMap<String, Arc<dyn LikeProviderFactory>>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create a registry with only the local provider
    pub fn new() -> Self {
        let registry = Self {
            factories: RwLock::new(HashMap::new()),
        };
        registry.register_provider(DEFAULT_PROVIDER, Box::new(LocalFactory));
        registry
    }

    /// Register a provider factory under `name`
    ///
    /// Registering the same factory under several names gives it aliases.
    /// A later registration replaces an earlier one.
    pub fn register_provider(
        &self,
        name: impl Into<String>,
        factory: Box<dyn LikeProviderFactory>,
    ) {
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        factories.insert(name.into(), Arc::from(factory));
    }

    /// Pick and build the provider for one widget
    ///
    /// Never fails: every dead end resolves to [`LocalProvider`].
    pub fn select(&self, config: &ProviderConfig, target: &LikeTarget) -> Box<dyn LikeProvider> {
        let name = config.provider_name();
        let factory = {
            let factories = self
                .factories
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            factories.get(name).cloned()
        };

        let Some(factory) = factory else {
            tracing::debug!("Unknown like provider '{}', using local", name);
            return Box::new(LocalProvider::new());
        };

        match factory.create(config, target) {
            Ok(provider) => {
                tracing::debug!(
                    "Selected like provider '{}' for {}",
                    provider.provider_name(),
                    target.identity
                );
                provider
            }
            Err(e) => {
                tracing::warn!(
                    "Like provider '{}' failed to initialize: {}. Using local.",
                    name,
                    e
                );
                Box::new(LocalProvider::new())
            }
        }
    }

    /// List all registered provider names
    pub fn list_providers(&self) -> Vec<String> {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        factories.keys().cloned().collect()
    }

    /// Check if a provider name is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        factories.contains_key(name)
    }
}
