// # LeanCloud Like Provider
//
// Keeps like counts in a LeanCloud class (`PostLike` by default), one
// record per liked identity: `{url, title, count}`.
//
// ## Behavior
//
// - **bind**: seed `liked` from local storage with count 0, render, then
//   query the first record whose `url` is the identity and render its count
// - **click**: one-way. Ignored once liked. Otherwise optimistic `liked`
//   and `count + 1`, then create the record (count 1) or atomically
//   increment it, and render the count the server reports
// - Remote failures are logged and swallowed; the optimistic state stays
//
// ## Prerequisites
//
// `app_id`, `app_key` and an SDK handle. Missing any of them the factory
// hands back the local provider.
//
// ## Security Requirements
//
// - App key NEVER appears in logs

mod sdk;

pub use sdk::{LeanCloudSdk, ObjectStore, RemoteLikeRecord, SdkSettings};

use async_trait::async_trait;
use like_core::config::ProviderConfig;
use like_core::providers::LocalProvider;
use like_core::traits::{LikeProvider, LikeProviderFactory, LikeTarget};
use like_core::{LikeWidget, ProviderRegistry, Result};
use std::sync::{Arc, Mutex, PoisonError};

/// Name the provider is registered under
pub const PROVIDER_NAME: &str = "leancloud";

/// Like provider backed by a LeanCloud object store
pub struct LeanCloudProvider {
    store: Arc<dyn ObjectStore>,
    class_name: String,
    title: String,
    /// Remote record id, known after a successful query or create
    object_id: Mutex<Option<String>>,
}

impl LeanCloudProvider {
    /// Create a provider for one widget
    ///
    /// `store` must already be initialized.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        class_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            store,
            class_name: class_name.into(),
            title: title.into(),
            object_id: Mutex::new(None),
        }
    }

    fn object_id(&self) -> Option<String> {
        self.object_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn remember(&self, object_id: String) {
        *self.object_id.lock().unwrap_or_else(PoisonError::into_inner) = Some(object_id);
    }

    /// Create or increment the remote record, returning the server count
    async fn record_like(&self, widget: &LikeWidget) -> Result<Option<u64>> {
        let url = widget.identity().as_str();

        match self.object_id() {
            Some(object_id) => self.store.increment(&self.class_name, &object_id, 1).await,
            None => {
                let title = if self.title.is_empty() { url } else { self.title.as_str() };
                let record = self.store.create(&self.class_name, url, title).await?;
                let count = record.count;
                self.remember(record.object_id);
                Ok(Some(count))
            }
        }
    }
}

#[async_trait]
impl LikeProvider for LeanCloudProvider {
    async fn bind(&self, widget: &LikeWidget) {
        widget.seed_liked_only();

        match self
            .store
            .find_first(&self.class_name, widget.identity().as_str())
            .await
        {
            Ok(Some(record)) => {
                tracing::debug!(
                    "Found LeanCloud record {} for {} (count={})",
                    record.object_id,
                    widget.identity(),
                    record.count
                );
                self.remember(record.object_id);
                widget.reconcile_count(record.count);
            }
            Ok(None) => {
                tracing::debug!("No LeanCloud record for {} yet", widget.identity());
                widget.reconcile_count(0);
            }
            Err(e) => {
                tracing::warn!("LeanCloud query for {} failed: {}", widget.identity(), e);
                widget.render();
            }
        }
    }

    async fn on_click(&self, widget: &LikeWidget) {
        let Some(optimistic) = widget.begin_like() else {
            return;
        };

        match self.record_like(widget).await {
            Ok(Some(count)) => {
                tracing::debug!(
                    "LeanCloud like saved for {}: count {} -> {}",
                    widget.identity(),
                    optimistic.count,
                    count
                );
                widget.reconcile_count(count);
            }
            Ok(None) => {
                tracing::debug!("LeanCloud like saved for {} without a count", widget.identity());
            }
            Err(e) => {
                tracing::warn!("LeanCloud like for {} failed: {}", widget.identity(), e);
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating LeanCloud providers
pub struct LeanCloudFactory {
    sdk: Option<Arc<dyn ObjectStore>>,
}

impl Default for LeanCloudFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LeanCloudFactory {
    /// Factory over the process-wide SDK handle
    pub fn new() -> Self {
        let sdk: Arc<dyn ObjectStore> = LeanCloudSdk::global();
        Self { sdk: Some(sdk) }
    }

    /// Factory over a specific object store
    pub fn with_sdk(sdk: Arc<dyn ObjectStore>) -> Self {
        Self { sdk: Some(sdk) }
    }

    /// Factory with no SDK available; always yields the local provider
    pub fn without_sdk() -> Self {
        Self { sdk: None }
    }
}

impl LikeProviderFactory for LeanCloudFactory {
    fn create(
        &self,
        config: &ProviderConfig,
        target: &LikeTarget,
    ) -> Result<Box<dyn LikeProvider>> {
        let (Some(app_id), Some(app_key), Some(sdk)) =
            (config.app_id(), config.app_key(), self.sdk.as_ref())
        else {
            tracing::debug!(
                "LeanCloud prerequisites missing for {}, using local",
                target.identity
            );
            return Ok(Box::new(LocalProvider::new()));
        };

        sdk.init(SdkSettings::new(app_id, app_key, config.server_url()));

        Ok(Box::new(LeanCloudProvider::new(
            Arc::clone(sdk),
            config.class_name(),
            target.title.clone(),
        )))
    }
}

/// Register the LeanCloud provider with a registry
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(LeanCloudFactory::new()));
}
