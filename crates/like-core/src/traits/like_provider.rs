// # Like Provider Trait
//
// One behavioral contract realized by several backing stores.
//
// ## Implementations
//
// - Local-only: `like_core::providers::LocalProvider`
// - Remote object store: `like-provider-leancloud` crate
// - Remote HTTP endpoint: `like-provider-worker` crate
//
// ## Two-phase updates
//
// Every provider splits its work at the first `.await`:
//
// 1. **Phase 1** (synchronous): seed or mutate the [`LikeWidget`] state,
//    persist locally, render. Authoritative for `liked`.
// 2. **Phase 2** (asynchronous, remote providers only): ask the remote
//    store, then overwrite `count` and render again. Never touches
//    `liked`, never surfaces an error.
//
// ```rust,ignore
// use like_core::LikeProvider;
//
// async fn handle_click(provider: &dyn LikeProvider, widget: &LikeWidget) {
//     // Optimistic state is rendered before this returns Pending
//     provider.on_click(widget).await;
// }
// ```

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::model::LikeIdentity;
use crate::widget::LikeWidget;

/// What a provider is being bound to
///
/// Resolved once at bind time and handed to factories so a provider can
/// fix anything derived from it (e.g. an endpoint URL) for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeTarget {
    /// The liked resource
    pub identity: LikeIdentity,
    /// Human-readable title (may be empty)
    pub title: String,
    /// Page origin used to resolve relative URLs, e.g. `https://blog.example`
    pub origin: String,
}

impl LikeTarget {
    /// Create a new target
    pub fn new(
        identity: impl Into<LikeIdentity>,
        title: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            title: title.into(),
            origin: origin.into(),
        }
    }
}

/// Trait for like provider implementations
///
/// A provider instance serves exactly one widget. It may keep
/// per-widget remote bookkeeping (such as a remote object id) but all
/// rendered state lives in the [`LikeWidget`].
///
/// # Error Handling
///
/// Neither method returns an error. Remote failures are logged and the
/// best-known local state stays rendered.
#[async_trait]
pub trait LikeProvider: Send + Sync {
    /// Seed the widget state, render it, then reconcile with the remote
    /// count if this provider has one
    async fn bind(&self, widget: &LikeWidget);

    /// Handle one click
    ///
    /// Phase 1 completes and is rendered before any remote call starts.
    async fn on_click(&self, widget: &LikeWidget);

    /// Provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing providers from configuration
pub trait LikeProviderFactory: Send + Sync {
    /// Create a provider for one widget
    ///
    /// Factories whose prerequisites are missing hand back a
    /// [`LocalProvider`](crate::providers::LocalProvider) instead of
    /// failing.
    fn create(
        &self,
        config: &ProviderConfig,
        target: &LikeTarget,
    ) -> Result<Box<dyn LikeProvider>, crate::Error>;
}
