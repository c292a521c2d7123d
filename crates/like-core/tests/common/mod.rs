//! Test doubles and common utilities for like-core contract tests

#![allow(dead_code)]

use async_trait::async_trait;
use like_core::config::attrs;
use like_core::dom::HeadlessContainer;
use like_core::storage::MemoryBackend;
use like_core::{
    LikeBinder, LikeProvider, LikeProviderFactory, LikeSettings, LikeTarget, LikeWidget,
    LocalPersistence, PageContext, ProviderConfig, ProviderRegistry, Result,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ORIGIN: &str = "https://blog.example";

pub fn page(path: &str) -> PageContext {
    PageContext::new(ORIGIN, path, "Blog Post")
}

/// A binder over a shared memory backend
pub fn binder(backend: &MemoryBackend, registry: ProviderRegistry) -> LikeBinder {
    LikeBinder::new(
        Arc::new(registry),
        LocalPersistence::new(Arc::new(backend.clone()), &LikeSettings::default()),
        page("/posts/a"),
    )
}

/// Container for `/posts/a` with the given provider name
pub fn container(provider: &str) -> HeadlessContainer {
    HeadlessContainer::new()
        .with_attribute(attrs::ID, "/posts/a")
        .with_attribute(attrs::PROVIDER, provider)
}

/// Remote-style provider with a fixed server answer
///
/// Follows the remote contract: liked seeded from storage, count from the
/// "server", one-way likes.
pub struct ScriptedRemote {
    pub server_count: u64,
    pub writes: Arc<AtomicUsize>,
}

#[async_trait]
impl LikeProvider for ScriptedRemote {
    async fn bind(&self, widget: &LikeWidget) {
        widget.seed_liked_only();
        tokio::task::yield_now().await;
        widget.reconcile_count(self.server_count);
    }

    async fn on_click(&self, widget: &LikeWidget) {
        if widget.begin_like().is_none() {
            return;
        }
        tokio::task::yield_now().await;
        let total = self.writes.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        widget.reconcile_count(self.server_count + total);
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Factory for [`ScriptedRemote`] that counts how often it was asked
pub struct ScriptedFactory {
    pub server_count: u64,
    pub writes: Arc<AtomicUsize>,
    pub created: Arc<AtomicUsize>,
}

impl ScriptedFactory {
    pub fn new(server_count: u64) -> Self {
        Self {
            server_count,
            writes: Arc::new(AtomicUsize::new(0)),
            created: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl LikeProviderFactory for ScriptedFactory {
    fn create(
        &self,
        _config: &ProviderConfig,
        _target: &LikeTarget,
    ) -> Result<Box<dyn LikeProvider>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedRemote {
            server_count: self.server_count,
            writes: Arc::clone(&self.writes),
        }))
    }
}
