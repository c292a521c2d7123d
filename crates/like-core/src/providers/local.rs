// # Local-only Provider
//
// Toggles indefinitely between liked and not-liked, keeping both the flag
// and an advisory count in local storage. Touches no remote resource.
//
// ```text
// {not-liked} --click--> {liked} --click--> {not-liked} ...
// ```
//
// Remote factories return this provider when their prerequisites are
// missing, so it has to work standalone.

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::traits::{LikeProvider, LikeProviderFactory, LikeTarget};
use crate::widget::LikeWidget;
use crate::Result;

/// Provider backed only by local storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LikeProvider for LocalProvider {
    async fn bind(&self, widget: &LikeWidget) {
        let state = widget.seed_from_storage();
        tracing::debug!(
            "Bound local like widget {} (liked={}, count={})",
            widget.identity(),
            state.liked,
            state.count
        );
    }

    async fn on_click(&self, widget: &LikeWidget) {
        let state = widget.toggle();
        tracing::debug!(
            "Local like toggled for {}: liked={}, count={}",
            widget.identity(),
            state.liked,
            state.count
        );
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}

/// Factory for the local provider
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFactory;

impl LikeProviderFactory for LocalFactory {
    fn create(
        &self,
        _config: &ProviderConfig,
        _target: &LikeTarget,
    ) -> Result<Box<dyn LikeProvider>> {
        Ok(Box::new(LocalProvider::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LikeSettings;
    use crate::dom::{HeadlessButton, HeadlessCount};
    use crate::model::{LikeIdentity, LikeState};
    use crate::render::LIKED_CLASS;
    use crate::storage::{LocalPersistence, MemoryBackend};
    use crate::traits::StorageBackend;
    use std::sync::Arc;

    fn widget(backend: &MemoryBackend) -> (LikeWidget, Arc<HeadlessButton>, Arc<HeadlessCount>) {
        let button = Arc::new(HeadlessButton::new());
        let count = Arc::new(HeadlessCount::new());
        let widget = LikeWidget::new(
            LikeIdentity::new("/posts/a"),
            "Post A",
            LocalPersistence::new(Arc::new(backend.clone()), &LikeSettings::default()),
            button.clone(),
            Some(count.clone()),
        );
        (widget, button, count)
    }

    #[tokio::test]
    async fn bind_renders_seeded_state() {
        let backend = MemoryBackend::new();
        backend.set_item("hexo-like:/posts/a", "1").unwrap();
        backend.set_item("hexo-like:/posts/a:count", "4").unwrap();
        let (widget, button, count) = widget(&backend);

        LocalProvider.bind(&widget).await;

        assert_eq!(widget.state(), LikeState::new(true, 4));
        assert!(button.has_class(LIKED_CLASS));
        assert_eq!(count.text().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn click_toggles_and_persists() {
        let backend = MemoryBackend::new();
        let (widget, button, count) = widget(&backend);
        LocalProvider.bind(&widget).await;

        LocalProvider.on_click(&widget).await;
        assert_eq!(widget.state(), LikeState::new(true, 1));
        assert_eq!(backend.get_item("hexo-like:/posts/a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.get_item("hexo-like:/posts/a:count").unwrap().as_deref(), Some("1"));

        LocalProvider.on_click(&widget).await;
        assert_eq!(widget.state(), LikeState::new(false, 0));
        assert!(!button.has_class(LIKED_CLASS));
        assert_eq!(count.text().as_deref(), Some("0"));
        assert_eq!(backend.get_item("hexo-like:/posts/a").unwrap().as_deref(), Some("0"));
    }
}
