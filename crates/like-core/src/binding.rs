//! Bind entry point
//!
//! Turns a container into a live widget exactly once. Hosts call
//! [`LikeBinder::init_post_like`] on page load and again after every
//! client-side page transition; the `data-bound` marker on the button makes
//! the repeat calls no-ops.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::{PageContext, WidgetAttributes};
use crate::registry::ProviderRegistry;
use crate::storage::LocalPersistence;
use crate::traits::{LikeContainer, LikeProvider, LikeTarget};
use crate::widget::LikeWidget;

/// Dataset key of the one-shot binding marker
pub const BOUND_MARKER: &str = "bound";

/// Binds containers on one page
pub struct LikeBinder {
    registry: Arc<ProviderRegistry>,
    persistence: LocalPersistence,
    page: PageContext,
}

impl LikeBinder {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        persistence: LocalPersistence,
        page: PageContext,
    ) -> Self {
        Self {
            registry,
            persistence,
            page,
        }
    }

    /// Bind a container and wait for bind-time reconciliation to settle
    ///
    /// Returns `None` when there is no container, no button, or the button
    /// is already bound.
    pub async fn init_post_like(
        &self,
        container: Option<&dyn LikeContainer>,
    ) -> Option<BoundWidget> {
        let bound = self.prepare(container?)?;
        bound.bind().await;
        Some(bound)
    }

    /// Claim a container and build its widget without binding it yet
    ///
    /// The binding marker is set here, so a second call for the same
    /// container returns `None` even before the first bind has run. The
    /// widget only leaves this module after its bind has seeded it.
    fn prepare(&self, container: &dyn LikeContainer) -> Option<BoundWidget> {
        let button = container.button()?;
        if button.data(BOUND_MARKER).as_deref() == Some("1") {
            tracing::trace!("Like button already bound, skipping");
            return None;
        }
        button.set_data(BOUND_MARKER, "1");

        let attrs = WidgetAttributes::from_container(container, &self.page);
        let target = LikeTarget {
            identity: attrs.identity.clone(),
            title: attrs.title.clone(),
            origin: self.page.origin.clone(),
        };
        let provider = self.registry.select(&attrs.provider, &target);

        let widget = LikeWidget::new(
            attrs.identity,
            attrs.title,
            self.persistence.clone(),
            button,
            container.count_display(),
        );

        Some(BoundWidget {
            provider: Arc::from(provider),
            widget: Arc::new(widget),
        })
    }
}

/// A widget wired to its provider
///
/// Cheap to clone; clones drive the same widget.
#[derive(Clone)]
pub struct BoundWidget {
    provider: Arc<dyn LikeProvider>,
    widget: Arc<LikeWidget>,
}

impl fmt::Debug for BoundWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundWidget")
            .field("provider", &self.provider.provider_name())
            .field("widget", &self.widget)
            .finish()
    }
}

impl BoundWidget {
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub fn widget(&self) -> &Arc<LikeWidget> {
        &self.widget
    }

    /// Seed, render and reconcile
    async fn bind(&self) {
        self.provider.bind(&self.widget).await;
    }

    /// Handle a click and wait for its remote phase to settle
    pub async fn click(&self) {
        self.provider.on_click(&self.widget).await;
    }

    /// Handle a click the way an event listener does: fire and forget
    pub fn spawn_click(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.click().await })
    }
}
