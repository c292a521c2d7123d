//! Widget state shared by every provider
//!
//! A [`LikeWidget`] is created once per bound container and holds the
//! identity, the elements, the persistence handle and the [`LikeState`].
//! Providers never touch the elements directly: they call the helpers here,
//! each of which mutates the state and renders it under one lock, so a
//! render always shows a state that actually existed.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{LikeIdentity, LikeState};
use crate::render::render;
use crate::storage::LocalPersistence;
use crate::traits::{CountDisplay, LikeButton};

/// State and elements of one bound widget
pub struct LikeWidget {
    identity: LikeIdentity,
    title: String,
    persistence: LocalPersistence,
    button: Arc<dyn LikeButton>,
    count_display: Option<Arc<dyn CountDisplay>>,
    state: Mutex<LikeState>,
    rendered: watch::Sender<LikeState>,
}

impl fmt::Debug for LikeWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LikeWidget")
            .field("identity", &self.identity)
            .field("title", &self.title)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl LikeWidget {
    /// Create a widget in the not-liked, zero-count state
    ///
    /// Nothing is rendered until a provider seeds it.
    pub fn new(
        identity: LikeIdentity,
        title: impl Into<String>,
        persistence: LocalPersistence,
        button: Arc<dyn LikeButton>,
        count_display: Option<Arc<dyn CountDisplay>>,
    ) -> Self {
        let (rendered, _) = watch::channel(LikeState::default());
        Self {
            identity,
            title: title.into(),
            persistence,
            button,
            count_display,
            state: Mutex::new(LikeState::default()),
            rendered,
        }
    }

    pub fn identity(&self) -> &LikeIdentity {
        &self.identity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn persistence(&self) -> &LocalPersistence {
        &self.persistence
    }

    /// Current state
    pub fn state(&self) -> LikeState {
        *self.lock()
    }

    /// Stream of rendered states, starting with the latest one
    pub fn states(&self) -> WatchStream<LikeState> {
        WatchStream::new(self.rendered.subscribe())
    }

    /// Re-render the current state
    pub fn render(&self) {
        self.update(|_| ());
    }

    /// Seed both fields from local storage and render (local provider)
    pub fn seed_from_storage(&self) -> LikeState {
        let liked = self.persistence.load_liked(&self.identity);
        let count = self.persistence.load_count(&self.identity);
        self.update(|state| *state = LikeState::new(liked, count))
    }

    /// Seed only `liked` from local storage, count 0, and render
    ///
    /// Remote providers treat their store as the only count authority.
    pub fn seed_liked_only(&self) -> LikeState {
        let liked = self.persistence.load_liked(&self.identity);
        self.update(|state| *state = LikeState::new(liked, 0))
    }

    /// Toggle, persist both fields, render (local provider click)
    pub fn toggle(&self) -> LikeState {
        let mut guard = self.lock();
        guard.toggle();
        self.persistence.save_liked(&self.identity, guard.liked);
        self.persistence.save_count(&self.identity, guard.count);
        self.paint(*guard);
        *guard
    }

    /// Optimistic one-way like (remote provider click, phase 1)
    ///
    /// Returns `None` without touching anything when already liked.
    /// Otherwise sets `liked`, bumps `count`, persists the flag and renders.
    pub fn begin_like(&self) -> Option<LikeState> {
        let mut guard = self.lock();
        if guard.liked {
            return None;
        }
        guard.liked = true;
        guard.count = guard.count.saturating_add(1);
        self.persistence.save_liked(&self.identity, true);
        self.paint(*guard);
        Some(*guard)
    }

    /// Overwrite `count` with an authoritative value and render (phase 2)
    ///
    /// `liked` is never changed here.
    pub fn reconcile_count(&self, count: u64) -> LikeState {
        self.update(|state| state.count = count)
    }

    fn update(&self, apply: impl FnOnce(&mut LikeState)) -> LikeState {
        let mut guard = self.lock();
        apply(&mut guard);
        self.paint(*guard);
        *guard
    }

    fn paint(&self, state: LikeState) {
        render(state, self.button.as_ref(), self.count_display.as_deref());
        self.rendered.send_replace(state);
    }

    fn lock(&self) -> MutexGuard<'_, LikeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
