//! Contract Test: One-shot Binding
//!
//! Constraints verified:
//! - Re-running the entry point after a page transition never double-binds
//! - Missing container or button means nothing is bound
//! - A missing count element is tolerated
//! - A bound widget is already seeded, so later clicks are never
//!   overwritten by seeding, even without working storage

mod common;

use common::*;
use like_core::binding::BOUND_MARKER;
use like_core::dom::HeadlessContainer;
use like_core::storage::{DisabledBackend, MemoryBackend};
use like_core::{
    LikeBinder, LikeContainer, LikeSettings, LikeState, LocalPersistence, ProviderRegistry,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn second_init_is_a_no_op() {
    let backend = MemoryBackend::new();
    let factory = ScriptedFactory::new(0);
    let created = factory.created.clone();
    let registry = ProviderRegistry::new();
    registry.register_provider("scripted", Box::new(factory));
    let binder = binder(&backend, registry);
    let container = container("scripted");

    let first = binder.init_post_like(Some(&container as &dyn LikeContainer)).await;
    let second = binder.init_post_like(Some(&container as &dyn LikeContainer)).await;

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert_eq!(
        container.headless_button().unwrap().snapshot().data.get(BOUND_MARKER).map(String::as_str),
        Some("1")
    );
}

#[tokio::test]
async fn nothing_to_bind() {
    let backend = MemoryBackend::new();
    let binder = binder(&backend, ProviderRegistry::new());

    assert!(binder.init_post_like(None).await.is_none());

    let buttonless = HeadlessContainer::new().without_button();
    assert!(
        binder
            .init_post_like(Some(&buttonless as &dyn LikeContainer))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn count_element_is_optional() {
    let backend = MemoryBackend::new();
    let binder = binder(&backend, ProviderRegistry::new());
    let container = HeadlessContainer::new().without_count();

    let bound = binder
        .init_post_like(Some(&container as &dyn LikeContainer))
        .await
        .unwrap();
    bound.click().await;

    assert_eq!(bound.widget().state(), LikeState::new(true, 1));
    assert!(container.headless_button().unwrap().has_class("is-liked"));
}

#[tokio::test]
async fn identity_defaults_to_page_path() {
    let backend = MemoryBackend::new();
    let binder = binder(&backend, ProviderRegistry::new());
    let container = HeadlessContainer::new();

    let bound = binder
        .init_post_like(Some(&container as &dyn LikeContainer))
        .await
        .unwrap();

    assert_eq!(bound.widget().identity().as_str(), "/posts/a");
    assert_eq!(bound.widget().title(), "Blog Post");
}

#[tokio::test]
async fn clicks_after_bind_survive_rebinding_without_storage() {
    let binder = LikeBinder::new(
        Arc::new(ProviderRegistry::new()),
        LocalPersistence::new(Arc::new(DisabledBackend), &LikeSettings::default()),
        page("/posts/a"),
    );
    let container = container("local");

    let bound = binder
        .init_post_like(Some(&container as &dyn LikeContainer))
        .await
        .unwrap();
    bound.click().await;

    let again = binder.init_post_like(Some(&container as &dyn LikeContainer)).await;

    assert!(again.is_none());
    assert_eq!(bound.widget().state(), LikeState::new(true, 1));
    assert!(container.headless_button().unwrap().has_class("is-liked"));
    assert_eq!(container.headless_count().unwrap().text().as_deref(), Some("1"));
}
