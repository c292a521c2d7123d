//! End-to-end behavior of the LeanCloud provider against a mock REST API

use like_core::config::attrs;
use like_core::dom::HeadlessContainer;
use like_core::storage::MemoryBackend;
use like_core::{
    LikeBinder, LikeSettings, LikeState, LocalPersistence, PageContext, ProviderRegistry,
    StorageBackend,
};
use like_provider_leancloud::{LeanCloudFactory, LeanCloudSdk, PROVIDER_NAME};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn binder(backend: &MemoryBackend) -> LikeBinder {
    let registry = ProviderRegistry::new();
    registry.register_provider(
        PROVIDER_NAME,
        Box::new(LeanCloudFactory::with_sdk(Arc::new(LeanCloudSdk::new()))),
    );
    LikeBinder::new(
        Arc::new(registry),
        LocalPersistence::new(Arc::new(backend.clone()), &LikeSettings::default()),
        PageContext::new("https://blog.example", "/posts/a", "Post A"),
    )
}

fn container(server: &MockServer) -> HeadlessContainer {
    HeadlessContainer::new()
        .with_attribute(attrs::PROVIDER, PROVIDER_NAME)
        .with_attribute(attrs::APP_ID, "app-id")
        .with_attribute(attrs::APP_KEY, "app-key")
        .with_attribute(attrs::SERVER_URL, &server.uri())
}

#[tokio::test]
async fn like_increments_existing_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/classes/PostLike"))
        .and(query_param("where", r#"{"url":"/posts/a"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "objectId": "obj1", "url": "/posts/a", "title": "Post A", "count": 5 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/1.1/classes/PostLike/obj1"))
        .and(body_json(json!({ "count": { "__op": "Increment", "amount": 1 } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "objectId": "obj1", "count": 8 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = MemoryBackend::new();
    let container = container(&server);
    let bound = binder(&backend).init_post_like(Some(&container)).await.unwrap();
    assert_eq!(bound.provider_name(), PROVIDER_NAME);
    assert_eq!(bound.widget().state(), LikeState::new(false, 5));

    bound.click().await;
    // Already liked: no second request
    bound.click().await;

    assert_eq!(bound.widget().state(), LikeState::new(true, 8));
    assert_eq!(
        container.headless_count().unwrap().history(),
        vec!["0", "5", "6", "8"]
    );
    assert_eq!(backend.get_item("hexo-like:/posts/a").unwrap().as_deref(), Some("1"));
    // Remote providers never store a local count
    assert_eq!(backend.get_item("hexo-like:/posts/a:count").unwrap(), None);
}

#[tokio::test]
async fn first_like_creates_record_in_custom_class() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/classes/Likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/classes/Likes"))
        .and(body_json(json!({ "url": "/posts/a", "title": "Post A", "count": 1 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "objectId": "new1" })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = MemoryBackend::new();
    let container = container(&server).with_attribute(attrs::CLASS_NAME, "Likes");
    let bound = binder(&backend).init_post_like(Some(&container)).await.unwrap();

    bound.click().await;

    assert_eq!(bound.widget().state(), LikeState::new(true, 1));
}

#[tokio::test]
async fn server_errors_leave_optimistic_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = MemoryBackend::new();
    let container = container(&server);
    let bound = binder(&backend).init_post_like(Some(&container)).await.unwrap();
    assert_eq!(bound.widget().state(), LikeState::new(false, 0));

    bound.click().await;

    assert_eq!(bound.widget().state(), LikeState::new(true, 1));
    assert!(container.headless_button().unwrap().has_class("is-liked"));
}

#[tokio::test]
async fn missing_app_id_behaves_like_local() {
    let backend = MemoryBackend::new();
    let container = HeadlessContainer::new()
        .with_attribute(attrs::PROVIDER, PROVIDER_NAME)
        .with_attribute(attrs::APP_KEY, "app-key");
    let bound = binder(&backend).init_post_like(Some(&container)).await.unwrap();

    assert_eq!(bound.provider_name(), "local");

    bound.click().await;
    bound.click().await;

    assert_eq!(bound.widget().state(), LikeState::new(false, 0));
}
