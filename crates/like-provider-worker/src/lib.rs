// # Worker Like Provider
//
// Talks to a small HTTP counter service (typically a serverless worker):
//
// - GET `<endpoint>?url=<id>&title=<title>` returns `{"count": n}`
// - POST to the same URL records one like and returns `{"count": n}`
//
// An optional token is sent as `X-Like-Token` on both requests.
//
// ## Behavior
//
// Same contract as every remote provider: `liked` seeded from local
// storage, count 0 until the server answers, one-way likes, optimistic
// rendering, failures logged and swallowed. The HTTP status is not
// consulted: any JSON body with a numeric `count` is used, and a body
// without one leaves the rendered count alone.
//
// ## Security Requirements
//
// - Token NEVER appears in logs

mod endpoint;

pub use endpoint::build_endpoint;

use async_trait::async_trait;
use like_core::config::ProviderConfig;
use like_core::model::count_from_json;
use like_core::providers::LocalProvider;
use like_core::traits::{LikeProvider, LikeProviderFactory, LikeTarget};
use like_core::{Error, LikeWidget, ProviderRegistry, Result};
use serde_json::Value;
use std::fmt;
use url::Url;

/// Name the provider is registered under
pub const PROVIDER_NAME: &str = "worker";

/// Alias accepted for the same provider
pub const PROVIDER_ALIAS: &str = "cloudflare";

/// Header carrying the optional shared token
pub const TOKEN_HEADER: &str = "X-Like-Token";

/// Like provider backed by an HTTP counter endpoint
pub struct WorkerProvider {
    client: reqwest::Client,
    url: Url,
    /// ⚠️ NEVER log this value
    token: Option<String>,
}

// Custom Debug implementation that hides the token
impl fmt::Debug for WorkerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerProvider")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl WorkerProvider {
    /// Create a provider for one resolved endpoint URL
    pub fn new(client: reqwest::Client, url: Url, token: Option<String>) -> Self {
        Self { client, url, token }
    }

    /// The per-widget request URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one request and read `count` from the response
    async fn request(&self, method: reqwest::Method) -> Result<Option<u64>> {
        let mut builder = self.client.request(method.clone(), self.url.clone());
        if let Some(token) = &self.token {
            builder = builder.header(TOKEN_HEADER, token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::http(format!("{} {} failed: {}", method, self.url, e)))?;

        // The body decides, whatever the status: a numeric `count` is used
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Worker {} returned status {}", method, status);
        }

        let json: Value = response.json().await.map_err(|e| {
            Error::provider(
                PROVIDER_NAME,
                format!("Failed to parse {} response ({}): {}", method, status, e),
            )
        })?;

        Ok(count_from_json(&json["count"]))
    }
}

#[async_trait]
impl LikeProvider for WorkerProvider {
    async fn bind(&self, widget: &LikeWidget) {
        widget.seed_liked_only();

        match self.request(reqwest::Method::GET).await {
            Ok(Some(count)) => {
                tracing::debug!("Worker count for {}: {}", widget.identity(), count);
                widget.reconcile_count(count);
            }
            Ok(None) => {
                tracing::debug!("Worker response for {} has no count", widget.identity());
                widget.render();
            }
            Err(e) => {
                tracing::warn!("Worker count fetch for {} failed: {}", widget.identity(), e);
                widget.render();
            }
        }
    }

    async fn on_click(&self, widget: &LikeWidget) {
        if widget.begin_like().is_none() {
            return;
        }

        match self.request(reqwest::Method::POST).await {
            Ok(Some(count)) => {
                tracing::debug!("Worker like saved for {}: count={}", widget.identity(), count);
                widget.reconcile_count(count);
            }
            Ok(None) => {
                tracing::debug!("Worker like saved for {} without a count", widget.identity());
            }
            Err(e) => {
                tracing::warn!("Worker like for {} failed: {}", widget.identity(), e);
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating worker providers
///
/// Holds one HTTP client shared by every provider it creates.
/// A factory without a client stands for an environment that cannot make
/// HTTP requests and always yields the local provider.
pub struct WorkerFactory {
    client: Option<reqwest::Client>,
}

impl Default for WorkerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerFactory {
    pub fn new() -> Self {
        Self {
            client: Some(reqwest::Client::new()),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn without_client() -> Self {
        Self { client: None }
    }
}

impl LikeProviderFactory for WorkerFactory {
    fn create(
        &self,
        config: &ProviderConfig,
        target: &LikeTarget,
    ) -> Result<Box<dyn LikeProvider>> {
        let Some(client) = &self.client else {
            tracing::debug!("No HTTP client for worker provider, using local");
            return Ok(Box::new(LocalProvider::new()));
        };

        let Some(endpoint) = config.endpoint() else {
            tracing::debug!("Worker endpoint missing for {}, using local", target.identity);
            return Ok(Box::new(LocalProvider::new()));
        };

        let identity = target.identity.as_str();
        let Some(url) = build_endpoint(endpoint, identity, &target.title, &target.origin) else {
            tracing::warn!("Worker endpoint '{}' is not a valid URL, using local", endpoint);
            return Ok(Box::new(LocalProvider::new()));
        };

        Ok(Box::new(WorkerProvider::new(
            client.clone(),
            url,
            config.token().map(str::to_string),
        )))
    }
}

/// Register the worker provider (and its alias) with a registry
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(WorkerFactory::new()));
    registry.register_provider(PROVIDER_ALIAS, Box::new(WorkerFactory::new()));
}
