// # LeanCloud SDK Handle
//
// The "client SDK" the object store provider talks through.
//
// ## Init-once
//
// Like the browser SDK, a handle is initialized once per process with the
// first credentials it sees. Later `init` calls are ignored, so binding
// many widgets on one page never re-initializes it. `LeanCloudSdk::global()`
// is that process-wide handle.
//
// ## API Reference
//
// - Query: GET `/1.1/classes/:class?where={"url":..}&limit=1`
// - Create: POST `/1.1/classes/:class`
// - Increment: PUT `/1.1/classes/:class/:objectId?fetchWhenSave=true`
//   with `{"count": {"__op": "Increment", "amount": 1}}`

use async_trait::async_trait;
use like_core::model::count_from_json;
use like_core::{Error, Result};
use serde_json::{Value, json};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Credentials and location used to initialize the SDK
#[derive(Clone, PartialEq, Eq)]
pub struct SdkSettings {
    pub app_id: String,
    /// ⚠️ NEVER log this value
    pub app_key: String,
    pub server_url: String,
}

// Custom Debug implementation that hides the app key
impl fmt::Debug for SdkSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkSettings")
            .field("app_id", &self.app_id)
            .field("app_key", &"<REDACTED>")
            .field("server_url", &self.server_url)
            .finish()
    }
}

impl SdkSettings {
    /// Build settings, deriving the regional server when none is given
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        server_url: Option<&str>,
    ) -> Self {
        let app_id = app_id.into();
        let server_url = match server_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => default_server_url(&app_id),
        };
        Self {
            app_id,
            app_key: app_key.into(),
            server_url,
        }
    }
}

/// Shared API domain LeanCloud assigns from the app id prefix
fn default_server_url(app_id: &str) -> String {
    let prefix: String = app_id.chars().take(8).collect::<String>().to_lowercase();
    format!("https://{}.api.lncldglobal.com", prefix)
}

/// A like record as stored remotely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLikeRecord {
    pub object_id: String,
    pub url: String,
    pub title: String,
    pub count: u64,
}

impl RemoteLikeRecord {
    fn from_json(json: &Value) -> Result<Self> {
        let object_id = json["objectId"]
            .as_str()
            .ok_or_else(|| {
                Error::provider("leancloud", "Invalid response format: objectId is not a string")
            })?;

        Ok(Self {
            object_id: object_id.to_string(),
            url: json["url"].as_str().unwrap_or_default().to_string(),
            title: json["title"].as_str().unwrap_or_default().to_string(),
            count: count_from_json(&json["count"]).unwrap_or(0),
        })
    }
}

/// Operations the provider needs from an object store
///
/// # Trust Level: Untrusted
///
/// One request per call, no retries, no caching. Failures are returned;
/// the provider decides what to do with them.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Initialize with credentials unless already initialized
    ///
    /// Returns `true` only for the call that actually initialized.
    fn init(&self, settings: SdkSettings) -> bool;

    /// First record of `class_name` whose `url` equals `url`
    async fn find_first(&self, class_name: &str, url: &str) -> Result<Option<RemoteLikeRecord>>;

    /// Create a record with `count` seeded to 1
    async fn create(&self, class_name: &str, url: &str, title: &str) -> Result<RemoteLikeRecord>;

    /// Atomically add `amount` to a record's count
    ///
    /// Returns the server's count after the increment when it reports one.
    async fn increment(
        &self,
        class_name: &str,
        object_id: &str,
        amount: u64,
    ) -> Result<Option<u64>>;
}

/// LeanCloud REST implementation of [`ObjectStore`]
pub struct LeanCloudSdk {
    settings: OnceLock<SdkSettings>,
    client: reqwest::Client,
}

impl fmt::Debug for LeanCloudSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeanCloudSdk")
            .field("settings", &self.settings.get())
            .finish()
    }
}

impl Default for LeanCloudSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl LeanCloudSdk {
    /// Create an uninitialized handle
    pub fn new() -> Self {
        Self {
            settings: OnceLock::new(),
            client: reqwest::Client::new(),
        }
    }

    /// The process-wide handle
    pub fn global() -> Arc<LeanCloudSdk> {
        static GLOBAL: OnceLock<Arc<LeanCloudSdk>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(LeanCloudSdk::new())))
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.get().is_some()
    }

    fn settings(&self) -> Result<&SdkSettings> {
        self.settings
            .get()
            .ok_or_else(|| Error::provider("leancloud", "SDK used before init"))
    }

    fn class_url(&self, class_name: &str) -> Result<String> {
        Ok(format!("{}/1.1/classes/{}", self.settings()?.server_url, class_name))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> Result<reqwest::RequestBuilder> {
        let settings = self.settings()?;
        Ok(self
            .client
            .request(method, url)
            .header("X-LC-Id", &settings.app_id)
            .header("X-LC-Key", &settings.app_key)
            .header("Content-Type", "application/json"))
    }

    async fn send(&self, builder: reqwest::RequestBuilder, action: &str) -> Result<Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| Error::provider("leancloud", format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(match status.as_u16() {
                401 | 403 => Error::provider(
                    "leancloud",
                    format!("Authentication failed: check app id and key. Status: {}", status),
                ),
                404 => Error::not_found(format!("{} target not found: {}", action, error_text)),
                429 => Error::provider(
                    "leancloud",
                    format!("Rate limit exceeded. Status: {}", status),
                ),
                500..=599 => Error::provider(
                    "leancloud",
                    format!("LeanCloud server error (transient): {} - {}", status, error_text),
                ),
                _ => Error::provider(
                    "leancloud",
                    format!("{} failed: {} - {}", action, status, error_text),
                ),
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::provider("leancloud", format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ObjectStore for LeanCloudSdk {
    fn init(&self, settings: SdkSettings) -> bool {
        let initialized = self.settings.set(settings).is_ok();
        if initialized {
            tracing::debug!("LeanCloud SDK initialized");
        }
        initialized
    }

    async fn find_first(&self, class_name: &str, url: &str) -> Result<Option<RemoteLikeRecord>> {
        let where_clause = json!({ "url": url }).to_string();
        let builder = self
            .request(reqwest::Method::GET, &self.class_url(class_name)?)?
            .query(&[("where", where_clause.as_str()), ("limit", "1")]);

        let json = self.send(builder, "Query").await?;
        let results = json["results"]
            .as_array()
            .ok_or_else(|| {
                Error::provider("leancloud", "Invalid response format: results is not an array")
            })?;

        results.first().map(RemoteLikeRecord::from_json).transpose()
    }

    async fn create(&self, class_name: &str, url: &str, title: &str) -> Result<RemoteLikeRecord> {
        let body = json!({ "url": url, "title": title, "count": 1 });
        let builder = self
            .request(reqwest::Method::POST, &self.class_url(class_name)?)?
            .json(&body);

        let json = self.send(builder, "Create").await?;
        let object_id = json["objectId"]
            .as_str()
            .ok_or_else(|| {
                Error::provider("leancloud", "Invalid response format: objectId is not a string")
            })?;

        Ok(RemoteLikeRecord {
            object_id: object_id.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            count: 1,
        })
    }

    async fn increment(
        &self,
        class_name: &str,
        object_id: &str,
        amount: u64,
    ) -> Result<Option<u64>> {
        let url = format!("{}/{}", self.class_url(class_name)?, object_id);
        let body = json!({ "count": { "__op": "Increment", "amount": amount } });
        let builder = self
            .request(reqwest::Method::PUT, &url)?
            .query(&[("fetchWhenSave", "true")])
            .json(&body);

        let json = self.send(builder, "Increment").await?;
        Ok(count_from_json(&json["count"]))
    }
}
