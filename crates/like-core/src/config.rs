//! Configuration types for the like system
//!
//! - [`ProviderConfig`]: which provider a widget uses and its parameters
//! - [`LikeSettings`]: settings shared by every widget on a page
//! - [`PageContext`]: facts about the hosting page
//! - [`WidgetAttributes`]: the markup contract read off a container

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::LikeIdentity;
use crate::traits::LikeContainer;

/// Default storage key namespace
pub const DEFAULT_NAMESPACE: &str = "hexo-like";

/// Default provider name
pub const DEFAULT_PROVIDER: &str = "local";

/// Default remote object store class
pub const DEFAULT_CLASS_NAME: &str = "PostLike";

/// Markup attribute names
pub mod attrs {
    pub const ID: &str = "data-like-id";
    pub const TITLE: &str = "data-like-title";
    pub const PROVIDER: &str = "data-like-provider";
    pub const APP_ID: &str = "data-like-app-id";
    pub const APP_KEY: &str = "data-like-app-key";
    pub const SERVER_URL: &str = "data-like-server-url";
    pub const CLASS_NAME: &str = "data-like-class-name";
    pub const ENDPOINT: &str = "data-like-endpoint";
    pub const TOKEN: &str = "data-like-token";
}

/// Provider configuration
///
/// Resolved once at bind time. Fields that the selected provider does not
/// use are ignored, never validated. Empty strings count as absent.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (`local`, `leancloud`, `worker`, `cloudflare`)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Object store application id
    #[serde(default)]
    pub app_id: Option<String>,

    /// Object store application key
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub app_key: Option<String>,

    /// Object store server URL
    #[serde(default)]
    pub server_url: Option<String>,

    /// Object store class holding like records
    #[serde(default = "default_class_name")]
    pub class_name: String,

    /// HTTP endpoint (absolute, or relative to the page origin)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Opaque token forwarded verbatim to the endpoint
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub token: Option<String>,
}

// Custom Debug implementation that hides credentials
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("app_id", &self.app_id)
            .field("app_key", &self.app_key.as_ref().map(|_| "<REDACTED>"))
            .field("server_url", &self.server_url)
            .field("class_name", &self.class_name)
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration selecting the named provider
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            app_id: None,
            app_key: None,
            server_url: None,
            class_name: default_class_name(),
            endpoint: None,
            token: None,
        }
    }

    /// Set object store credentials
    pub fn with_credentials(
        mut self,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        self.app_id = Some(app_id.into());
        self.app_key = Some(app_key.into());
        self
    }

    /// Set the object store server URL
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    /// Set the object store class name
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the HTTP endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the endpoint token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Provider name used for selection
    pub fn provider_name(&self) -> &str {
        match self.provider.trim() {
            "" => DEFAULT_PROVIDER,
            name => name,
        }
    }

    /// Application id, if present and non-empty
    pub fn app_id(&self) -> Option<&str> {
        non_empty(&self.app_id)
    }

    /// Application key, if present and non-empty
    pub fn app_key(&self) -> Option<&str> {
        non_empty(&self.app_key)
    }

    /// Server URL, if present and non-empty
    pub fn server_url(&self) -> Option<&str> {
        non_empty(&self.server_url)
    }

    /// Class name, falling back to the default when blank
    pub fn class_name(&self) -> &str {
        match self.class_name.trim() {
            "" => DEFAULT_CLASS_NAME,
            name => name,
        }
    }

    /// Endpoint, if present and non-empty
    pub fn endpoint(&self) -> Option<&str> {
        non_empty(&self.endpoint)
    }

    /// Token, if present and non-empty
    pub fn token(&self) -> Option<&str> {
        non_empty(&self.token)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

/// Settings shared by all widgets on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeSettings {
    /// Prefix of every local storage key
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for LikeSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Facts about the hosting page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Current path, the default like identity
    pub path: String,
    /// Document title, the default like title
    pub title: String,
    /// Origin used to resolve relative endpoints
    pub origin: String,
}

impl PageContext {
    /// Create a page context
    pub fn new(
        origin: impl Into<String>,
        path: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            origin: origin.into(),
        }
    }
}

/// Everything the markup contract says about one widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetAttributes {
    /// Liked resource, defaults to the page path
    pub identity: LikeIdentity,
    /// Title, defaults to the document title
    pub title: String,
    /// Provider selection and parameters
    pub provider: ProviderConfig,
}

impl WidgetAttributes {
    /// Read the markup contract off a container
    pub fn from_container(container: &dyn LikeContainer, page: &PageContext) -> Self {
        let attr = |name: &str| {
            container
                .attribute(name)
                .filter(|value| !value.trim().is_empty())
        };

        let provider = ProviderConfig {
            provider: attr(attrs::PROVIDER).unwrap_or_else(default_provider),
            app_id: attr(attrs::APP_ID),
            app_key: attr(attrs::APP_KEY),
            server_url: attr(attrs::SERVER_URL),
            class_name: attr(attrs::CLASS_NAME).unwrap_or_else(default_class_name),
            endpoint: attr(attrs::ENDPOINT),
            token: attr(attrs::TOKEN),
        };

        Self {
            identity: LikeIdentity::new(attr(attrs::ID).unwrap_or_else(|| page.path.clone())),
            title: attr(attrs::TITLE).unwrap_or_else(|| page.title.clone()),
            provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HeadlessContainer;

    fn page() -> PageContext {
        PageContext::new("https://blog.example", "/posts/a", "Post A")
    }

    #[test]
    fn attributes_default_to_page_facts() {
        let container = HeadlessContainer::new();
        let attrs = WidgetAttributes::from_container(&container, &page());

        assert_eq!(attrs.identity.as_str(), "/posts/a");
        assert_eq!(attrs.title, "Post A");
        assert_eq!(attrs.provider.provider_name(), "local");
        assert_eq!(attrs.provider.class_name(), "PostLike");
        assert!(attrs.provider.endpoint().is_none());
    }

    #[test]
    fn attributes_override_defaults() {
        let container = HeadlessContainer::new()
            .with_attribute(attrs::ID, "post-42")
            .with_attribute(attrs::TITLE, "Hello")
            .with_attribute(attrs::PROVIDER, "worker")
            .with_attribute(attrs::ENDPOINT, "/api/like")
            .with_attribute(attrs::TOKEN, "t0k3n")
            .with_attribute(attrs::CLASS_NAME, "");

        let attrs = WidgetAttributes::from_container(&container, &page());

        assert_eq!(attrs.identity.as_str(), "post-42");
        assert_eq!(attrs.title, "Hello");
        assert_eq!(attrs.provider.provider_name(), "worker");
        assert_eq!(attrs.provider.endpoint(), Some("/api/like"));
        assert_eq!(attrs.provider.token(), Some("t0k3n"));
        assert_eq!(attrs.provider.class_name(), "PostLike");
    }

    #[test]
    fn blank_values_count_as_absent() {
        let config = ProviderConfig::new("  ").with_credentials("", " ");
        assert_eq!(config.provider_name(), "local");
        assert!(config.app_id().is_none());
        assert!(config.app_key().is_none());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ProviderConfig = serde_json::from_str(r#"{"endpoint": "/like"}"#).unwrap();
        assert_eq!(config.provider_name(), "local");
        assert_eq!(config.class_name(), "PostLike");
        assert_eq!(config.endpoint(), Some("/like"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ProviderConfig::new("leancloud")
            .with_credentials("app", "secret-key-123")
            .with_token("secret-token-456");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret-key-123"));
        assert!(!debug_str.contains("secret-token-456"));
        assert!(debug_str.contains("<REDACTED>"));
    }
}
