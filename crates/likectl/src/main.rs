// # likectl - Like Widget Driver
//
// Binds one like widget over headless elements, performs a number of
// clicks and prints the final state as JSON. Useful for exercising a
// provider setup (credentials, endpoint, storage) from a shell.
//
// This is a THIN integration layer: all like behavior lives in
// like-core and the provider crates.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Widget
// - `LIKE_ID`: Liked identity (default `/`)
// - `LIKE_TITLE`: Title sent to remote stores
// - `LIKE_ORIGIN`: Page origin for relative endpoints (default `http://localhost`)
// - `LIKE_CLICKS`: Number of clicks to perform (default 1)
//
// ### Provider
// - `LIKE_PROVIDER`: local, leancloud, worker, cloudflare (default local)
// - `LIKE_APP_ID`, `LIKE_APP_KEY`, `LIKE_SERVER_URL`, `LIKE_CLASS_NAME`: LeanCloud
// - `LIKE_ENDPOINT`, `LIKE_TOKEN`: worker
//
// ### Storage
// - `LIKE_STORE_PATH`: JSON file for local state (in-memory when unset)
// - `LIKE_NAMESPACE`: Storage key prefix (default `hexo-like`)
//
// ### Logging
// - `LIKE_LOG_LEVEL`: trace, debug, info, warn, error (default warn)
//
// ## Example
//
// ```bash
// export LIKE_PROVIDER=worker
// export LIKE_ENDPOINT=https://likes.example.workers.dev/api/like
// export LIKE_ID=/posts/hello-world/
// export LIKE_STORE_PATH=$HOME/.cache/likectl/state.json
//
// likectl
// ```

use anyhow::Result;
use like_core::config::{DEFAULT_NAMESPACE, DEFAULT_PROVIDER, attrs};
use like_core::dom::HeadlessContainer;
use like_core::storage::{FileBackend, MemoryBackend};
use like_core::{
    LikeBinder, LikeSettings, LocalPersistence, PageContext, ProviderRegistry, StorageBackend,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Clean exit
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum LikeExitCode {
    Clean = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<LikeExitCode> for ExitCode {
    fn from(code: LikeExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    provider: String,
    id: String,
    title: String,
    origin: String,
    app_id: Option<String>,
    app_key: Option<String>,
    server_url: Option<String>,
    class_name: Option<String>,
    endpoint: Option<String>,
    token: Option<String>,
    store_path: Option<PathBuf>,
    namespace: String,
    clicks: u32,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup
    ///
    /// Empty values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let clicks = match var("LIKE_CLICKS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("LIKE_CLICKS must be a non-negative integer. Got: {}", raw)
            })?,
            None => 1,
        };

        Ok(Self {
            provider: var("LIKE_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            id: var("LIKE_ID").unwrap_or_else(|| "/".to_string()),
            title: var("LIKE_TITLE").unwrap_or_default(),
            origin: var("LIKE_ORIGIN").unwrap_or_else(|| "http://localhost".to_string()),
            app_id: var("LIKE_APP_ID"),
            app_key: var("LIKE_APP_KEY"),
            server_url: var("LIKE_SERVER_URL"),
            class_name: var("LIKE_CLASS_NAME"),
            endpoint: var("LIKE_ENDPOINT"),
            token: var("LIKE_TOKEN"),
            store_path: var("LIKE_STORE_PATH").map(PathBuf::from),
            namespace: var("LIKE_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            clicks,
            log_level: var("LIKE_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Unknown providers are not an error here: the selector falls back
    /// to local for them.
    fn validate(&self) -> Result<()> {
        if !self.origin.starts_with("http://") && !self.origin.starts_with("https://") {
            anyhow::bail!(
                "LIKE_ORIGIN must use HTTP or HTTPS scheme. Got: {}",
                self.origin
            );
        }

        if self.clicks > 1000 {
            anyhow::bail!("LIKE_CLICKS must be at most 1000. Got: {}", self.clicks);
        }

        if let Some(parent) = self.store_path.as_ref().and_then(|path| path.parent())
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            anyhow::bail!(
                "LIKE_STORE_PATH parent directory does not exist: {}. \
                Create it first: mkdir -p {}",
                parent.display(),
                parent.display()
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "LIKE_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Container carrying the markup contract for this configuration
    fn container(&self) -> HeadlessContainer {
        let optional = [
            (attrs::APP_ID, &self.app_id),
            (attrs::APP_KEY, &self.app_key),
            (attrs::SERVER_URL, &self.server_url),
            (attrs::CLASS_NAME, &self.class_name),
            (attrs::ENDPOINT, &self.endpoint),
            (attrs::TOKEN, &self.token),
        ];

        optional.into_iter().fold(
            HeadlessContainer::new()
                .with_attribute(attrs::ID, self.id.as_str())
                .with_attribute(attrs::TITLE, self.title.as_str())
                .with_attribute(attrs::PROVIDER, self.provider.as_str()),
            |container, (name, value)| match value {
                Some(value) => container.with_attribute(name, value.as_str()),
                None => container,
            },
        )
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return LikeExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return LikeExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return LikeExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return LikeExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run(config).await {
            Ok(report) => {
                println!("{}", report);
                LikeExitCode::Clean
            }
            Err(e) => {
                error!("likectl error: {}", e);
                LikeExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Open the configured storage backend
fn open_backend(config: &Config) -> Result<Arc<dyn StorageBackend>> {
    Ok(match &config.store_path {
        Some(path) => {
            info!("Using file storage at {}", path.display());
            Arc::new(FileBackend::open(path)?)
        }
        None => {
            info!("Using in-memory storage");
            Arc::new(MemoryBackend::new())
        }
    })
}

/// Registry with every provider compiled into this binary
fn registry() -> ProviderRegistry {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "leancloud")]
    {
        debug!("Registering LeanCloud provider");
        like_provider_leancloud::register(&registry);
    }

    #[cfg(feature = "worker")]
    {
        debug!("Registering worker provider");
        like_provider_worker::register(&registry);
    }

    registry
}

/// Bind, click, and report
async fn run(config: Config) -> Result<serde_json::Value> {
    let settings = LikeSettings {
        namespace: config.namespace.clone(),
    };
    let persistence = LocalPersistence::new(open_backend(&config)?, &settings);
    let page = PageContext::new(config.origin.as_str(), config.id.as_str(), config.title.as_str());
    let binder = LikeBinder::new(Arc::new(registry()), persistence, page);

    let container = config.container();
    let bound = binder
        .init_post_like(Some(&container))
        .await
        .ok_or_else(|| anyhow::anyhow!("No like button to bind"))?;

    info!(
        "Bound {} with provider '{}'",
        bound.widget().identity(),
        bound.provider_name()
    );

    for _ in 0..config.clicks {
        bound.click().await;
    }

    let state = bound.widget().state();
    Ok(serde_json::json!({
        "id": bound.widget().identity(),
        "provider": bound.provider_name(),
        "liked": state.liked,
        "count": state.count,
    }))
}
