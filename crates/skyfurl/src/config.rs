//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Base URL of the AppView that serves `com.atproto.identity.resolveHandle`
    /// and `app.bsky.feed.getPostThread`.
    pub appview_url: String,

    /// Base URL used when building `com.atproto.sync.getBlob` links for video.
    pub blob_service_url: String,

    /// Optional HTML template overriding the compiled-in one.
    pub template_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            appview_url: "https://public.api.bsky.app".to_string(),
            blob_service_url: "https://bsky.social".to_string(),
            template_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults)
    ///
    /// Optional:
    /// - `SKYFURL_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `SKYFURL_APPVIEW_URL`: AppView base URL (default: "https://public.api.bsky.app")
    /// - `SKYFURL_BLOB_SERVICE_URL`: Blob host for video links (default: "https://bsky.social")
    /// - `SKYFURL_TEMPLATE_PATH`: Path to an HTML template file
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("SKYFURL_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let appview_url = std::env::var("SKYFURL_APPVIEW_URL")
            .unwrap_or(defaults.appview_url)
            .trim_end_matches('/')
            .to_string();

        let blob_service_url = std::env::var("SKYFURL_BLOB_SERVICE_URL")
            .unwrap_or(defaults.blob_service_url)
            .trim_end_matches('/')
            .to_string();

        if appview_url.is_empty() || blob_service_url.is_empty() {
            anyhow::bail!("SKYFURL_APPVIEW_URL and SKYFURL_BLOB_SERVICE_URL must not be empty");
        }

        let template_path = std::env::var("SKYFURL_TEMPLATE_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        tracing::info!(
            bind_addr = %bind_addr,
            appview_url = %appview_url,
            blob_service_url = %blob_service_url,
            template_path = ?template_path,
            "skyfurl configuration loaded"
        );

        Ok(Self {
            bind_addr,
            appview_url,
            blob_service_url,
            template_path,
        })
    }
}
