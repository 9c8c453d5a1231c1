//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::client::XrpcClient;
use crate::config::Config;
use crate::render::Template;

/// Shared application state available to all request handlers.
///
/// Everything here is immutable after startup; requests share nothing else.
#[derive(Debug, Clone)]
pub struct AppState {
    /// XRPC client for the AppView.
    pub client: XrpcClient,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Page template.
    pub template: Arc<Template>,
}

impl AppState {
    /// Create the application state from configuration, loading the template.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let template = Template::load(config.template_path.as_deref())?;
        Self::with_template(config, template)
    }

    /// Create the application state with an already loaded template.
    pub fn with_template(config: Config, template: Template) -> anyhow::Result<Self> {
        let client = XrpcClient::new(config.appview_url.clone())?;

        tracing::info!(appview = %client.service(), "application state initialized");

        Ok(Self {
            client,
            config: Arc::new(config),
            template: Arc::new(template),
        })
    }
}
