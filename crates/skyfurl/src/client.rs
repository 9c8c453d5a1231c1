//! XRPC query layer for the Bluesky AppView.
//!
//! Two read-only queries are issued, both unauthenticated: handle resolution
//! and single-post thread retrieval. Any non-2xx answer is an upstream
//! failure; interpreting the payload is left to the callers.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::UnfurlError;
use crate::lexicon::{GetPostThreadOutput, ResolveHandleOutput};

const USER_AGENT: &str = concat!("skyfurl/", env!("CARGO_PKG_VERSION"));

/// Stateless client for a single XRPC service.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct XrpcClient {
    http: Client,
    service: String,
}

impl XrpcClient {
    /// Create a client for the service at `service` (no trailing slash).
    pub fn new(service: impl Into<String>) -> Result<Self, UnfurlError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            service: service.into(),
        })
    }

    /// Base URL of the service this client talks to.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// `com.atproto.identity.resolveHandle`.
    pub async fn resolve_handle(&self, handle: &str) -> Result<ResolveHandleOutput, UnfurlError> {
        self.query(
            "com.atproto.identity.resolveHandle",
            &[("handle", handle)],
        )
        .await
    }

    /// `app.bsky.feed.getPostThread` for exactly one post, without parents or replies.
    pub async fn get_post_thread(&self, uri: &str) -> Result<GetPostThreadOutput, UnfurlError> {
        self.query(
            "app.bsky.feed.getPostThread",
            &[("uri", uri), ("depth", "0"), ("parentHeight", "0")],
        )
        .await
    }

    async fn query<T: DeserializeOwned>(
        &self,
        nsid: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UnfurlError> {
        let url = format!("{}/xrpc/{nsid}", self.service);

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UnfurlError::Upstream(format!("{nsid} returned {status}")));
        }

        Ok(response.json::<T>().await?)
    }
}
