//! Actor and post resolution.
//!
//! Turns the `{actor}` path segment into a DID and an AT-URI into a validated
//! post. Each function issues at most one XRPC call.

use crate::client::XrpcClient;
use crate::error::{FetchResult, UnfurlError};
use crate::lexicon::{self, EmbedView, PostRecord, ProfileViewBasic, ThreadNode};

/// A post whose record validated as `app.bsky.feed.post`.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// AT-URI of the post.
    pub uri: String,
    /// The post's author.
    pub author: ProfileViewBasic,
    /// Post text; may be empty.
    pub text: String,
    /// Hydrated embed, if the post has one.
    pub embed: Option<EmbedView>,
}

/// Resolve an actor reference (DID or handle) to a DID.
///
/// DIDs are returned unchanged without a network call. A handle that cannot
/// be resolved is reported as an upstream failure, never as not found.
pub async fn resolve_actor(client: &XrpcClient, actor: &str) -> FetchResult<String> {
    if lexicon::is_did(actor) {
        return Ok(actor.to_string());
    }

    let output = client.resolve_handle(actor).await?;

    match output.did {
        Some(did) if !did.is_empty() => {
            tracing::debug!(handle = %actor, did = %did, "resolved handle");
            Ok(did)
        }
        _ => Err(UnfurlError::Upstream(format!(
            "handle {actor} resolved to no identifier"
        ))),
    }
}

/// Fetch a single post by AT-URI and validate its record.
pub async fn fetch_post(client: &XrpcClient, uri: &str) -> FetchResult<Post> {
    let output = client.get_post_thread(uri).await?;

    let view = match output.thread {
        ThreadNode::Post { post } => *post,
        other => {
            tracing::debug!(uri = %uri, thread = other.kind(), "post is not viewable");
            return Err(UnfurlError::NotFound(format!("post {uri}")));
        }
    };

    let Some(record) = PostRecord::validate(&view.record) else {
        tracing::warn!(uri = %uri, "record is not a valid app.bsky.feed.post");
        return Err(UnfurlError::NotFound(format!("post record {uri}")));
    };

    tracing::debug!(uri = %view.uri, author = %view.author.did, "fetched post");

    Ok(Post {
        uri: view.uri,
        author: view.author,
        text: record.text,
        embed: view.embed,
    })
}
