//! Post unfurl handler.
//!
//! Handles `GET /profile/{actor}/post/{rkey}`, also reachable with an extra
//! `/embed/` segment anywhere in the path.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::UnfurlError;
use crate::lexicon;
use crate::meta;
use crate::redirect;
use crate::resolve;
use crate::state::AppState;

/// Query parameters accepted by the unfurl route.
#[derive(Debug, Default, Deserialize)]
pub struct UnfurlParams {
    /// Any non-empty value asks for a redirect straight to the media.
    #[serde(default)]
    pub redirect: Option<String>,
}

impl UnfurlParams {
    fn redirect_requested(&self) -> bool {
        self.redirect.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Path segments of a post URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPath {
    pub actor: String,
    pub rkey: String,
}

/// Handle an unfurl request.
///
/// Resolves the actor, fetches the post, builds its Open Graph tags, and
/// either redirects to the media or renders the page template. Any failure
/// along the way ends the request with the matching error status.
pub async fn unfurl_handler(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<UnfurlParams>,
) -> Result<Response, UnfurlError> {
    let PostPath { actor, rkey } = parse_post_path(uri.path())?;

    let did = resolve::resolve_actor(&state.client, &actor).await?;

    let post_uri = lexicon::post_uri(&did, &rkey);
    let post = resolve::fetch_post(&state.client, &post_uri).await?;

    let tags = meta::synthesize(&state.client, &state.config.blob_service_url, &post).await?;

    if let Some(media_url) = redirect::decide(&tags, params.redirect_requested()) {
        match HeaderValue::from_str(media_url) {
            Ok(location) => {
                tracing::debug!(uri = %post_uri, location = %media_url, "redirecting to media");
                return Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response());
            }
            Err(_) => {
                tracing::warn!(uri = %post_uri, "media url is not a valid header value");
            }
        }
    }

    let html = state.template.render(&did, &rkey, &tags);
    Ok(build_response(html))
}

/// Match `/profile/{actor}/post/{rkey}` after dropping the first `/embed/`.
pub fn parse_post_path(path: &str) -> Result<PostPath, UnfurlError> {
    let path = path.replacen("/embed/", "/", 1);
    let mut segments = path.split('/');

    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(""), Some("profile"), Some(actor), Some("post"), Some(rkey), None)
            if !actor.is_empty() && !rkey.is_empty() =>
        {
            Ok(PostPath {
                actor: actor.to_string(),
                rkey: rkey.to_string(),
            })
        }
        _ => Err(UnfurlError::InvalidRequest(format!(
            "'{path}' is not a post URL"
        ))),
    }
}

/// Build an HTTP response with HTML content and content headers.
fn build_response(html: String) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html).into_response()
}
