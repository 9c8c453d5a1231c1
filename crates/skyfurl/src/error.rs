//! Error types for the unfurl pipeline.
//!
//! Every pipeline stage returns [`FetchResult`] and forwards failures with `?`,
//! so the HTTP status is decided once, here, from the error variant. Errors are
//! rendered as small HTML pages since the service only ever serves HTML.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Result of a pipeline stage: the value, or the reason there is none.
pub type FetchResult<T> = Result<T, UnfurlError>;

/// Unfurl service error type.
#[derive(Debug, thiserror::Error)]
pub enum UnfurlError {
    /// The request path is not a post URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The identity, post or embed could not be resolved or is not understood.
    #[error("not found: {0}")]
    NotFound(String),

    /// An upstream XRPC call answered with a failure.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// An upstream XRPC call failed in transport or returned an undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

const ERROR_CSS: &str = "body{font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,sans-serif;\
display:flex;align-items:center;justify-content:center;min-height:100vh;margin:0;background:#f7f9fa;color:#0f1419}\
main{text-align:center;padding:2rem}h1{font-size:1.5rem;margin-bottom:.5rem}p{color:#536471}";

impl IntoResponse for UnfurlError {
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            Self::InvalidRequest(msg) => {
                tracing::debug!(reason = %msg, "invalid request");
                (StatusCode::BAD_REQUEST, "Invalid URL")
            }
            Self::NotFound(msg) => {
                tracing::debug!(reason = %msg, "not found");
                (StatusCode::NOT_FOUND, "Not Found")
            }
            Self::Upstream(msg) => {
                tracing::error!(error = %msg, "upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            Self::Http(err) => {
                tracing::error!(error = %err, "upstream http error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(ERROR_CSS)) }
                }
                body {
                    main {
                        h1 { (status.as_u16()) " " (title) }
                        p { "This post could not be unfurled." }
                    }
                }
            }
        };

        let headers = [(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        )];

        (status, headers, markup).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_request() {
        let err = UnfurlError::InvalidRequest("missing rkey".to_string());
        assert_eq!(err.to_string(), "invalid request: missing rkey");
    }

    #[test]
    fn error_display_not_found() {
        let err = UnfurlError::NotFound("post at://did:plc:x/app.bsky.feed.post/1".to_string());
        assert_eq!(
            err.to_string(),
            "not found: post at://did:plc:x/app.bsky.feed.post/1"
        );
    }

    #[test]
    fn error_display_upstream() {
        let err = UnfurlError::Upstream("resolveHandle returned 400".to_string());
        assert_eq!(err.to_string(), "upstream failure: resolveHandle returned 400");
    }

    #[test]
    fn error_into_response_invalid_request() {
        let response = UnfurlError::InvalidRequest("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_into_response_not_found() {
        let response = UnfurlError::NotFound("post".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_into_response_upstream() {
        let response = UnfurlError::Upstream("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }
}
