//! Route definitions for the unfurl service.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /profile/{actor}/post/{rkey}` - Unfurl page or media redirect
//!   (matched by the fallback so malformed post paths answer 400)

mod health;
pub mod post;

use axum::Router;
use axum::http::Request;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::state::AppState;

pub use health::HealthResponse;

/// Build the unfurl service router without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .fallback(get(post::unfurl_handler))
        .with_state(state)
}

/// Build the served application: [`router`] with request tracing and
/// permissive CORS.
pub fn app(state: AppState) -> Router {
    router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "unfurl_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Serve robots.txt allowing all crawlers.
///
/// Link-preview bots must be able to fetch these pages.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}
