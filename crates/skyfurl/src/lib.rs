//! skyfurl - Open Graph unfurl pages for Bluesky post links.
//!
//! This crate provides a small HTTP service that answers Bluesky post URLs
//! with an HTML page carrying Open Graph tags for the post's media or quoted
//! post, so link previews show the content instead of a generic card. It is
//! designed to sit behind a proxy that rewrites `bsky.app` links to it.
//!
//! # Pipeline
//!
//! - **Resolve**: the path actor (DID or handle) becomes a DID
//! - **Fetch**: the post is read from the AppView with `getPostThread` and its
//!   record validated
//! - **Synthesize**: the embed becomes meta tags, following a quoted post
//!   exactly one level deep
//! - **Redirect or render**: video posts (or `?redirect=1`) go straight to the
//!   media, everything else is rendered into the page template
//!
//! Every stage returns [`error::FetchResult`], so a failure anywhere yields a
//! whole-response 404 or 500 and never a page with missing tags.
//!
//! # URL Pattern
//!
//! ```text
//! GET /profile/{actor}/post/{rkey}[?redirect=1]
//! GET /profile/{actor}/post/{rkey}/...with an /embed/ segment anywhere
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod meta;
pub mod redirect;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::{app, router};
pub use state::AppState;
