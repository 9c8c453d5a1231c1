//! Open Graph tag synthesis from post embeds.
//!
//! A post's tags come entirely from its embed. Quoted posts are followed
//! exactly one hop: [`synthesize`] fetches the quote and hands it to
//! [`quote_tags`], which only ever looks at the quote's own images or video.

use maud::{Markup, Render, html};

use crate::client::XrpcClient;
use crate::error::{FetchResult, UnfurlError};
use crate::lexicon::{EmbedView, ImagesView, MediaView, VideoView};
use crate::resolve::{self, Post};

pub const OG_TITLE: &str = "og:title";
pub const OG_DESCRIPTION: &str = "og:description";
pub const OG_IMAGE: &str = "og:image";
pub const OG_VIDEO: &str = "og:video";

/// A single `<meta property=... content=...>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub property: &'static str,
    pub content: String,
}

impl MetaTag {
    pub fn new(property: &'static str, content: impl Into<String>) -> Self {
        Self {
            property,
            content: content.into(),
        }
    }
}

impl Render for MetaTag {
    fn render(&self) -> Markup {
        html! {
            meta property=(self.property) content=(self.content);
        }
    }
}

/// Build the ordered tag list for a post.
///
/// Posts without an embed, or with an embed kind that carries no media or
/// quote, have nothing to unfurl and yield [`UnfurlError::NotFound`].
/// Failures fetching a quoted post are returned unchanged.
pub async fn synthesize(
    client: &XrpcClient,
    blob_service: &str,
    post: &Post,
) -> FetchResult<Vec<MetaTag>> {
    let did = post.author.did.as_str();

    let tags = match &post.embed {
        Some(EmbedView::Images(images)) => image_tags(images),

        Some(EmbedView::Video(video)) => vec![video_tag(blob_service, did, video)],

        Some(EmbedView::Record(record)) => {
            let quote = resolve::fetch_post(client, &record.record.uri).await?;
            quote_tags(blob_service, did, &quote)
        }

        Some(EmbedView::RecordWithMedia(embed)) => {
            let quote = resolve::fetch_post(client, &embed.record.record.uri).await?;
            let mut tags = quote_tags(blob_service, did, &quote);
            tags.extend(media_view_tags(blob_service, did, &embed.media));
            tags
        }

        Some(EmbedView::Unrecognized) | None => {
            return Err(UnfurlError::NotFound(format!("no unfurlable embed on {}", post.uri)));
        }
    };

    tracing::debug!(uri = %post.uri, tags = tags.len(), "synthesized meta tags");
    Ok(tags)
}

/// Tags describing a quoted post: title, description if any, then its media.
///
/// Only a plain images or video embed on the quote contributes media; a quote
/// that itself quotes (with or without media) adds nothing beyond its text.
/// Video blob links always point into `did`, the top-level author's repository.
pub fn quote_tags(blob_service: &str, did: &str, quote: &Post) -> Vec<MetaTag> {
    let author = &quote.author;
    let mut tags = vec![MetaTag::new(
        OG_TITLE,
        format!("{} ({})", author.name(), author.handle),
    )];

    if !quote.text.is_empty() {
        tags.push(MetaTag::new(OG_DESCRIPTION, quote.text.as_str()));
    }

    match &quote.embed {
        Some(EmbedView::Images(images)) => tags.extend(image_tags(images)),
        Some(EmbedView::Video(video)) => tags.push(video_tag(blob_service, did, video)),
        Some(
            EmbedView::Record(_) | EmbedView::RecordWithMedia(_) | EmbedView::Unrecognized,
        )
        | None => {}
    }

    tags
}

fn media_view_tags(blob_service: &str, did: &str, media: &MediaView) -> Vec<MetaTag> {
    match media {
        MediaView::Images(images) => image_tags(images),
        MediaView::Video(video) => vec![video_tag(blob_service, did, video)],
        MediaView::Unrecognized => Vec::new(),
    }
}

fn image_tags(view: &ImagesView) -> Vec<MetaTag> {
    view.images
        .iter()
        .map(|image| MetaTag::new(OG_IMAGE, image.thumb.as_str()))
        .collect()
}

/// Video always links the raw blob in `did`'s repository.
fn video_tag(blob_service: &str, did: &str, video: &VideoView) -> MetaTag {
    MetaTag::new(OG_VIDEO, blob_url(blob_service, did, &video.cid))
}

/// `com.atproto.sync.getBlob` URL for a blob in `did`'s repository.
pub fn blob_url(blob_service: &str, did: &str, cid: &str) -> String {
    format!("{blob_service}/xrpc/com.atproto.sync.getBlob?did={did}&cid={cid}")
}
