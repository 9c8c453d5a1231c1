//! Wire types for the AT Protocol lexicons the pipeline reads.
//!
//! Only the fields that feed Open Graph tags are modelled; everything else in
//! the AppView responses is ignored. Unions are internally tagged on `$type`,
//! with a catch-all variant so new embed kinds never fail a whole response.

use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use unicode_segmentation::UnicodeSegmentation;

/// NSID of the post record collection.
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// Maximum post text length in UTF-8 bytes.
pub const POST_TEXT_MAX_BYTES: usize = 3000;

/// Maximum post text length in grapheme clusters.
pub const POST_TEXT_MAX_GRAPHEMES: usize = 300;

/// Maximum number of language tags on a post.
pub const POST_LANGS_MAX: usize = 3;

/// Whether an actor reference is already a DID.
pub fn is_did(actor: &str) -> bool {
    actor.starts_with("did:")
}

/// Build the AT-URI of a post record.
pub fn post_uri(did: &str, rkey: &str) -> String {
    format!("at://{did}/{POST_COLLECTION}/{rkey}")
}

/// Output of `com.atproto.identity.resolveHandle`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveHandleOutput {
    #[serde(default)]
    pub did: Option<String>,
}

/// Output of `app.bsky.feed.getPostThread`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetPostThreadOutput {
    pub thread: ThreadNode,
}

/// Root node of a thread response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "$type")]
pub enum ThreadNode {
    #[serde(rename = "app.bsky.feed.defs#threadViewPost")]
    Post { post: Box<PostView> },

    #[serde(rename = "app.bsky.feed.defs#notFoundPost")]
    NotFound,

    #[serde(rename = "app.bsky.feed.defs#blockedPost")]
    Blocked,

    #[serde(other)]
    Unknown,
}

impl ThreadNode {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Post { .. } => "threadViewPost",
            Self::NotFound => "notFoundPost",
            Self::Blocked => "blockedPost",
            Self::Unknown => "unknown",
        }
    }
}

/// `app.bsky.feed.defs#postView`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostView {
    pub uri: String,
    pub author: ProfileViewBasic,
    /// The raw record; validated separately by [`PostRecord::validate`].
    pub record: Value,
    #[serde(default, deserialize_with = "lenient_embed")]
    pub embed: Option<EmbedView>,
}

/// `app.bsky.actor.defs#profileViewBasic`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewBasic {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ProfileViewBasic {
    /// Display name, or the handle when none is set.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.handle)
    }
}

/// An `app.bsky.feed.post` record that passed validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(rename = "$type")]
    pub record_type: String,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub langs: Option<Vec<String>>,
    #[serde(default)]
    pub facets: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub reply: Option<ReplyRef>,
    #[serde(default)]
    pub embed: Option<Map<String, Value>>,
}

/// `app.bsky.feed.post#replyRef`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplyRef {
    pub root: StrongRef,
    pub parent: StrongRef,
}

/// `com.atproto.repo.strongRef`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrongRef {
    pub uri: String,
    pub cid: String,
}

impl PostRecord {
    /// Validate a raw record against the post schema.
    ///
    /// Returns `None` for any other record type or a malformed post: wrong
    /// field types, text over either length limit, too many languages, or a
    /// `createdAt` that is not an RFC 3339 datetime.
    pub fn validate(value: &Value) -> Option<Self> {
        let record = Self::deserialize(value).ok()?;
        if record.record_type != POST_COLLECTION
            || record.text.len() > POST_TEXT_MAX_BYTES
            || record.text.graphemes(true).count() > POST_TEXT_MAX_GRAPHEMES
            || record.langs.as_ref().is_some_and(|langs| langs.len() > POST_LANGS_MAX)
            || DateTime::parse_from_rfc3339(&record.created_at).is_err()
        {
            return None;
        }
        Some(record)
    }
}

/// Hydrated embed attached to a post view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "$type")]
pub enum EmbedView {
    #[serde(rename = "app.bsky.embed.images#view")]
    Images(ImagesView),

    #[serde(rename = "app.bsky.embed.video#view")]
    Video(VideoView),

    #[serde(rename = "app.bsky.embed.record#view")]
    Record(RecordView),

    #[serde(rename = "app.bsky.embed.recordWithMedia#view")]
    RecordWithMedia(RecordWithMediaView),

    /// External cards, feed generators, lists, and anything newer.
    #[serde(other)]
    Unrecognized,
}

/// Media half of `app.bsky.embed.recordWithMedia#view`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "$type")]
pub enum MediaView {
    #[serde(rename = "app.bsky.embed.images#view")]
    Images(ImagesView),

    #[serde(rename = "app.bsky.embed.video#view")]
    Video(VideoView),

    #[serde(other)]
    Unrecognized,
}

/// `app.bsky.embed.images#view`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImagesView {
    pub images: Vec<ImageView>,
}

/// `app.bsky.embed.images#viewImage`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageView {
    pub thumb: String,
    #[serde(default)]
    pub fullsize: Option<String>,
    #[serde(default)]
    pub alt: String,
}

/// `app.bsky.embed.video#view`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoView {
    pub cid: String,
    #[serde(default)]
    pub playlist: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// `app.bsky.embed.record#view`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordView {
    pub record: QuotedRecord,
}

/// Any member of the `app.bsky.embed.record#view` record union.
///
/// Every member (view, not-found, blocked, detached) carries the quoted
/// record's URI, which is all the pipeline needs to fetch it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuotedRecord {
    pub uri: String,
}

/// `app.bsky.embed.recordWithMedia#view`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordWithMediaView {
    pub record: RecordView,
    pub media: MediaView,
}

/// Deserialize an optional embed, mapping any shape that does not parse to
/// [`EmbedView::Unrecognized`] instead of failing the enclosing post.
fn lenient_embed<'de, D>(deserializer: D) -> Result<Option<EmbedView>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| serde_json::from_value(value).unwrap_or(EmbedView::Unrecognized)))
}
