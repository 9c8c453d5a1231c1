//! Shared fixtures: AppView JSON payloads and wiremock helpers.

#![allow(dead_code)]

use serde_json::{Value, json};
use skyfurl::client::XrpcClient;
use skyfurl::render::Template;
use skyfurl::{AppState, Config};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BLOB: &str = "https://blobs.test";

pub fn client(server: &MockServer) -> XrpcClient {
    XrpcClient::new(server.uri()).unwrap()
}

pub fn app(server: &MockServer) -> axum::Router {
    let config = Config {
        appview_url: server.uri(),
        blob_service_url: BLOB.to_string(),
        ..Config::default()
    };
    let state = AppState::with_template(config, Template::default()).unwrap();
    skyfurl::app(state)
}

pub fn uri(did: &str, rkey: &str) -> String {
    format!("at://{did}/app.bsky.feed.post/{rkey}")
}

/// An `app.bsky.feed.defs#postView`.
pub fn post_view(
    did: &str,
    rkey: &str,
    display_name: Option<&str>,
    text: &str,
    embed: Option<Value>,
) -> Value {
    let handle = format!("{}.test", did.rsplit(':').next().unwrap_or("user"));
    let mut author = json!({ "did": did, "handle": handle, "avatar": "https://cdn.test/avatar.jpg" });
    if let Some(name) = display_name {
        author["displayName"] = json!(name);
    }

    let mut post = json!({
        "uri": uri(did, rkey),
        "cid": "bafyreipost",
        "author": author,
        "record": {
            "$type": "app.bsky.feed.post",
            "text": text,
            "createdAt": "2024-11-20T12:00:00.000Z",
            "langs": ["en"]
        },
        "replyCount": 0,
        "repostCount": 0,
        "likeCount": 0,
        "indexedAt": "2024-11-20T12:00:00.000Z",
        "labels": []
    });
    if let Some(embed) = embed {
        post["embed"] = embed;
    }
    post
}

pub fn images_embed(thumbs: &[&str]) -> Value {
    let images: Vec<Value> = thumbs
        .iter()
        .map(|thumb| json!({ "thumb": thumb, "fullsize": format!("{thumb}?full"), "alt": "" }))
        .collect();
    json!({ "$type": "app.bsky.embed.images#view", "images": images })
}

pub fn video_embed(cid: &str) -> Value {
    json!({
        "$type": "app.bsky.embed.video#view",
        "cid": cid,
        "playlist": format!("https://video.test/{cid}/playlist.m3u8"),
        "thumbnail": format!("https://video.test/{cid}/thumbnail.jpg")
    })
}

pub fn record_embed(quoted_uri: &str) -> Value {
    json!({
        "$type": "app.bsky.embed.record#view",
        "record": {
            "$type": "app.bsky.embed.record#viewRecord",
            "uri": quoted_uri,
            "cid": "bafyreiquote",
            "author": { "did": "did:plc:ignored", "handle": "ignored.test" },
            "value": {},
            "indexedAt": "2024-11-20T12:00:00.000Z"
        }
    })
}

pub fn record_with_media_embed(quoted_uri: &str, media: Value) -> Value {
    let mut record = record_embed(quoted_uri);
    record.as_object_mut().unwrap().remove("$type");
    json!({
        "$type": "app.bsky.embed.recordWithMedia#view",
        "record": record,
        "media": media
    })
}

pub fn thread(post: Value) -> Value {
    json!({
        "thread": {
            "$type": "app.bsky.feed.defs#threadViewPost",
            "post": post,
            "replies": []
        }
    })
}

/// Mount a `getPostThread` answer for `post_uri`, expected exactly `times` times.
pub async fn mount_thread(server: &MockServer, post_uri: &str, body: Value, times: u64) {
    mount_thread_response(
        server,
        post_uri,
        ResponseTemplate::new(200).set_body_json(body),
        times,
    )
    .await;
}

pub async fn mount_thread_response(
    server: &MockServer,
    post_uri: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getPostThread"))
        .and(query_param("uri", post_uri))
        .and(query_param("depth", "0"))
        .and(query_param("parentHeight", "0"))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_resolve_handle(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/xrpc/com.atproto.identity.resolveHandle"))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}
