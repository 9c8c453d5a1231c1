//! Direct-media redirect decision.

use crate::meta::{MetaTag, OG_IMAGE, OG_VIDEO};

/// Pick the media URL to redirect to, if the request should skip the page.
///
/// A redirect is wanted when explicitly requested or when the tags carry a
/// video (link-preview consumers cannot play a page). The first video wins,
/// then the first image. With neither, the page is rendered as usual.
pub fn decide(tags: &[MetaTag], requested: bool) -> Option<&str> {
    let has_video = tags.iter().any(|tag| tag.property == OG_VIDEO);
    if !requested && !has_video {
        return None;
    }

    tags.iter()
        .find(|tag| tag.property == OG_VIDEO)
        .or_else(|| tags.iter().find(|tag| tag.property == OG_IMAGE))
        .map(|tag| tag.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{OG_DESCRIPTION, OG_TITLE};

    #[test]
    fn video_triggers_without_request() {
        let tags = [
            MetaTag::new(OG_TITLE, "Bob (bob.test)"),
            MetaTag::new(OG_VIDEO, "https://x/video.mp4"),
        ];
        assert_eq!(decide(&tags, false), Some("https://x/video.mp4"));
    }

    #[test]
    fn images_only_need_request() {
        let tags = [
            MetaTag::new(OG_IMAGE, "https://x/1.jpg"),
            MetaTag::new(OG_IMAGE, "https://x/2.jpg"),
        ];
        assert_eq!(decide(&tags, false), None);
        assert_eq!(decide(&tags, true), Some("https://x/1.jpg"));
    }

    #[test]
    fn video_preferred_over_earlier_image() {
        let tags = [
            MetaTag::new(OG_IMAGE, "https://x/quoted.jpg"),
            MetaTag::new(OG_VIDEO, "https://x/top.mp4"),
        ];
        assert_eq!(decide(&tags, true), Some("https://x/top.mp4"));
    }

    #[test]
    fn requested_without_media_falls_through() {
        let tags = [
            MetaTag::new(OG_TITLE, "Bob (bob.test)"),
            MetaTag::new(OG_DESCRIPTION, "just text"),
        ];
        assert_eq!(decide(&tags, true), None);
        assert_eq!(decide(&[], true), None);
    }
}
