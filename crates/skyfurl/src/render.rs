//! HTML page rendering from a placeholder template.
//!
//! The template is plain HTML with three placeholders:
//!
//! - `{{username}}` - the author's DID (every occurrence)
//! - `{{id}}` - the post record key (every occurrence)
//! - `<!-- template -->` - the meta tags, one element per line (first occurrence)
//!
//! Substituted values are HTML-escaped with maud, so a DID taken verbatim from
//! the request path cannot inject markup.

use std::path::Path;

use anyhow::Context;
use maud::{Render, html};

use crate::meta::MetaTag;

/// Template compiled into the binary.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.html");

const USERNAME_PLACEHOLDER: &str = "{{username}}";
const ID_PLACEHOLDER: &str = "{{id}}";
const META_SLOT: &str = "<!-- template -->";

/// A loaded page template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read the template at `path`, or use the compiled-in one when `None`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;

        if !source.contains(META_SLOT) {
            tracing::warn!(
                path = %path.display(),
                "template has no {META_SLOT} slot; meta tags will not be rendered"
            );
        }

        tracing::info!(path = %path.display(), bytes = source.len(), "template loaded");
        Ok(Self::new(source))
    }

    /// Substitute the DID, record key and meta tags into the template.
    pub fn render(&self, did: &str, rkey: &str, tags: &[MetaTag]) -> String {
        let meta = tags
            .iter()
            .map(|tag| tag.render().into_string())
            .collect::<Vec<_>>()
            .join("\n");

        self.source
            .replace(USERNAME_PLACEHOLDER, &escape(did))
            .replace(ID_PLACEHOLDER, &escape(rkey))
            .replacen(META_SLOT, &meta, 1)
    }
}

fn escape(value: &str) -> String {
    html! { (value) }.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{OG_IMAGE, OG_TITLE};

    #[test]
    fn placeholders_replaced_everywhere() {
        let template = Template::new("{{username}}/{{id}} {{username}}/{{id}}\n<!-- template -->");
        let html = template.render("did:plc:abc123", "3kxyz", &[]);
        assert_eq!(html, "did:plc:abc123/3kxyz did:plc:abc123/3kxyz\n");
    }

    #[test]
    fn meta_slot_replaced_once() {
        let template = Template::new("<head><!-- template --></head><!-- template -->");
        let tags = [
            MetaTag::new(OG_TITLE, "Bob (bob.test)"),
            MetaTag::new(OG_IMAGE, "https://cdn/1.jpg"),
        ];
        let html = template.render("did:plc:x", "1", &tags);
        assert_eq!(
            html,
            "<head><meta property=\"og:title\" content=\"Bob (bob.test)\">\n\
             <meta property=\"og:image\" content=\"https://cdn/1.jpg\"></head><!-- template -->"
        );
    }

    #[test]
    fn path_values_are_escaped() {
        let template = Template::new("<a href=\"/{{username}}\">{{id}}</a>");
        let html = template.render("did:\"><script>", "<b>", &[]);
        assert_eq!(
            html,
            "<a href=\"/did:&quot;&gt;&lt;script&gt;\">&lt;b&gt;</a>"
        );
    }

    #[test]
    fn tag_content_not_rescanned_for_placeholders() {
        let template = Template::new("{{id}}|<!-- template -->");
        let tags = [MetaTag::new(OG_TITLE, "{{id}}")];
        let html = template.render("did:plc:x", "3k", &tags);
        assert_eq!(html, "3k|<meta property=\"og:title\" content=\"{{id}}\">");
    }

    #[test]
    fn default_template_has_all_placeholders() {
        assert!(DEFAULT_TEMPLATE.contains(USERNAME_PLACEHOLDER));
        assert!(DEFAULT_TEMPLATE.contains(ID_PLACEHOLDER));
        assert!(DEFAULT_TEMPLATE.contains(META_SLOT));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = Template::load(Some(Path::new("/nonexistent/skyfurl/template.html")));
        assert!(err.is_err());
    }
}
