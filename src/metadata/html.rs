//! Meta tag scanning over parsed HTML

use super::PageMetadata;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];
const IMAGE_KEYS: &[&str] = &["og:image", "twitter:image", "twitter:image:src"];

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Extract preview metadata from raw markup
///
/// `base` is the URL the markup was served from; relative image URLs are
/// resolved against it. Missing fields come back empty rather than failing.
pub fn parse_metadata(markup: &str, base: Option<&Url>) -> PageMetadata {
    let doc = Html::parse_document(markup);
    let tags = collect_meta_tags(&doc);

    let title = first_match(&tags, TITLE_KEYS).unwrap_or_else(|| document_title(&doc));
    let description = first_match(&tags, DESCRIPTION_KEYS).unwrap_or_default();
    let image = first_match(&tags, IMAGE_KEYS).and_then(|raw| resolve_image(&raw, base));

    PageMetadata {
        title,
        description,
        image,
    }
}

/// Map of lowercased `property`/`name` key to the first non-empty content
fn collect_meta_tags(doc: &Html) -> HashMap<String, String> {
    let meta = selector("meta[content]");
    let mut tags = HashMap::new();

    for element in doc.select(&meta) {
        let attrs = element.value();
        let Some(key) = attrs.attr("property").or_else(|| attrs.attr("name")) else {
            continue;
        };
        let content = normalize(attrs.attr("content").unwrap_or_default());
        if content.is_empty() {
            continue;
        }
        tags.entry(key.trim().to_ascii_lowercase()).or_insert(content);
    }

    tracing::trace!(meta_tags = tags.len(), "Collected meta tags");
    tags
}

fn first_match(tags: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| tags.get(*key).cloned())
}

fn document_title(doc: &Html) -> String {
    let title = selector("title");
    doc.select(&title)
        .map(|el| normalize(&el.text().collect::<String>()))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Collapse runs of whitespace; entities are already decoded by the parser
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Absolute URLs pass through untouched, relative ones are joined to `base`
fn resolve_image(raw: &str, base: Option<&Url>) -> Option<String> {
    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }
    let joined = base?.join(raw).ok()?;
    Some(joined.to_string())
}
