//! Backlink templates: list parsing and placeholder expansion.

mod fetch;

pub use fetch::{fetch_templates, load_templates_file, DEFAULT_TEMPLATE_URL};

use regex::{NoExpand, Regex};
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::TemplateError;
use crate::video::VideoId;

/// One entry of the published template list: either a bare string or an
/// object carrying the template under `url` or `template`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    Plain(String),
    Object {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        template: Option<String>,
    },
}

impl TemplateEntry {
    /// The usable template string, if any. Entries with neither field (or
    /// only empty strings) are skipped by the task builder.
    pub fn as_template(&self) -> Option<&str> {
        match self {
            TemplateEntry::Plain(s) if !s.is_empty() => Some(s),
            TemplateEntry::Plain(_) => None,
            TemplateEntry::Object { url, template } => url
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| template.as_deref().filter(|s| !s.is_empty())),
        }
    }
}

/// Parse the JSON template list. An empty list is an error: a run must be
/// refused when no templates are available.
pub fn parse_template_list(json: &str) -> Result<Vec<TemplateEntry>, TemplateError> {
    let entries: Vec<TemplateEntry> = serde_json::from_str(json)?;
    if entries.is_empty() {
        return Err(TemplateError::Empty);
    }
    Ok(entries)
}

enum Slot {
    Id,
    CanonicalUrl,
    ShortUrl,
    EncodedUrl,
}

fn rules() -> &'static [(Regex, Slot)] {
    static RULES: OnceLock<Vec<(Regex, Slot)>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            (
                Regex::new(r"(?i)\[VIDEO_ID\]|\[ID\]|\{ID\}|\{\{ID\}\}").unwrap(),
                Slot::Id,
            ),
            (
                Regex::new(r"(?i)\[VIDEO_URL\]|\[URL\]|\{URL\}|\{\{URL\}\}").unwrap(),
                Slot::CanonicalUrl,
            ),
            (
                Regex::new(r"(?i)\[SHORT_URL\]|\{SHORT_URL\}").unwrap(),
                Slot::ShortUrl,
            ),
            (
                Regex::new(r"(?i)\[ENCODE_URL\]|\{ENCODE_URL\}").unwrap(),
                Slot::EncodedUrl,
            ),
        ]
    })
}

/// Expand every placeholder form of `template` against a video id.
/// Matching is case-insensitive, mirroring the published template set.
pub fn expand(template: &str, id: &VideoId) -> String {
    let url = id.canonical_url();
    let short = id.short_url();
    let encoded = urlencoding::encode(&url).into_owned();

    let mut out = template.to_string();
    for (re, slot) in rules() {
        let value = match slot {
            Slot::Id => id.as_str(),
            Slot::CanonicalUrl => url.as_str(),
            Slot::ShortUrl => short.as_str(),
            Slot::EncodedUrl => encoded.as_str(),
        };
        out = re.replace_all(&out, NoExpand(value)).into_owned();
    }
    out
}
