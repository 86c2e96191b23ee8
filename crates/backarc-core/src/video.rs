//! Video id parsing and canonical URL derivation.
//!
//! Accepts a raw 11-character id, a `youtube.com/watch?v=` URL, or a
//! `youtu.be/<id>` short URL. Everything downstream works with the
//! validated [`VideoId`].

use std::fmt;
use url::Url;

use crate::error::VideoIdError;

const WATCH_PREFIX: &str = "https://www.youtube.com/watch?v=";
const SHORT_PREFIX: &str = "https://youtu.be/";

/// A validated 11-character video identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a raw id or a video URL. For URLs the `v` query parameter wins;
    /// otherwise the first non-empty path segment is tried (the youtu.be
    /// form).
    pub fn parse(input: &str) -> Result<Self, VideoIdError> {
        let input = input.trim();
        if is_raw_id(input) {
            return Ok(Self(input.to_string()));
        }
        if let Ok(parsed) = Url::parse(input) {
            let host = parsed.host_str().unwrap_or("");
            if host.contains("youtube.com") || host.contains("youtu.be") {
                if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
                    if is_raw_id(&v) {
                        return Ok(Self(v.into_owned()));
                    }
                }
                if let Some(seg) = parsed
                    .path_segments()
                    .and_then(|mut segs| segs.find(|s| !s.is_empty()))
                {
                    if is_raw_id(seg) {
                        return Ok(Self(seg.to_string()));
                    }
                }
            }
        }
        Err(VideoIdError {
            input: input.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `https://www.youtube.com/watch?v=<id>`
    pub fn canonical_url(&self) -> String {
        format!("{WATCH_PREFIX}{}", self.0)
    }

    /// `https://youtu.be/<id>`
    pub fn short_url(&self) -> String {
        format!("{SHORT_PREFIX}{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_raw_id(s: &str) -> bool {
    s.len() == 11
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
