//! Library error types.
//!
//! Only `ConfigError` is fatal, and only before a run starts. Everything a
//! transport can hit (blocked open, failed navigation, timeout) degrades to
//! a recorded per-task failure; a single bad target never blocks the queue.

use thiserror::Error;

/// Pre-start validation error: the run is refused before any worker spawns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no archive target selected")]
    NoTargets,
    #[error("no templates available")]
    NoTemplates,
}

/// Input could not be parsed as a video id or a video URL.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a valid video link or 11-character id: {input}")]
pub struct VideoIdError {
    pub input: String,
}

/// Template list loading problems. An empty list counts: a run must be
/// refused when no templates are available.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template list request failed: {0}")]
    Fetch(String),
    #[error("template list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("template list is empty")]
    Empty,
    #[error("could not read template file: {0}")]
    Io(#[from] std::io::Error),
}

/// Navigation-level failure inside a transport resource.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("window is closed")]
    WindowClosed,
    #[error("navigation failed: {0}")]
    Failed(String),
}

/// The window open call was refused (the popup-blocked case).
#[derive(Debug, Error)]
#[error("window open was blocked")]
pub struct OpenBlocked;
