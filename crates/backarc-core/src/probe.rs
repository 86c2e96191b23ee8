//! Post-settle page probe.
//!
//! Archive frontends that are up but not serving (a bare reverse proxy)
//! answer with a stock placeholder page. That is the only readable title
//! treated as a failure; anything else, including a page whose title cannot
//! be read at all, counts as an accepted submission.

/// What could be read of the settled page's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleReading {
    Readable(String),
    Unreadable,
}

/// Per-task verdict recorded against the originating backlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

const PLACEHOLDER: &str = "welcome to nginx";

/// Judge a settled page by its title. The placeholder match is an exact
/// comparison after trimming and lowercasing.
pub fn judge(reading: &TitleReading) -> Outcome {
    match reading {
        TitleReading::Readable(title) if title.trim().eq_ignore_ascii_case(PLACEHOLDER) => {
            Outcome::Failure
        }
        _ => Outcome::Success,
    }
}
