//! Navigator backed by a plain curl GET.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::NavError;
use crate::probe::TitleReading;

use super::navigator::Navigator;

const USER_AGENT: &str = concat!("backarc/", env!("CARGO_PKG_VERSION"));

/// Loads submission URLs over HTTP and extracts the page title. Archive
/// endpoints answer submissions with an ordinary HTML page, so the title is
/// whatever the service rendered; error statuses still carry a page and are
/// not navigation failures.
#[derive(Default)]
pub struct HttpNavigator;

impl HttpNavigator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    async fn load(&self, url: &str) -> Result<TitleReading, NavError> {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || fetch_page(&url))
            .await
            .map_err(|e| NavError::Failed(e.to_string()))?
    }
}

fn fetch_page(url: &str) -> Result<TitleReading, NavError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(nav_err)?;
    easy.follow_location(true).map_err(nav_err)?;
    easy.useragent(USER_AGENT).map_err(nav_err)?;
    easy.connect_timeout(Duration::from_secs(30)).map_err(nav_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(nav_err)?;
        transfer.perform().map_err(nav_err)?;
    }

    Ok(extract_title(&String::from_utf8_lossy(&body)))
}

fn nav_err(e: curl::Error) -> NavError {
    NavError::Failed(e.to_string())
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap())
}

/// A page without a `<title>` element is unreadable, not an error.
fn extract_title(html: &str) -> TitleReading {
    match title_re().captures(html) {
        Some(caps) => TitleReading::Readable(caps[1].trim().to_string()),
        None => TitleReading::Unreadable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_simple_title() {
        let html = "<html><head><title>archive.ph</title></head></html>";
        assert_eq!(
            extract_title(html),
            TitleReading::Readable("archive.ph".to_string())
        );
    }

    #[test]
    fn extracts_title_with_attributes_and_newlines() {
        let html = "<TITLE lang=\"en\">\n  Welcome to nginx!\n</TITLE>";
        assert_eq!(
            extract_title(html),
            TitleReading::Readable("Welcome to nginx!".to_string())
        );
    }

    #[test]
    fn missing_title_is_unreadable() {
        assert_eq!(extract_title("<html><body>hi</body></html>"), TitleReading::Unreadable);
        assert_eq!(extract_title(""), TitleReading::Unreadable);
    }
}
