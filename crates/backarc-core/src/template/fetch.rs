//! Fetch the template list over HTTP (curl) or read it from a local file.

use std::path::Path;
use std::time::Duration;

use crate::error::TemplateError;

use super::{parse_template_list, TemplateEntry};

/// Published template list used when the config does not override it.
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://backlink-generator-tool.github.io/backlink-generator-tool/youtube-backlink-templates.json";

/// GET the template JSON list. Runs on the current thread; call from
/// `spawn_blocking` when used from async code.
pub fn fetch_templates(url: &str) -> Result<Vec<TemplateEntry>, TemplateError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.connect_timeout(Duration::from_secs(15)).map_err(curl_err)?;
    easy.timeout(Duration::from_secs(30)).map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&code) {
        return Err(TemplateError::Fetch(format!(
            "GET {} returned HTTP {}",
            url, code
        )));
    }

    let text = String::from_utf8_lossy(&body);
    parse_template_list(&text)
}

/// Read the template list from a local JSON file.
pub fn load_templates_file(path: &Path) -> Result<Vec<TemplateEntry>, TemplateError> {
    let data = std::fs::read_to_string(path)?;
    parse_template_list(&data)
}

fn curl_err(e: curl::Error) -> TemplateError {
    TemplateError::Fetch(e.to_string())
}
