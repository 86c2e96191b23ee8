//! CLI command handlers. Each command is in its own file.

mod export;
mod run;
mod templates;

pub use export::run_export;
pub use run::run_submit;
pub use templates::run_templates;

use anyhow::Result;
use std::path::Path;

use backarc_core::template::{self, TemplateEntry};

/// Load the template list from an http(s) URL or a local JSON file.
pub(crate) async fn load_templates(source: &str) -> Result<Vec<TemplateEntry>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let source = source.to_string();
        let entries =
            tokio::task::spawn_blocking(move || template::fetch_templates(&source)).await??;
        Ok(entries)
    } else {
        Ok(template::load_templates_file(Path::new(source))?)
    }
}
