//! `backarc export` – print or write the expanded backlink list.

use anyhow::Result;
use std::fs;
use std::path::Path;

use backarc_core::task::{expand_backlinks, export_backlinks};
use backarc_core::video::VideoId;

use super::load_templates;

pub async fn run_export(input: &str, template_source: &str, output: Option<&Path>) -> Result<()> {
    let id = VideoId::parse(input)?;
    let templates = load_templates(template_source).await?;

    let backlinks = expand_backlinks(&id, &templates);
    let text = export_backlinks(&backlinks);

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))?;
            println!("wrote {} backlink(s) to {}", backlinks.len(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
