//! `backarc templates` – show the template list runs would use.

use anyhow::Result;

use super::load_templates;

pub async fn run_templates(source: &str) -> Result<()> {
    let entries = load_templates(source).await?;

    let mut usable = 0;
    for entry in &entries {
        if let Some(tpl) = entry.as_template() {
            usable += 1;
            println!("{}", tpl);
        }
    }
    let skipped = entries.len() - usable;
    if skipped > 0 {
        println!("({} usable, {} skipped)", usable, skipped);
    } else {
        println!("({} usable)", usable);
    }
    Ok(())
}
