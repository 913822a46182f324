//! `igmedia classify <url>` – content type and identifiers of a page.

use anyhow::Result;
use igmedia_core::content::ContentContext;
use igmedia_core::PageContext;

pub fn run_classify(url: &str) -> Result<()> {
    let page = PageContext::for_url(url)?;
    let content = ContentContext::from_path(&page.path);
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}
