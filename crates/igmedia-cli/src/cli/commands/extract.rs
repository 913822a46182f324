//! `igmedia extract <payload.json>` – run path extraction over a saved payload.

use anyhow::{Context, Result};
use igmedia_core::extract::extract_media_url;
use std::path::Path;

pub fn run_extract(path: &Path, story: bool) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read payload: {}", path.display()))?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse payload: {}", path.display()))?;
    let url = extract_media_url(&payload, story)?;
    println!("{url}");
    Ok(())
}
