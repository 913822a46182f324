//! Resource-timing entries from a HAR (HTTP Archive) capture.
//!
//! A HAR exported from the browser's network panel stands in for
//! `performance.getEntriesByType("resource")`: each entry becomes a
//! [`ResourceEntry`]. HAR entries are recorded in request start order, so the
//! entry index is used as the start time.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::ResourceEntry;

/// Root HAR log (top-level wrapper).
#[derive(Debug, Deserialize)]
struct HarLog {
    log: HarRoot,
}

#[derive(Debug, Deserialize)]
struct HarRoot {
    #[serde(default)]
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
    response: HarResponse,
    /// Chromium extension: "media", "xhr", "image", ...
    #[serde(default, rename = "_resourceType")]
    resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HarRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
struct HarResponse {
    /// Body bytes as received; -1 when unknown.
    #[serde(default, rename = "bodySize")]
    body_size: Option<i64>,
    #[serde(default)]
    content: Option<HarContent>,
}

#[derive(Debug, Deserialize)]
struct HarContent {
    #[serde(default)]
    size: Option<i64>,
}

impl HarEntry {
    /// Encoded size: `bodySize`, else the decoded `content.size`; unknown when neither is positive.
    fn encoded_size(&self) -> Option<u64> {
        let content = self.response.content.as_ref().and_then(|c| c.size);
        [self.response.body_size, content]
            .into_iter()
            .flatten()
            .find(|n| *n > 0)
            .map(|n| n as u64)
    }
}

/// Parses HAR JSON into resource-timing entries, in capture order.
pub fn parse_resource_entries(bytes: &[u8]) -> Result<Vec<ResourceEntry>> {
    let har: HarLog = serde_json::from_slice(bytes).context("parse HAR JSON")?;
    Ok(har
        .log
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| ResourceEntry {
            name: e.request.url.clone(),
            initiator_type: e.resource_type.clone().unwrap_or_default(),
            encoded_body_size: e.encoded_size(),
            start_time: i as f64,
        })
        .collect())
}

/// Reads a HAR file and returns its resource-timing entries.
pub fn resource_entries(path: &Path) -> Result<Vec<ResourceEntry>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    parse_resource_entries(&bytes).with_context(|| format!("HAR file: {}", path.display()))
}
