//! Largest-variant selection for responsive images.
//!
//! Every candidate (plus the active source, when it is a fetchable URL the set
//! does not already list) is downloaded and its body size measured. Probes run concurrently on
//! blocking tasks and are joined with an all-or-nothing barrier: one failed
//! probe fails the whole selection, so no comparison is made on partial data.

mod parse;

pub use parse::parse_srcset;

use std::sync::Arc;

use crate::error::ResolveError;
use crate::http::Fetcher;
use crate::media::{is_blob_url, SourceCandidate, SrcsetCandidate};

/// URLs to probe: the set in order, then `current` if it is non-empty, not a
/// blob reference and not listed.
pub fn candidate_urls(srcset: &[SrcsetCandidate], current: &str) -> Vec<String> {
    let mut urls: Vec<String> = srcset.iter().map(|c| c.url.clone()).collect();
    if !current.is_empty() && !is_blob_url(current) && !urls.iter().any(|u| u == current) {
        urls.push(current.to_string());
    }
    urls
}

/// Candidate with the strictly largest size; ties keep the earliest.
pub fn pick_biggest(candidates: &[SourceCandidate]) -> Option<&SourceCandidate> {
    let mut best: Option<&SourceCandidate> = None;
    for c in candidates {
        let size = c.bytesize.unwrap_or(0);
        if best.map_or(true, |b| size > b.bytesize.unwrap_or(0)) {
            best = Some(c);
        }
    }
    best
}

/// Probes every candidate and returns the URL serving the most bytes.
pub async fn resolve_biggest(
    fetcher: Arc<dyn Fetcher>,
    srcset: &[SrcsetCandidate],
    current: &str,
) -> Result<String, ResolveError> {
    let urls = candidate_urls(srcset, current);
    if urls.is_empty() {
        return Err(ResolveError::miss("srcset has no candidates"));
    }

    let probes: Vec<_> = urls
        .iter()
        .map(|url| {
            let fetcher = Arc::clone(&fetcher);
            let url = url.clone();
            tokio::task::spawn_blocking(move || fetcher.content_size(&url))
        })
        .collect();

    let mut sized = Vec::with_capacity(urls.len());
    for (url, probe) in urls.into_iter().zip(probes) {
        let bytesize = probe.await??;
        tracing::debug!(url = %url, bytesize, "srcset candidate probed");
        sized.push(SourceCandidate {
            url,
            bytesize: Some(bytesize),
        });
    }

    pick_biggest(&sized)
        .map(|c| c.url.clone())
        .ok_or_else(|| ResolveError::miss("srcset has no candidates"))
}
