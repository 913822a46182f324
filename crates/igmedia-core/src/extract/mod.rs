//! Media URL extraction from schema-less payloads.
//!
//! The same pattern lists apply whatever produced the payload (page probe or
//! network tier). When no pattern matches, the serialized payload is scanned
//! for anything that looks like a media URL.

pub mod patterns;
mod query;
mod scavenge;

pub use query::{is_truthy, Query, QueryError};
pub use scavenge::scavenge_media_url;

use serde_json::Value;

use crate::error::ResolveError;

/// First truthy value selected by the earliest pattern that matches anything.
pub fn first_match<'v>(payload: &'v Value, patterns: &[Query]) -> Option<&'v Value> {
    patterns
        .iter()
        .filter_map(|q| q.first(payload))
        .find(|v| is_truthy(v))
}

fn first_url(payload: &Value, patterns: &[Query]) -> Option<String> {
    patterns.iter().find_map(|q| {
        let url = q.first(payload)?.as_str().filter(|s| !s.is_empty())?;
        tracing::trace!(pattern = %q, "pattern matched");
        Some(url.to_string())
    })
}

/// Extracts a media URL from `payload`.
///
/// Stories try story video paths, story image paths, the text scan, then the
/// post paths. Everything else tries the post paths, then the text scan.
pub fn extract_media_url(payload: &Value, is_story: bool) -> Result<String, ResolveError> {
    let found = if is_story {
        first_url(payload, &patterns::STORY_VIDEO)
            .or_else(|| first_url(payload, &patterns::STORY_IMAGE))
            .or_else(|| scavenge_media_url(payload))
            .or_else(|| first_url(payload, &patterns::POST_VIDEO))
    } else {
        first_url(payload, &patterns::POST_VIDEO).or_else(|| scavenge_media_url(payload))
    };
    found.ok_or_else(|| ResolveError::miss("no media URL in payload"))
}
