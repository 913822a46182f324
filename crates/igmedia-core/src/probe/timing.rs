//! Media fetches in the resource-timing buffer.

use crate::error::ResolveError;
use crate::page::ResourceEntry;

fn looks_like_media(entry: &ResourceEntry) -> bool {
    entry.name.contains(".mp4")
        || entry.name.contains("/video/")
        || entry.name.contains("/media/")
        || entry.initiator_type == "media"
}

/// Picks the media fetch most likely to be the one on screen.
///
/// When every media entry reports a size, the largest wins; otherwise the most
/// recently started one. Ties keep the earlier entry.
pub fn pick_media_resource(entries: &[ResourceEntry]) -> Result<String, ResolveError> {
    let media: Vec<&ResourceEntry> = entries.iter().filter(|e| looks_like_media(e)).collect();
    if media.is_empty() {
        return Err(ResolveError::miss("no media entries in resource timing"));
    }

    let all_sized = media
        .iter()
        .all(|e| e.encoded_body_size.map_or(false, |n| n > 0));

    let mut best = media[0];
    for entry in &media[1..] {
        let better = if all_sized {
            entry.encoded_body_size > best.encoded_body_size
        } else {
            entry.start_time > best.start_time
        };
        if better {
            best = entry;
        }
    }
    tracing::debug!(
        url = %best.name,
        candidates = media.len(),
        by_size = all_sized,
        "resource timing pick"
    );
    Ok(best.name.clone())
}
