//! Usable URLs on live `<video>` elements.

use crate::error::ResolveError;
use crate::media::is_blob_url;
use crate::page::VideoElement;

/// First non-blob `src` across all videos; else the first poster; else the
/// first non-blob child `<source>`.
pub fn pick_video_source(videos: &[VideoElement]) -> Result<String, ResolveError> {
    if videos.is_empty() {
        return Err(ResolveError::ProbeUnavailable("video elements"));
    }
    let usable = |u: &&String| !u.is_empty() && !is_blob_url(u);

    videos
        .iter()
        .map(|v| &v.src)
        .find(usable)
        .or_else(|| {
            videos
                .iter()
                .filter_map(|v| v.poster.as_ref())
                .find(|p| !p.is_empty())
        })
        .or_else(|| videos.iter().flat_map(|v| v.sources.iter()).find(usable))
        .cloned()
        .ok_or_else(|| ResolveError::miss("every video element is blob-backed"))
}
