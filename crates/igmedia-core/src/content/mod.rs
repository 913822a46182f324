//! Content identification from the page's navigation path.
//!
//! Derives the content type (post, reel, tv, story) and the content or story
//! identifiers without any network access.

mod story;

pub use story::{extract_story_context, StoryContext};

use serde::Serialize;
use std::fmt;

/// Path segments that mark a content type rather than identify content.
const MARKER_SEGMENTS: &[&str] = &["p", "reel", "tv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Post,
    Reel,
    Tv,
    Story,
}

impl ContentType {
    /// Path segment the content's own page lives under (`/p/<id>/`, `/reel/<id>/`, ...).
    pub fn path_marker(self) -> &'static str {
        match self {
            ContentType::Post => "p",
            ContentType::Reel => "reel",
            ContentType::Tv => "tv",
            ContentType::Story => "stories",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "post"),
            Self::Reel => write!(f, "reel"),
            Self::Tv => write!(f, "tv"),
            Self::Story => write!(f, "story"),
        }
    }
}

/// Classifies the navigation path by its first matching marker; defaults to `Post`.
pub fn classify_content_type(path: &str) -> ContentType {
    if path.contains("/p/") {
        ContentType::Post
    } else if path.contains("/reel/") {
        ContentType::Reel
    } else if path.contains("/tv/") {
        ContentType::Tv
    } else if path.contains("/stories/") {
        ContentType::Story
    } else {
        ContentType::Post
    }
}

/// Picks the longest non-marker path segment (first one on ties) as the content id.
///
/// Tolerates marker position drift (`/user/p/CODE/`, `/p/CODE/c/123/`): shortcodes
/// are longer than the surrounding segments in practice.
pub fn extract_content_id(path: &str) -> Option<String> {
    let mut best: Option<&str> = None;
    for segment in path.split('/') {
        if segment.is_empty() || MARKER_SEGMENTS.contains(&segment) {
            continue;
        }
        if best.map_or(true, |b| segment.len() > b.len()) {
            best = Some(segment);
        }
    }
    best.map(str::to_string)
}

/// Everything the engine derives from the path for one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentContext {
    pub content_type: ContentType,
    pub content_id: Option<String>,
    pub story: Option<StoryContext>,
}

impl ContentContext {
    pub fn from_path(path: &str) -> Self {
        Self {
            content_type: classify_content_type(path),
            content_id: extract_content_id(path),
            story: extract_story_context(path),
        }
    }

    pub fn is_story(&self) -> bool {
        self.content_type == ContentType::Story
    }
}
