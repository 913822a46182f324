//! Story owner and story id from a `/stories/...` path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static STORY_WITH_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/stories/([^/]+)/(\d+)").expect("story id regex"));

static STORY_OWNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/stories/([^/]+)").expect("story owner regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryContext {
    pub username: String,
    /// Numeric story id, when the path names a single story item.
    pub story_id: Option<String>,
}

/// `/stories/<user>/<digits>` first, then `/stories/<user>` with no id; `None` otherwise.
pub fn extract_story_context(path: &str) -> Option<StoryContext> {
    if !path.contains("/stories/") {
        return None;
    }
    if let Some(caps) = STORY_WITH_ID.captures(path) {
        return Some(StoryContext {
            username: caps[1].to_string(),
            story_id: Some(caps[2].to_string()),
        });
    }
    STORY_OWNER.captures(path).map(|caps| StoryContext {
        username: caps[1].to_string(),
        story_id: None,
    })
}
