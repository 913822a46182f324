//! Injected page state.
//!
//! Everything the engine would otherwise read from the live page (location,
//! video elements, resource-timing buffer, page globals, inline scripts) is
//! carried in a [`PageContext`] value built by the caller, from a saved HTML
//! snapshot ([`PageContext::from_html`]) and optionally a HAR capture
//! ([`har::resource_entries`]).

pub mod har;
mod snapshot;

pub use snapshot::SnapshotError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `<video>` element as seen by the probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoElement {
    /// `src`/`currentSrc`; empty when unset.
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub poster: Option<String>,
    /// `src` of child `<source>` elements, in document order.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// One entry of the resource-timing buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Requested URL.
    pub name: String,
    #[serde(default)]
    pub initiator_type: String,
    /// Encoded body size; `None` when the browser withheld it (cross-origin without TAO).
    #[serde(default)]
    pub encoded_body_size: Option<u64>,
    /// Start time in milliseconds since navigation start.
    #[serde(default)]
    pub start_time: f64,
}

/// Page-state holders the probe consults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageGlobals {
    /// `window.__additionalData`.
    #[serde(default)]
    pub additional_data: Option<Value>,
    /// `window._sharedData`.
    #[serde(default)]
    pub shared_data: Option<Value>,
}

/// An inline `<script>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    /// `type` attribute, if present.
    #[serde(default)]
    pub script_type: Option<String>,
    pub text: String,
}

impl ScriptTag {
    pub fn is_json(&self) -> bool {
        self.script_type
            .as_deref()
            .map_or(false, |t| t.trim().eq_ignore_ascii_case("application/json"))
    }
}

/// Ambient page state for one resolution call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Navigation path (`location.pathname`), e.g. `/p/ABC123/`.
    pub path: String,
    #[serde(default)]
    pub videos: Vec<VideoElement>,
    /// `None` when the resource-timing API is unavailable.
    #[serde(default)]
    pub resource_timing: Option<Vec<ResourceEntry>>,
    #[serde(default)]
    pub globals: PageGlobals,
    #[serde(default)]
    pub scripts: Vec<ScriptTag>,
}

impl PageContext {
    /// Bare context for a navigation path: no elements, no timing buffer, no scripts.
    pub fn for_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    /// Context for a full page URL (only the path is kept).
    pub fn for_url(page_url: &str) -> Result<Self, SnapshotError> {
        Ok(Self::for_path(&snapshot::path_of(page_url)?))
    }

    /// Builds the context from a saved HTML document.
    pub fn from_html(page_url: &str, html: &str) -> Result<Self, SnapshotError> {
        snapshot::from_html(page_url, html)
    }

    pub fn with_videos(mut self, videos: Vec<VideoElement>) -> Self {
        self.videos = videos;
        self
    }

    pub fn with_resource_timing(mut self, entries: Vec<ResourceEntry>) -> Self {
        self.resource_timing = Some(entries);
        self
    }

    pub fn with_globals(mut self, globals: PageGlobals) -> Self {
        self.globals = globals;
        self
    }

    pub fn with_scripts(mut self, scripts: Vec<ScriptTag>) -> Self {
        self.scripts = scripts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_script_type_detection() {
        let json = ScriptTag {
            script_type: Some(" Application/JSON ".into()),
            text: "{}".into(),
        };
        let plain = ScriptTag {
            script_type: None,
            text: "{}".into(),
        };
        let ld = ScriptTag {
            script_type: Some("application/ld+json".into()),
            text: "{}".into(),
        };
        assert!(json.is_json());
        assert!(!plain.is_json());
        assert!(!ld.is_json());
    }

    #[test]
    fn for_url_keeps_path_only() {
        let ctx = PageContext::for_url("https://www.instagram.com/reel/XYZ7890/?igsh=abc").unwrap();
        assert_eq!(ctx.path, "/reel/XYZ7890/");
        assert!(ctx.resource_timing.is_none());
        assert!(ctx.videos.is_empty());
    }

    #[test]
    fn context_from_json() {
        let ctx: PageContext = serde_json::from_str(
            r#"{"path":"/p/ABC/","resource_timing":[{"name":"https://cdn/v.mp4","encoded_body_size":10}]}"#,
        )
        .unwrap();
        let entries = ctx.resource_timing.unwrap();
        assert_eq!(entries[0].initiator_type, "");
        assert_eq!(entries[0].encoded_body_size, Some(10));
    }
}
