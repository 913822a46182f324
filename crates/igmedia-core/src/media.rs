//! Media element model: the read-only view of the node being resolved.

use serde::{Deserialize, Serialize};

const BLOB_SCHEME: &str = "blob:";

/// True for opaque `blob:` references (not fetchable outside the page).
pub fn is_blob_url(url: &str) -> bool {
    url.starts_with(BLOB_SCHEME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One entry of a responsive-image descriptor set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcsetCandidate {
    pub url: String,
    /// Width/density descriptor as written (`"1080w"`, `"2x"`), if any.
    #[serde(default)]
    pub descriptor: Option<String>,
}

/// A renderable image or video node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaElement {
    pub kind: MediaKind,
    /// Active source (`src`/`currentSrc`); may be a `blob:` reference or empty.
    #[serde(default)]
    pub current_source: String,
    /// Parsed srcset, in document order.
    #[serde(default)]
    pub srcset: Vec<SrcsetCandidate>,
    /// Source URLs of child `<source>` nodes for `<picture>`-like composites.
    #[serde(default)]
    pub child_sources: Vec<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

impl MediaElement {
    pub fn image(src: &str) -> Self {
        Self {
            kind: MediaKind::Image,
            current_source: src.to_string(),
            srcset: Vec::new(),
            child_sources: Vec::new(),
            poster: None,
        }
    }

    pub fn video(src: &str) -> Self {
        Self {
            kind: MediaKind::Video,
            ..Self::image(src)
        }
    }

    pub fn with_srcset(mut self, srcset: Vec<SrcsetCandidate>) -> Self {
        self.srcset = srcset;
        self
    }

    pub fn with_child_sources(mut self, sources: Vec<String>) -> Self {
        self.child_sources = sources;
        self
    }

    pub fn with_poster(mut self, poster: Option<String>) -> Self {
        self.poster = poster;
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    pub fn has_blob_source(&self) -> bool {
        is_blob_url(&self.current_source)
    }

    pub fn has_srcset(&self) -> bool {
        !self.srcset.is_empty()
    }

    pub fn is_composite(&self) -> bool {
        !self.child_sources.is_empty()
    }
}

/// A probed srcset candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCandidate {
    pub url: String,
    pub bytesize: Option<u64>,
}
