//! Media URL resolution: the decision table over element shape and content type.
//!
//! Cheap local answers come first (blob passthrough for story videos, story
//! image upgrades, first child source). Responsive images are probed. Blob
//! sources go through the page probe, then the metadata tiers, then path
//! extraction, and fall back to the blob itself when all of that misses.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::content::ContentContext;
use crate::error::ResolveError;
use crate::extract::extract_media_url;
use crate::http::{CurlFetcher, Fetcher};
use crate::media::MediaElement;
use crate::page::{PageContext, VideoElement};
use crate::probe::{direct_probe, ProbeHit, ProbeStep};
use crate::remote::{fetch_payload, Tier};
use crate::srcset::resolve_biggest;

static RESOLUTION_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_(\d+)\.([A-Za-z0-9]+)(\?.*)?$").expect("resolution suffix regex")
});

/// Which branch produced a resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Story video playing from a blob; returned untouched.
    StoryBlob,
    /// Largest srcset candidate.
    Srcset,
    /// Story image rewritten to the target width.
    StoryUpgrade,
    /// Story image already at full size or without a resolution suffix.
    StoryDirect,
    /// First child `<source>` of a composite element.
    FirstChild,
    DirectProbe(ProbeStep),
    Remote(Tier),
    /// Nothing better found; the original blob reference.
    BlobFallback,
    /// Plain element, returned as-is.
    CurrentSource,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::StoryBlob => write!(f, "story blob"),
            Source::Srcset => write!(f, "srcset"),
            Source::StoryUpgrade => write!(f, "story upgrade"),
            Source::StoryDirect => write!(f, "story direct"),
            Source::FirstChild => write!(f, "first child source"),
            Source::DirectProbe(step) => write!(f, "page probe ({})", step),
            Source::Remote(tier) => write!(f, "remote ({})", tier),
            Source::BlobFallback => write!(f, "blob fallback"),
            Source::CurrentSource => write!(f, "current source"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub url: String,
    pub source: Source,
}

impl Resolved {
    fn new(url: impl Into<String>, source: Source) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}

/// Rewrites a trailing `_<digits>.<ext>` to `_<width>.<ext>`, keeping the query.
///
/// URLs already carrying `<width>x` or `<width>w` are left alone. Returns `None`
/// when nothing changes.
pub fn upgrade_story_image(url: &str, width: u32) -> Option<String> {
    if url.contains(&format!("{}x", width)) || url.contains(&format!("{}w", width)) {
        return None;
    }
    let upgraded = RESOLUTION_SUFFIX
        .replace(url, format!("_{}.${{2}}${{3}}", width).as_str())
        .into_owned();
    (upgraded != url).then_some(upgraded)
}

/// Resolves media elements to their best downloadable URL.
pub struct MediaResolver {
    config: ResolverConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl MediaResolver {
    pub fn new(config: ResolverConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Resolver backed by libcurl with the config's `[http]` options.
    pub fn with_curl(config: ResolverConfig) -> Self {
        let fetcher = Arc::new(CurlFetcher::new(config.http()));
        Self::new(config, fetcher)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Best URL for `element` on `page`.
    pub async fn resolve(
        &self,
        element: &MediaElement,
        page: &PageContext,
    ) -> Result<String, ResolveError> {
        self.resolve_traced(element, page).await.map(|r| r.url)
    }

    /// Like [`resolve`](Self::resolve), also reporting which branch produced the URL.
    pub async fn resolve_traced(
        &self,
        element: &MediaElement,
        page: &PageContext,
    ) -> Result<Resolved, ResolveError> {
        let content = ContentContext::from_path(&page.path);
        let current = element.current_source.as_str();
        tracing::debug!(
            path = %page.path,
            content_type = %content.content_type,
            kind = ?element.kind,
            "resolving media element"
        );

        let resolved = if content.is_story() && element.is_video() && element.has_blob_source() {
            Resolved::new(current, Source::StoryBlob)
        } else if element.has_srcset() {
            let url = resolve_biggest(Arc::clone(&self.fetcher), &element.srcset, current).await?;
            Resolved::new(url, Source::Srcset)
        } else if content.is_story() && !current.is_empty() && !element.has_blob_source() {
            match upgrade_story_image(current, self.config.story_target_width) {
                Some(url) => Resolved::new(url, Source::StoryUpgrade),
                None => Resolved::new(current, Source::StoryDirect),
            }
        } else if let Some(first) = element.child_sources.first() {
            Resolved::new(first.as_str(), Source::FirstChild)
        } else if element.has_blob_source() {
            self.resolve_blob(element, &content, page).await
        } else if current.is_empty() {
            return Err(ResolveError::miss("element has no source"));
        } else {
            Resolved::new(current, Source::CurrentSource)
        };

        tracing::info!(source = %resolved.source, url = %resolved.url, "media resolved");
        Ok(resolved)
    }

    /// Page probe, then metadata tiers, then the blob itself.
    async fn resolve_blob(
        &self,
        element: &MediaElement,
        content: &ContentContext,
        page: &PageContext,
    ) -> Resolved {
        let blob = element.current_source.as_str();
        let page = with_element_video(element, page);
        match direct_probe(&page) {
            Ok(ProbeHit::Url { step, url }) => return Resolved::new(url, Source::DirectProbe(step)),
            Ok(ProbeHit::Payload { step, payload }) => {
                match extract_media_url(&payload, content.is_story()) {
                    Ok(url) => return Resolved::new(url, Source::DirectProbe(step)),
                    Err(e) => tracing::debug!(step = %step, "probe payload had no media: {}", e),
                }
            }
            Err(e) => tracing::debug!("page probe found nothing: {}", e),
        }

        match self.fetch_remote(content).await {
            Ok((tier, payload)) => match extract_media_url(&payload, content.is_story()) {
                Ok(url) => return Resolved::new(url, Source::Remote(tier)),
                Err(e) => tracing::warn!(tier = %tier, "metadata had no media: {}", e),
            },
            Err(e) => tracing::warn!("metadata unavailable: {}", e),
        }

        Resolved::new(blob, Source::BlobFallback)
    }

    async fn fetch_remote(
        &self,
        content: &ContentContext,
    ) -> Result<(Tier, serde_json::Value), ResolveError> {
        let fetcher = Arc::clone(&self.fetcher);
        let config = self.config.clone();
        let content = content.clone();
        tokio::task::spawn_blocking(move || fetch_payload(fetcher.as_ref(), &config, &content))
            .await?
    }
}

/// `page`, with `element` listed among its videos when it is a video the page
/// does not already carry, so its poster and child sources are probed too.
fn with_element_video<'a>(element: &MediaElement, page: &'a PageContext) -> Cow<'a, PageContext> {
    let listed = page.videos.iter().any(|v| v.src == element.current_source);
    if !element.is_video() || listed {
        return Cow::Borrowed(page);
    }
    let mut page = page.clone();
    page.videos.insert(
        0,
        VideoElement {
            src: element.current_source.clone(),
            poster: element.poster.clone(),
            sources: element.child_sources.clone(),
        },
    );
    Cow::Owned(page)
}
