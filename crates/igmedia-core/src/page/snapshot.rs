//! Page context from a saved HTML document.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::{PageContext, PageGlobals, ScriptTag, VideoElement};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid page URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

static SHARED_DATA_ASSIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"window\._sharedData\s*=\s*").expect("shared data regex")
});

static ADDITIONAL_DATA_ASSIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"window\.__additionalData\s*=\s*").expect("additional data regex")
});

pub(super) fn path_of(page_url: &str) -> Result<String, SnapshotError> {
    let parsed = url::Url::parse(page_url).map_err(|source| SnapshotError::InvalidUrl {
        url: page_url.to_string(),
        source,
    })?;
    Ok(parsed.path().to_string())
}

pub(super) fn from_html(page_url: &str, html: &str) -> Result<PageContext, SnapshotError> {
    let path = path_of(page_url)?;
    let document = Html::parse_document(html);

    let video_selector = Selector::parse("video").expect("static selector");
    let source_selector = Selector::parse("source").expect("static selector");
    let script_selector = Selector::parse("script").expect("static selector");

    let videos: Vec<VideoElement> = document
        .select(&video_selector)
        .map(|video| VideoElement {
            src: attr(&video, "src").unwrap_or_default(),
            poster: attr(&video, "poster"),
            sources: video
                .select(&source_selector)
                .filter_map(|s| attr(&s, "src"))
                .collect(),
        })
        .collect();

    let scripts: Vec<ScriptTag> = document
        .select(&script_selector)
        .map(|script| ScriptTag {
            script_type: attr(&script, "type"),
            text: script.text().collect::<String>(),
        })
        .collect();

    let globals = PageGlobals {
        additional_data: assigned_global(&scripts, &ADDITIONAL_DATA_ASSIGN),
        shared_data: assigned_global(&scripts, &SHARED_DATA_ASSIGN),
    };

    tracing::debug!(
        path = %path,
        videos = videos.len(),
        scripts = scripts.len(),
        "parsed page snapshot"
    );

    Ok(PageContext {
        path,
        videos,
        resource_timing: None,
        globals,
        scripts,
    })
}

/// Non-empty attribute value.
fn attr(el: &ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First script assigning a JSON object to the global matched by `pattern`.
///
/// Only the object right after the assignment is read; later statements in the
/// same script are ignored.
fn assigned_global(scripts: &[ScriptTag], pattern: &Regex) -> Option<Value> {
    scripts.iter().find_map(|s| {
        let assign = pattern.find(&s.text)?;
        let rest = &s.text[assign.end()..];
        if !rest.starts_with('{') {
            return None;
        }
        match serde_json::Deserializer::from_str(rest).into_iter::<Value>().next()? {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!("global assignment is not JSON: {}", e);
                None
            }
        }
    })
}
