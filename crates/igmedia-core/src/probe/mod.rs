//! No-network media recovery from the page itself.
//!
//! Steps run in a fixed order and the first hit wins:
//! video elements, the resource-timing buffer, page globals, JSON script tags,
//! and the `__additionalDataLoaded` loader script. A hit is either a direct URL
//! or a payload that still has to go through path extraction.

mod scripts;
mod timing;
mod video;

pub use timing::pick_media_resource;
pub use video::pick_video_source;

use serde_json::Value;
use std::fmt;

use crate::error::ResolveError;
use crate::page::PageContext;
use crate::strategy::{first_success, Strategy};

/// Which probe step produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    VideoElement,
    ResourceTiming,
    AdditionalData,
    SharedData,
    ScriptJson,
    LoaderScript,
}

impl fmt::Display for ProbeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::VideoElement => "video element",
            Self::ResourceTiming => "resource timing",
            Self::AdditionalData => "additional data",
            Self::SharedData => "shared data",
            Self::ScriptJson => "json script",
            Self::LoaderScript => "loader script",
        };
        f.write_str(s)
    }
}

/// Result of a successful probe, tagged by family.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeHit {
    /// Directly usable URL.
    Url { step: ProbeStep, url: String },
    /// Payload to search with the path extractor.
    Payload { step: ProbeStep, payload: Value },
}

impl ProbeHit {
    pub fn step(&self) -> ProbeStep {
        match self {
            ProbeHit::Url { step, .. } | ProbeHit::Payload { step, .. } => *step,
        }
    }
}

/// Runs the probe steps in order and returns the first hit.
///
/// Fails with `ResolveError::Exhausted` (soft) when the page offers nothing,
/// which callers take as the signal to go to the network.
pub fn direct_probe(page: &PageContext) -> Result<ProbeHit, ResolveError> {
    let steps: Vec<Strategy<'_, ProbeHit>> = vec![
        Strategy::new("video elements", || {
            video::pick_video_source(&page.videos).map(|url| ProbeHit::Url {
                step: ProbeStep::VideoElement,
                url,
            })
        }),
        Strategy::new("resource timing", || {
            let entries = page
                .resource_timing
                .as_deref()
                .ok_or(ResolveError::ProbeUnavailable("resource timing"))?;
            timing::pick_media_resource(entries).map(|url| ProbeHit::Url {
                step: ProbeStep::ResourceTiming,
                url,
            })
        }),
        Strategy::new("page globals", || scripts::from_globals(&page.globals)),
        Strategy::new("json scripts", || {
            scripts::first_json_script(&page.scripts).map(|payload| ProbeHit::Payload {
                step: ProbeStep::ScriptJson,
                payload,
            })
        }),
        Strategy::new("loader script", || {
            scripts::loader_payload(&page.scripts).map(|payload| ProbeHit::Payload {
                step: ProbeStep::LoaderScript,
                payload,
            })
        }),
    ];
    first_success("direct probe", steps).map(|(_, hit)| hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::page::{PageGlobals, ResourceEntry, ScriptTag, VideoElement};
    use serde_json::json;

    fn timing(name: &str, size: Option<u64>, start: f64) -> ResourceEntry {
        ResourceEntry {
            name: name.into(),
            initiator_type: "xmlhttprequest".into(),
            encoded_body_size: size,
            start_time: start,
        }
    }

    #[test]
    fn video_element_beats_everything() {
        let page = PageContext::for_path("/stories/alice/")
            .with_videos(vec![VideoElement {
                src: "https://cdn/direct.mp4".into(),
                ..VideoElement::default()
            }])
            .with_resource_timing(vec![timing("https://cdn/other.mp4", Some(10), 1.0)]);
        let hit = direct_probe(&page).unwrap();
        assert_eq!(
            hit,
            ProbeHit::Url {
                step: ProbeStep::VideoElement,
                url: "https://cdn/direct.mp4".into()
            }
        );
    }

    #[test]
    fn timing_used_when_videos_are_blobs() {
        let page = PageContext::for_path("/stories/alice/")
            .with_videos(vec![VideoElement {
                src: "blob:https://x/1".into(),
                ..VideoElement::default()
            }])
            .with_resource_timing(vec![timing("https://cdn/v/clip.mp4", Some(10), 1.0)]);
        let hit = direct_probe(&page).unwrap();
        assert_eq!(hit.step(), ProbeStep::ResourceTiming);
    }

    #[test]
    fn globals_before_scripts() {
        let page = PageContext::for_path("/stories/alice/")
            .with_globals(PageGlobals {
                additional_data: Some(json!({"graphql": {}})),
                shared_data: None,
            })
            .with_scripts(vec![ScriptTag {
                script_type: Some("application/json".into()),
                text: r#"{"a":1}"#.into(),
            }]);
        let hit = direct_probe(&page).unwrap();
        assert_eq!(hit.step(), ProbeStep::AdditionalData);
    }

    #[test]
    fn json_script_then_loader_script() {
        let loader = ScriptTag {
            script_type: None,
            text: r#"window.__additionalDataLoaded('/stories/alice/',{"reel":{"id":"1"}});"#.into(),
        };
        let page = PageContext::for_path("/stories/alice/").with_scripts(vec![loader.clone()]);
        match direct_probe(&page).unwrap() {
            ProbeHit::Payload { step, payload } => {
                assert_eq!(step, ProbeStep::LoaderScript);
                assert_eq!(payload["reel"]["id"], "1");
            }
            other => panic!("expected loader payload, got {:?}", other),
        }

        let page = PageContext::for_path("/stories/alice/").with_scripts(vec![
            loader,
            ScriptTag {
                script_type: Some("application/json".into()),
                text: r#"{"x":true}"#.into(),
            },
        ]);
        assert_eq!(direct_probe(&page).unwrap().step(), ProbeStep::ScriptJson);
    }

    #[test]
    fn empty_page_is_exhausted_with_unavailable_timing() {
        let err = direct_probe(&PageContext::for_path("/p/ABC/")).unwrap_err();
        match err {
            ResolveError::Exhausted { attempts, .. } => {
                assert_eq!(attempts.len(), 5);
                assert_eq!(attempts[1].0, "resource timing");
                assert_eq!(attempts[1].1.kind(), ErrorKind::ProbeUnavailable);
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }
}
