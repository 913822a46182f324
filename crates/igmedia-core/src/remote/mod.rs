//! Tiered metadata fetching.
//!
//! Tiers run strictly in order and the next one starts only after the previous
//! failed (transport error, non-2xx, body not JSON). Posts, reels and IGTV use
//! the primary JSON view then the GraphQL query; stories use the private feed,
//! the reels-media lookup, then the profile view.

pub mod endpoints;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::config::ResolverConfig;
use crate::content::{ContentContext, StoryContext};
use crate::error::ResolveError;
use crate::http::{get_json, Fetcher};
use crate::strategy::{first_success, Strategy};

const APP_ID_HEADER: &str = "x-ig-app-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    GraphQl,
    StoryFeed,
    ReelsMedia,
    Profile,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Primary => "primary",
            Tier::GraphQl => "graphql",
            Tier::StoryFeed => "story feed",
            Tier::ReelsMedia => "reels media",
            Tier::Profile => "profile",
        };
        f.write_str(s)
    }
}

/// Fetches the first payload any tier serves for `content`.
///
/// Blocking: call from `spawn_blocking` in async code.
pub fn fetch_payload(
    fetcher: &dyn Fetcher,
    config: &ResolverConfig,
    content: &ContentContext,
) -> Result<(Tier, Value), ResolveError> {
    if content.is_story() {
        let story = content
            .story
            .as_ref()
            .ok_or_else(|| ResolveError::miss("story path names no owner"))?;
        story_chain(fetcher, config, story)
    } else {
        let id = content
            .content_id
            .as_deref()
            .ok_or_else(|| ResolveError::miss("path carries no content id"))?;
        post_chain(fetcher, config, content, id)
    }
}

fn post_chain(
    fetcher: &dyn Fetcher,
    config: &ResolverConfig,
    content: &ContentContext,
    id: &str,
) -> Result<(Tier, Value), ResolveError> {
    let no_headers = HashMap::new();
    let tiers = vec![
        Strategy::new("primary", || {
            let url = endpoints::primary_url(config, content.content_type, id);
            run_tier(fetcher, Tier::Primary, &url, &no_headers)
        }),
        Strategy::new("graphql", || {
            let url = endpoints::graphql_url(config, id)?;
            run_tier(fetcher, Tier::GraphQl, &url, &no_headers)
        }),
    ];
    first_success("remote", tiers).map(|(_, hit)| hit)
}

fn story_chain(
    fetcher: &dyn Fetcher,
    config: &ResolverConfig,
    story: &StoryContext,
) -> Result<(Tier, Value), ResolveError> {
    let mut app_headers = HashMap::new();
    app_headers.insert(APP_ID_HEADER.to_string(), config.app_id.clone());
    let no_headers = HashMap::new();
    let reel_id = story.story_id.as_deref().unwrap_or(&story.username);

    let tiers = vec![
        Strategy::new("story feed", || {
            let url = endpoints::story_feed_url(config, &story.username);
            run_tier(fetcher, Tier::StoryFeed, &url, &app_headers)
        }),
        Strategy::new("reels media", || {
            let url = endpoints::reels_media_url(config, reel_id);
            run_tier(fetcher, Tier::ReelsMedia, &url, &app_headers)
        }),
        Strategy::new("profile", || {
            let url = endpoints::profile_url(config, &story.username);
            run_tier(fetcher, Tier::Profile, &url, &no_headers)
        }),
    ];
    first_success("remote", tiers).map(|(_, hit)| hit)
}

fn run_tier(
    fetcher: &dyn Fetcher,
    tier: Tier,
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<(Tier, Value), ResolveError> {
    tracing::debug!(tier = %tier, url = %url, "requesting metadata");
    match get_json(fetcher, url, headers) {
        Ok(payload) => Ok((tier, payload)),
        Err(e) => {
            tracing::warn!(tier = %tier, "metadata tier failed: {}", e);
            Err(e.into())
        }
    }
}
