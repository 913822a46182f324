//! Metadata endpoint URLs.

use url::Url;

use crate::config::ResolverConfig;
use crate::content::ContentType;
use crate::http::FetchError;

/// Public JSON view of a content page: `{origin}/{marker}/{id}/?__a=1&__d=dis`.
pub fn primary_url(config: &ResolverConfig, content_type: ContentType, id: &str) -> String {
    format!(
        "{}/{}/{}/?__a=1&__d=dis",
        config.origin,
        content_type.path_marker(),
        id
    )
}

/// Shortcode GraphQL query with its variables encoded.
pub fn graphql_url(config: &ResolverConfig, shortcode: &str) -> Result<String, FetchError> {
    let base = format!("{}/graphql/query/", config.origin);
    let mut url = Url::parse(&base)
        .map_err(|e| FetchError::Request(format!("graphql endpoint {}: {}", base, e)))?;
    let variables = serde_json::json!({ "shortcode": shortcode }).to_string();
    url.query_pairs_mut()
        .append_pair("query_hash", &config.graphql_query_hash)
        .append_pair("variables", &variables);
    Ok(url.into())
}

/// Private story feed of a user.
pub fn story_feed_url(config: &ResolverConfig, username: &str) -> String {
    format!(
        "{}/api/v1/feed/user/{}/story/",
        config.private_api_origin, username
    )
}

/// Reels media lookup for a highlight reel id.
pub fn reels_media_url(config: &ResolverConfig, reel_id: &str) -> String {
    format!(
        "{}/api/v1/feed/reels_media/?reel_ids=highlight:{}",
        config.origin, reel_id
    )
}

/// Profile JSON view.
pub fn profile_url(config: &ResolverConfig, username: &str) -> String {
    format!("{}/{}/?__a=1", config.origin, username)
}
