//! Ordered path patterns for the payload shapes seen in the wild.

use once_cell::sync::Lazy;

use super::query::Query;

fn compile(patterns: &[&str]) -> Vec<Query> {
    patterns
        .iter()
        .map(|p| Query::parse(p).unwrap_or_else(|e| panic!("built-in pattern {}: {}", p, e)))
        .collect()
}

/// Story video URLs: tray/store shapes, the stories feed, then the other reel shapes.
pub static STORY_VIDEO: Lazy<Vec<Query>> = Lazy::new(|| {
    compile(&[
        "$..reels_media[0].items[0].video_versions[0].url",
        "$..stories_tray[0].items[0].video_versions[0].url",
        "$..tray[0].items[0].video_versions[0].url",
        "$..story.items[0].video_versions[0].url",
        "$..items[0].video_versions[0].url",
        "$..reel.items[0].video_versions[0].url",
        "$..reels.items[0].video_versions[0].url",
        "$..entry_data.StoriesPage[0].user.story.items[0].video_versions[0].url",
        "$..media_preview_payload.reels_media[0].items[0].video_versions[0].url",
        "$..data.reels_media[0].items[0].video_versions[0].url",
        "$..items[0].videoresources[0].src",
        "$..video_resources[0].src",
    ])
});

/// Story image URLs, used when a story has no video.
pub static STORY_IMAGE: Lazy<Vec<Query>> = Lazy::new(|| {
    compile(&[
        "$..items[0].image_versions2.candidates[0].url",
        "$..story.items[0].image_versions2.candidates[0].url",
        "$..reels_media[0].items[0].image_versions2.candidates[0].url",
        "$..entry_data.StoriesPage[0].user.story.items[0].image_versions2.candidates[0].url",
    ])
});

/// Post, reel and IGTV video URLs.
pub static POST_VIDEO: Lazy<Vec<Query>> = Lazy::new(|| {
    compile(&[
        "$..video_url",
        "$..shortform_video_url",
        "$.data.shortcode_media.video_url",
        "$..video_versions[0].url",
        "$..items[0].video_versions[0].url",
        "$..media[0].video_versions[0].url",
        "$..edge_sidecar_to_children.edges[0].node.video_url",
        "$..video_resources[0].src",
        "$..videoData.video_url",
    ])
});
