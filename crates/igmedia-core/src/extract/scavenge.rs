//! Last-resort URL scan over the serialized payload.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static MEDIA_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https://[^"']+\.(mp4|jpg|png|webp)"#).expect("media url regex")
});

/// First `.mp4` URL in the payload text, else the first image URL.
pub fn scavenge_media_url(payload: &Value) -> Option<String> {
    let text = payload.to_string();
    let mut first = None;
    for m in MEDIA_URL.find_iter(&text) {
        let url = m.as_str();
        if url.ends_with(".mp4") {
            return Some(url.to_string());
        }
        first.get_or_insert(url);
    }
    first.map(str::to_string)
}
