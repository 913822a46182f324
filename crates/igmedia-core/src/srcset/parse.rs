//! Responsive-image descriptor set parsing.

use crate::media::SrcsetCandidate;

/// Parses a `srcset` attribute value into candidates, in document order.
///
/// URLs may contain commas (CDN signatures do); a candidate's URL ends at the
/// first whitespace, and a comma only separates candidates once the URL is
/// complete. Trailing commas glued to a URL are separators, not URL text.
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetCandidate> {
    let mut out = Vec::new();
    let mut rest = srcset;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() {
            break;
        }

        let url_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let raw_url = &rest[..url_end];
        rest = &rest[url_end..];

        let url = raw_url.trim_end_matches(',');
        let descriptor = if url.len() < raw_url.len() {
            // "a.jpg, b.jpg 2x": the comma closed this candidate.
            None
        } else {
            let desc_end = rest.find(',').unwrap_or(rest.len());
            let desc = rest[..desc_end].trim();
            rest = &rest[desc_end..];
            (!desc.is_empty()).then(|| desc.to_string())
        };

        if !url.is_empty() {
            out.push(SrcsetCandidate {
                url: url.to_string(),
                descriptor,
            });
        }
    }
    out
}
