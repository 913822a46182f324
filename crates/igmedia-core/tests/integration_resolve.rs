//! Integration tests: libcurl fetcher against a local server, end-to-end resolution.
//!
//! Each test starts its own canned-route server and points both origins of the
//! resolver config at it.

mod common;

use std::collections::HashMap;
use std::io::Write;

use igmedia_core::http::{CurlFetcher, Fetcher};
use igmedia_core::page::{har, VideoElement};
use igmedia_core::probe::ProbeStep;
use igmedia_core::remote::{endpoints, Tier};
use igmedia_core::{
    MediaElement, MediaResolver, PageContext, ResolverConfig, Source, SrcsetCandidate,
};
use tempfile::NamedTempFile;

fn route(target: &str, status: u32, body: &[u8]) -> (String, u32, Vec<u8>) {
    (target.to_string(), status, body.to_vec())
}

fn config_for(server: &common::media_server::MediaServer) -> ResolverConfig {
    ResolverConfig::default().with_origin(&server.base)
}

#[test]
fn curl_fetcher_reports_status_body_and_size() {
    let server = common::media_server::start(vec![route("/media/a.bin", 200, &[7u8; 1234])]);
    let fetcher = CurlFetcher::default();

    let ok = fetcher.get(&server.url("/media/a.bin"), &HashMap::new()).unwrap();
    assert_eq!(ok.status, 200);
    assert_eq!(ok.body.len(), 1234);
    assert_eq!(fetcher.content_size(&server.url("/media/a.bin")).unwrap(), 1234);

    let missing = fetcher.get(&server.url("/nope"), &HashMap::new()).unwrap();
    assert_eq!(missing.status, 404);
    assert!(!missing.is_success());
}

#[tokio::test]
async fn srcset_probe_over_http_picks_largest() {
    let server = common::media_server::start(vec![
        route("/img_320.jpg", 200, &[0u8; 320]),
        route("/img_1080.jpg", 200, &[0u8; 4096]),
        route("/img_640.jpg", 200, &[0u8; 640]),
    ]);
    let resolver = MediaResolver::with_curl(config_for(&server));
    let element = MediaElement::image(&server.url("/img_640.jpg")).with_srcset(vec![
        SrcsetCandidate {
            url: server.url("/img_320.jpg"),
            descriptor: Some("320w".into()),
        },
        SrcsetCandidate {
            url: server.url("/img_1080.jpg"),
            descriptor: Some("1080w".into()),
        },
    ]);

    let out = resolver
        .resolve_traced(&element, &PageContext::for_path("/p/ABC123/"))
        .await
        .unwrap();
    assert_eq!(out.source, Source::Srcset);
    assert_eq!(out.url, server.url("/img_1080.jpg"));
    assert_eq!(server.targets().len(), 3);
}

#[tokio::test]
async fn post_blob_resolves_through_graphql_after_primary_404() {
    let probe = ResolverConfig::default().with_origin("http://127.0.0.1:1");
    let graphql_target = endpoints::graphql_url(&probe, "ABC123")
        .unwrap()
        .trim_start_matches("http://127.0.0.1:1")
        .to_string();
    let server = common::media_server::start(vec![
        route("/p/ABC123/?__a=1&__d=dis", 404, b"{}"),
        route(
            &graphql_target,
            200,
            br#"{"data":{"shortcode_media":{"video_url":"https://cdn.example/v1.mp4"}}}"#,
        ),
    ]);
    let resolver = MediaResolver::with_curl(config_for(&server));

    let out = resolver
        .resolve_traced(
            &MediaElement::video("blob:https://www.instagram.com/0c1d"),
            &PageContext::for_path("/p/ABC123/"),
        )
        .await
        .unwrap();
    assert_eq!(out.url, "https://cdn.example/v1.mp4");
    assert_eq!(out.source, Source::Remote(Tier::GraphQl));
    assert_eq!(
        server.targets(),
        vec!["/p/ABC123/?__a=1&__d=dis".to_string(), graphql_target]
    );
}

#[tokio::test]
async fn story_feed_sends_app_id() {
    let server = common::media_server::start(vec![route(
        "/api/v1/feed/user/alice/story/",
        200,
        br#"{"reel":{"items":[{"video_versions":[{"url":"https://cdn.example/story.mp4"}]}]}}"#,
    )]);
    let config = config_for(&server);
    let app_id = config.app_id.clone();
    let resolver = MediaResolver::with_curl(config);

    let out = resolver
        .resolve_traced(
            &MediaElement::image("blob:https://www.instagram.com/77"),
            &PageContext::for_path("/stories/alice/"),
        )
        .await
        .unwrap();
    assert_eq!(out.url, "https://cdn.example/story.mp4");
    assert_eq!(out.source, Source::Remote(Tier::StoryFeed));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("x-ig-app-id"), Some(&app_id));
}

#[tokio::test]
async fn every_tier_failing_returns_the_blob() {
    let server = common::media_server::start(Vec::new());
    let resolver = MediaResolver::with_curl(config_for(&server));
    let blob = "blob:https://www.instagram.com/dead";

    let out = resolver
        .resolve_traced(&MediaElement::video(blob), &PageContext::for_path("/reel/XYZ7890/"))
        .await
        .unwrap();
    assert_eq!(out.url, blob);
    assert_eq!(out.source, Source::BlobFallback);
    assert_eq!(server.targets().len(), 2);
    assert!(server.targets()[0].starts_with("/reel/XYZ7890/"));
}

#[tokio::test]
async fn snapshot_and_har_resolve_without_network() {
    let html = r#"<html><body>
        <video src="blob:https://www.instagram.com/1a2b"></video>
    </body></html>"#;
    let har_json = br#"{"log":{"version":"1.2","entries":[
        {"request":{"url":"https://cdn.example/seg/720.mp4"},"response":{"status":200,"bodySize":2048},"_resourceType":"xhr"},
        {"request":{"url":"https://cdn.example/seg/1080.mp4"},"response":{"status":200,"bodySize":8192},"_resourceType":"xhr"},
        {"request":{"url":"https://cdn.example/app.js"},"response":{"status":200,"bodySize":99999},"_resourceType":"script"}
    ]}}"#;
    let mut har_file = NamedTempFile::new().unwrap();
    har_file.write_all(har_json).unwrap();
    har_file.flush().unwrap();

    let page = PageContext::from_html("https://www.instagram.com/reel/XYZ7890/", html)
        .unwrap()
        .with_resource_timing(har::resource_entries(har_file.path()).unwrap());
    assert_eq!(
        page.videos,
        vec![VideoElement {
            src: "blob:https://www.instagram.com/1a2b".into(),
            ..VideoElement::default()
        }]
    );

    let server = common::media_server::start(Vec::new());
    let resolver = MediaResolver::with_curl(config_for(&server));
    let out = resolver
        .resolve_traced(&MediaElement::video("blob:https://www.instagram.com/1a2b"), &page)
        .await
        .unwrap();
    assert_eq!(out.url, "https://cdn.example/seg/1080.mp4");
    assert_eq!(out.source, Source::DirectProbe(ProbeStep::ResourceTiming));
    assert!(server.targets().is_empty());
}
