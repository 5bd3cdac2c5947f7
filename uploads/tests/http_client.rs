//! Drives the real HTTP client against a local stand-in for the YouTube API.

use pretty_assertions::assert_eq;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use youtube_uploads::youtube_api::{MAX_RESULTS_PER_PAGE, YouTubeClient};
use youtube_uploads::{ClientConfig, ErrorKind, PlaylistPager, VideoRecord};

type Route = fn(&str) -> (u16, String);

/// Minimal HTTP/1.1 server answering each request with `route(request target)`.
struct FakeApi {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    async fn start(route: Route) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let (read, mut write) = stream.into_split();
                    let mut lines = BufReader::new(read).lines();

                    let Ok(Some(request_line)) = lines.next_line().await else {
                        return;
                    };
                    // drain headers
                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.is_empty() {
                            break;
                        }
                    }

                    let target = request_line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push(target.clone());

                    let (status, body) = route(&target);
                    let response = format!(
                        "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = write.write_all(response.as_bytes()).await;
                    let _ = write.shutdown().await;
                });
            }
        });

        Self { addr, requests }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(format!("http://{}/youtube/v3", self.addr))
            .with_request_timeout(Duration::from_secs(5))
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn channel_body(uploads: &str) -> String {
    serde_json::json!({
        "kind": "youtube#channelListResponse",
        "pageInfo": { "totalResults": 1, "resultsPerPage": 5 },
        "items": [{
            "kind": "youtube#channel",
            "id": "UCabc",
            "contentDetails": { "relatedPlaylists": { "likes": "", "uploads": uploads } }
        }]
    })
    .to_string()
}

fn playlist_body(videos: &[(&str, &str)], next_page_token: Option<&str>) -> String {
    let items: Vec<_> = videos
        .iter()
        .enumerate()
        .map(|(position, (id, title))| {
            serde_json::json!({
                "kind": "youtube#playlistItem",
                "id": format!("item-{id}"),
                "snippet": {
                    "title": title,
                    "position": position,
                    "resourceId": { "kind": "youtube#video", "videoId": id }
                }
            })
        })
        .collect();
    let mut body = serde_json::json!({
        "kind": "youtube#playlistItemListResponse",
        "pageInfo": { "totalResults": 60, "resultsPerPage": 50 },
        "items": items,
    });
    if let Some(token) = next_page_token {
        body["nextPageToken"] = serde_json::Value::String(token.to_string());
    }
    body.to_string()
}

fn uploads_api(target: &str) -> (u16, String) {
    let path = target.split('?').next().unwrap_or_default();
    match path {
        "/youtube/v3/channels" if target.contains("id=UCabc") => (200, channel_body("UUabc")),
        "/youtube/v3/channels" => (
            200,
            r#"{"kind":"youtube#channelListResponse","pageInfo":{"totalResults":0,"resultsPerPage":5}}"#
                .to_string(),
        ),
        "/youtube/v3/playlistItems" if target.contains("pageToken=CDIQAA") => {
            (200, playlist_body(&[("b1", "Later")], None))
        }
        "/youtube/v3/playlistItems" => (
            200,
            playlist_body(&[("a1", "Newest"), ("a2", "Older")], Some("CDIQAA")),
        ),
        _ => (404, r#"{"error":{"code":404,"message":"Not Found"}}"#.to_string()),
    }
}

fn forbidden(_: &str) -> (u16, String) {
    (
        403,
        r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota."}}"#
            .to_string(),
    )
}

#[tokio::test]
async fn channel_lookup_sends_key_and_part() {
    let api = FakeApi::start(uploads_api).await;
    let client = YouTubeClient::with_config("test-key", &api.config()).unwrap();

    let channels = client.list_channel_content_details("UCabc").await.unwrap();

    assert_eq!(channels.items[0].content_details.uploads_playlist_id(), "UUabc");
    assert_eq!(
        api.requests(),
        vec!["/youtube/v3/channels?part=contentDetails&id=UCabc&key=test-key"]
    );
}

#[tokio::test]
async fn playlist_items_only_send_token_when_present() {
    let api = FakeApi::start(uploads_api).await;
    let client = YouTubeClient::with_config("test-key", &api.config()).unwrap();

    let first = client
        .list_playlist_items("UUabc", MAX_RESULTS_PER_PAGE, None)
        .await
        .unwrap();
    let second = client
        .list_playlist_items("UUabc", MAX_RESULTS_PER_PAGE, first.next_page_token.as_deref())
        .await
        .unwrap();

    assert_eq!(first.items.len(), 2);
    assert_eq!(second.items[0].snippet.resource_id.video_id, "b1");
    assert_eq!(second.next_page_token, None);
    assert_eq!(
        api.requests(),
        vec![
            "/youtube/v3/playlistItems?part=snippet&playlistId=UUabc&maxResults=50&key=test-key",
            "/youtube/v3/playlistItems?part=snippet&playlistId=UUabc&maxResults=50&pageToken=CDIQAA&key=test-key",
        ]
    );
}

#[tokio::test]
async fn pager_over_http() {
    let api = FakeApi::start(uploads_api).await;
    let pager = PlaylistPager::with_config("test-key", &api.config()).unwrap();

    let first = pager.fetch_videos("UCabc", 1).await.unwrap();
    assert_eq!(
        first.posts,
        vec![VideoRecord::new("a1", "Newest"), VideoRecord::new("a2", "Older")]
    );
    assert!(first.has_more);

    let second = pager.fetch_videos("UCabc", 2).await.unwrap();
    assert_eq!(second.posts, vec![VideoRecord::new("b1", "Later")]);
    assert!(!second.has_more);

    let err = pager.fetch_videos("UCabc", 3).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[tokio::test]
async fn unknown_channel_over_http() {
    let api = FakeApi::start(uploads_api).await;
    let pager = PlaylistPager::with_config("test-key", &api.config()).unwrap();

    let err = pager.fetch_videos("UCmissing", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn error_status_becomes_upstream_error() {
    let api = FakeApi::start(forbidden).await;
    let pager = PlaylistPager::with_config("test-key", &api.config()).unwrap();

    let err = pager.fetch_videos("UCabc", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    let message = err.to_string();
    assert!(
        message.starts_with("error getting channel details: YouTube API GET request failed with status 403"),
        "{message}"
    );
    assert!(message.contains("exceeded your quota"), "{message}");
}

#[tokio::test]
async fn unreachable_api_is_upstream_error() {
    // bind and immediately drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig::default()
        .with_base_url(format!("http://{addr}/youtube/v3"))
        .with_request_timeout(Duration::from_secs(2));
    let pager = PlaylistPager::with_config("SECRETKEY123", &config).unwrap();

    let err = pager.fetch_videos("UCabc", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    let message = err.to_string();
    assert!(
        message.starts_with(&format!(
            "error getting channel details: send GET request to YouTube API: http://{addr}/youtube/v3/channels"
        )),
        "{message}"
    );
    assert!(!message.contains("SECRETKEY123"), "{message}");
    assert_eq!(message.matches("/youtube/v3/channels").count(), 1, "{message}");
}

fn garbled_playlist(target: &str) -> (u16, String) {
    if target.starts_with("/youtube/v3/channels") {
        (200, channel_body("UUabc"))
    } else {
        (200, r#"{"items": [{"snippet": 42}]}"#.to_string())
    }
}

#[tokio::test]
async fn decode_error_does_not_reveal_key() {
    let api = FakeApi::start(garbled_playlist).await;
    let pager = PlaylistPager::with_config("SECRETKEY123", &api.config()).unwrap();

    let err = pager.fetch_videos("UCabc", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    let message = err.to_string();
    assert!(
        message.starts_with(
            "error fetching playlist items: parse YouTube playlistItems API response as JSON"
        ),
        "{message}"
    );
    assert!(!message.contains("SECRETKEY123"), "{message}");
    // the key did reach the API
    assert!(api.requests()[1].ends_with("&key=SECRETKEY123"));
}

#[test]
fn bad_credentials_fail_initialization() {
    let err = PlaylistPager::new("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Initialization);
    assert_eq!(
        err.to_string(),
        "error creating YouTube client: API key must not be empty"
    );
}
