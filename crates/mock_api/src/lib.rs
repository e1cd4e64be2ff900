//! In-process stand-in for the YouTube endpoints the fetcher calls:
//! `videos.list`, `commentThreads.list` and the public timedtext captions.

mod store;

pub use store::{
    InMemoryStore, MockCaptions, MockComment, MockComments, MockCue, MockVideo, Store,
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;

const INVALID_KEY_MESSAGE: &str = "API key not valid. Please pass a valid API key.";
const QUOTA_MESSAGE: &str = "The request cannot be completed because you have exceeded your quota.";

/// One request seen by the mock, for asserting call patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: &'static str,
    pub video_id: String,
}

#[derive(Clone)]
struct MockState {
    store: Arc<dyn Store>,
    api_key: Option<String>,
    quota_exhausted: Arc<AtomicBool>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl MockState {
    fn record(&self, endpoint: &'static str, video_id: &str) {
        self.requests
            .write()
            .expect("Failed to acquire write lock on requests")
            .push(RecordedRequest {
                endpoint,
                video_id: video_id.to_string(),
            });
    }

    /// Data API gatekeeping shared by every keyed endpoint
    fn reject(&self, key: &str) -> Option<Response> {
        if let Some(expected) = &self.api_key {
            if key != expected {
                return Some(api_error(StatusCode::BAD_REQUEST, "badRequest", INVALID_KEY_MESSAGE));
            }
        }
        if self.quota_exhausted.load(Ordering::SeqCst) {
            return Some(api_error(StatusCode::FORBIDDEN, "quotaExceeded", QUOTA_MESSAGE));
        }
        None
    }
}

fn api_error(status: StatusCode, reason: &str, message: &str) -> Response {
    let body = json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
            "errors": [{
                "message": message,
                "domain": "youtube.api",
                "reason": reason,
            }]
        }
    });
    (status, Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct VideosListParams {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideosListResponse {
    pub kind: String,
    pub etag: String,
    pub page_info: PageInfo,
    pub items: Vec<Video>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: i32,
    pub results_per_page: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub kind: String,
    pub etag: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<VideoSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub thumbnails: serde_json::Value,
}

/// Counts are strings on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<String>,
}

impl Video {
    fn from_mock(video: MockVideo, include_snippet: bool, include_statistics: bool) -> Self {
        let thumbnails = json!({
            "default": {"url": format!("https://i.ytimg.com/vi/{}/default.jpg", video.id), "width": 120, "height": 90},
            "medium": {"url": format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", video.id), "width": 320, "height": 180},
            "high": {"url": format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video.id), "width": 480, "height": 360},
        });
        Self {
            kind: "youtube#video".to_string(),
            etag: format!("etag-{}", video.id),
            id: video.id.clone(),
            statistics: include_statistics.then(|| VideoStatistics {
                view_count: video.view_count.map(|n| n.to_string()),
                like_count: video.like_count.map(|n| n.to_string()),
                comment_count: video.comment_count.map(|n| n.to_string()),
            }),
            snippet: include_snippet.then(|| VideoSnippet {
                published_at: video.published_at,
                channel_id: video.channel_id,
                title: video.title,
                description: video.description,
                channel_title: video.channel_title,
                thumbnails,
            }),
        }
    }
}

async fn videos_list(
    State(state): State<MockState>,
    Query(params): Query<VideosListParams>,
) -> Response {
    if let Some(rejection) = state.reject(&params.key) {
        return rejection;
    }

    let parts: Vec<&str> = params.part.split(',').map(|s| s.trim()).collect();
    let include_snippet = parts.contains(&"snippet");
    let include_statistics = parts.contains(&"statistics");

    let mut items = Vec::new();
    for id in params.id.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        state.record("videos", id);
        if let Some(video) = state.store.get_video(id) {
            items.push(Video::from_mock(video, include_snippet, include_statistics));
        }
    }

    let response = VideosListResponse {
        kind: "youtube#videoListResponse".to_string(),
        etag: "etag-list".to_string(),
        page_info: PageInfo {
            total_results: items.len() as i32,
            results_per_page: items.len() as i32,
        },
        items,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadsParams {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub key: String,
}

async fn comment_threads_list(
    State(state): State<MockState>,
    Query(params): Query<CommentThreadsParams>,
) -> Response {
    if let Some(rejection) = state.reject(&params.key) {
        return rejection;
    }
    state.record("commentThreads", &params.video_id);

    if state.store.get_video(&params.video_id).is_none() {
        return api_error(
            StatusCode::NOT_FOUND,
            "videoNotFound",
            "The video identified by the videoId parameter could not be found.",
        );
    }

    let mut comments = match state.store.get_comments(&params.video_id) {
        Some(MockComments::Disabled) => {
            return api_error(
                StatusCode::FORBIDDEN,
                "commentsDisabled",
                "The video identified by the videoId parameter has disabled comments.",
            );
        }
        Some(MockComments::Enabled(comments)) => comments,
        None => Vec::new(),
    };

    if params.order.as_deref() == Some("relevance") {
        comments.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    }
    let limit = params.max_results.unwrap_or(20).min(100);

    let items: Vec<serde_json::Value> = comments
        .into_iter()
        .take(limit)
        .map(|comment| {
            json!({
                "kind": "youtube#commentThread",
                "etag": format!("etag-{}", comment.id),
                "id": comment.id,
                "snippet": {
                    "channelId": "channel-mock",
                    "videoId": params.video_id,
                    "topLevelComment": {
                        "kind": "youtube#comment",
                        "etag": format!("etag-top-{}", comment.id),
                        "id": comment.id,
                        "snippet": {
                            "videoId": params.video_id,
                            "textDisplay": comment.text,
                            "textOriginal": comment.text,
                            "authorDisplayName": comment.author,
                            "likeCount": comment.like_count,
                            "publishedAt": comment.published_at,
                            "updatedAt": comment.published_at,
                        }
                    },
                    "canReply": true,
                    "totalReplyCount": 0,
                    "isPublic": true,
                }
            })
        })
        .collect();

    let body = json!({
        "kind": "youtube#commentThreadListResponse",
        "etag": "etag-threads",
        "pageInfo": {"totalResults": items.len(), "resultsPerPage": items.len()},
        "items": items,
    });
    (StatusCode::OK, Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct TimedTextParams {
    #[serde(default)]
    pub v: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Mirrors the real endpoint: a track that does not match the requested
/// language/kind is an empty 200, not an error.
async fn timedtext(
    State(state): State<MockState>,
    Query(params): Query<TimedTextParams>,
) -> Response {
    state.record("timedtext", &params.v);

    match state.store.get_captions(&params.v) {
        Some(MockCaptions::Disabled) => StatusCode::FORBIDDEN.into_response(),
        Some(MockCaptions::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Some(MockCaptions::Track {
            language,
            asr,
            cues,
        }) if language == params.lang && asr == (params.kind.as_deref() == Some("asr")) => {
            let events: Vec<serde_json::Value> = cues
                .into_iter()
                .map(|(start, duration, text)| {
                    json!({"tStartMs": start, "dDurationMs": duration, "segs": [{"utf8": text}]})
                })
                .collect();
            let body = json!({"wireMagic": "pb3", "events": events});
            (StatusCode::OK, Json(body)).into_response()
        }
        _ => (StatusCode::OK, "").into_response(),
    }
}

fn create_router(state: MockState) -> Router {
    Router::new()
        .route("/youtube/v3/videos", get(videos_list))
        .route("/youtube/v3/commentThreads", get(comment_threads_list))
        .route("/api/timedtext", get(timedtext))
        .with_state(state)
}

/// A running mock bound to an ephemeral local port. The server task is
/// aborted on drop.
pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Start serving `store`. With `api_key` set, requests carrying any other
    /// key are rejected the way the real API rejects a bad key.
    pub async fn start(store: Arc<dyn Store>, api_key: Option<&str>) -> std::io::Result<Self> {
        let state = MockState {
            store,
            api_key: api_key.map(str::to_string),
            quota_exhausted: Arc::new(AtomicBool::new(false)),
            requests: Arc::new(RwLock::new(Vec::new())),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = create_router(state.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("mock YouTube API stopped: {e}");
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_base(&self) -> String {
        format!("{}/youtube/v3", self.base_url())
    }

    pub fn timedtext_url(&self) -> String {
        format!("{}/api/timedtext", self.base_url())
    }

    /// Make every keyed endpoint answer 403 `quotaExceeded`
    pub fn set_quota_exhausted(&self, exhausted: bool) {
        self.state.quota_exhausted.store(exhausted, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .read()
            .expect("Failed to acquire read lock on requests")
            .clone()
    }

    /// Endpoints hit for one video, in order
    pub fn endpoints_for(&self, video_id: &str) -> Vec<&'static str> {
        self.requests()
            .into_iter()
            .filter(|request| request.video_id == video_id)
            .map(|request| request.endpoint)
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn server_with_video(api_key: Option<&str>) -> MockServer {
        let store = Arc::new(InMemoryStore::new());
        store.add_video(MockVideo::new("test-video-1", "Mock Video"));
        MockServer::start(store, api_key).await.unwrap()
    }

    #[tokio::test]
    async fn test_videos_list_serves_known_ids_only() {
        let server = server_with_video(None).await;
        let body: serde_json::Value = reqwest::get(format!(
            "{}/videos?part=snippet,statistics&id=test-video-1,missing&key=k",
            server.api_base()
        ))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["snippet"]["title"], "Mock Video");
        assert_eq!(items[0]["statistics"]["viewCount"], "1000");
        assert_eq!(server.endpoints_for("missing"), vec!["videos"]);
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let server = server_with_video(Some("right")).await;
        let response = reqwest::get(format!(
            "{}/videos?part=snippet&id=test-video-1&key=wrong",
            server.api_base()
        ))
        .await
        .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_quota_switch() {
        let server = server_with_video(None).await;
        server.set_quota_exhausted(true);
        let body: serde_json::Value = reqwest::get(format!(
            "{}/commentThreads?part=snippet&videoId=test-video-1&key=k",
            server.api_base()
        ))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
        assert_eq!(body["error"]["errors"][0]["reason"], "quotaExceeded");
    }
}
