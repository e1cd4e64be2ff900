//! JSON shapes returned by the YouTube Data API v3 and the timedtext endpoint.

use domain::{Comment, TranscriptSegment, VideoMetadata};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Thumbnail sizes from largest to smallest
const THUMBNAIL_PREFERENCE: &[&str] = &["maxres", "standard", "high", "medium", "default"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideosListResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: i32,
    pub results_per_page: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: String,
    #[serde(default)]
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: BTreeMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Counts arrive as decimal strings; a hidden count is simply missing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
    #[serde(default)]
    pub comment_count: Option<String>,
}

impl VideoSnippet {
    pub fn into_metadata(self, statistics: Option<VideoStatistics>) -> VideoMetadata {
        let thumbnail_url = THUMBNAIL_PREFERENCE
            .iter()
            .find_map(|size| self.thumbnails.get(*size))
            .map(|thumbnail| thumbnail.url.clone());
        let thumbnails = self
            .thumbnails
            .into_iter()
            .map(|(size, thumbnail)| (size, thumbnail.url))
            .collect();
        let statistics = statistics.unwrap_or_default();

        VideoMetadata {
            title: self.title,
            description: self.description,
            published_at: self.published_at,
            channel_title: self.channel_title,
            thumbnail_url,
            thumbnails,
            view_count: parse_count(statistics.view_count.as_deref()),
            like_count: parse_count(statistics.like_count.as_deref()),
            comment_count: parse_count(statistics.comment_count.as_deref()),
        }
    }
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    #[serde(default)]
    pub video_id: String,
    pub top_level_comment: CommentResource,
    #[serde(default)]
    pub total_reply_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResource {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: String,
    pub text_display: String,
    #[serde(default)]
    pub text_original: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    pub published_at: String,
}

impl From<CommentThread> for Comment {
    fn from(thread: CommentThread) -> Self {
        let snippet = thread.snippet.top_level_comment.snippet;
        Comment {
            author: snippet.author_display_name,
            text: snippet.text_display,
            like_count: snippet.like_count,
            published_at: snippet.published_at,
        }
    }
}

/// `{"error": {...}}` body of a failed Data API call
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub reason: String,
}

impl ErrorBody {
    pub fn reason(&self) -> &str {
        self.errors
            .iter()
            .map(|detail| detail.reason.as_str())
            .find(|reason| !reason.is_empty())
            .unwrap_or("unknown")
    }
}

/// `fmt=json3` caption document
#[derive(Debug, Deserialize)]
pub struct TimedText {
    #[serde(default)]
    pub events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTextEvent {
    #[serde(default)]
    pub t_start_ms: Option<u64>,
    #[serde(default)]
    pub d_duration_ms: Option<u64>,
    #[serde(default)]
    pub segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
pub struct TimedTextSeg {
    #[serde(default)]
    pub utf8: String,
}

impl TimedText {
    /// Non-blank cues in document order. Line breaks inside a cue become
    /// spaces; window-append events that only carry a newline are dropped.
    pub fn into_segments(self) -> Vec<TranscriptSegment> {
        self.events
            .into_iter()
            .filter_map(|event| {
                let raw: String = event.segs?.iter().map(|seg| seg.utf8.as_str()).collect();
                let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
                if text.is_empty() {
                    return None;
                }
                Some(TranscriptSegment {
                    text,
                    start_ms: event.t_start_ms.unwrap_or(0),
                    duration_ms: event.d_duration_ms.unwrap_or(0),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_into_metadata() {
        let response: VideosListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#videoListResponse",
                "etag": "x",
                "items": [{
                    "kind": "youtube#video",
                    "id": "duAeRtYeC0E",
                    "snippet": {
                        "publishedAt": "2024-12-17T04:12:00Z",
                        "channelId": "UC1",
                        "title": "Powerball 12-16-24",
                        "description": "Winning numbers",
                        "channelTitle": "WITN-TV",
                        "thumbnails": {
                            "default": {"url": "https://i.ytimg.com/d.jpg", "width": 120, "height": 90},
                            "medium": {"url": "https://i.ytimg.com/m.jpg"},
                            "high": {"url": "https://i.ytimg.com/h.jpg"}
                        }
                    },
                    "statistics": {"viewCount": "1520", "commentCount": "4"}
                }],
                "pageInfo": {"totalResults": 1, "resultsPerPage": 1}
            }"#,
        )
        .unwrap();

        let video = response.items.into_iter().next().unwrap();
        let metadata = video.snippet.unwrap().into_metadata(video.statistics);
        assert_eq!(metadata.title, "Powerball 12-16-24");
        assert_eq!(metadata.thumbnail_url.as_deref(), Some("https://i.ytimg.com/h.jpg"));
        assert_eq!(metadata.thumbnails.len(), 3);
        assert_eq!(metadata.view_count, Some(1520));
        assert_eq!(metadata.like_count, None);
        assert_eq!(metadata.comment_count, Some(4));
    }

    #[test]
    fn test_error_reason() {
        let response: ErrorResponse = serde_json::from_str(
            r#"{"error": {"code": 403, "message": "The video has disabled comments.",
                "errors": [{"message": "disabled", "domain": "youtube.commentThread",
                            "reason": "commentsDisabled", "location": "videoId"}]}}"#,
        )
        .unwrap();
        assert_eq!(response.error.code, 403);
        assert_eq!(response.error.reason(), "commentsDisabled");

        let bare: ErrorResponse =
            serde_json::from_str(r#"{"error": {"code": 500, "message": "Backend Error"}}"#).unwrap();
        assert_eq!(bare.error.reason(), "unknown");
    }

    #[test]
    fn test_timedtext_segments() {
        let doc: TimedText = serde_json::from_str(
            r#"{
                "wireMagic": "pb3",
                "events": [
                    {"tStartMs": 0, "dDurationMs": 2000, "id": 1, "wpWinPosId": 1},
                    {"tStartMs": 120, "dDurationMs": 3000, "segs": [{"utf8": "tonight's"}, {"utf8": " numbers"}]},
                    {"tStartMs": 3100, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                    {"tStartMs": 3120, "dDurationMs": 1800, "segs": [{"utf8": "are\nin"}]}
                ]
            }"#,
        )
        .unwrap();

        let segments = doc.into_segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "tonight's numbers");
        assert_eq!(segments[0].start_ms, 120);
        assert_eq!(segments[1].text, "are in");
        assert_eq!(segments[1].duration_ms, 1800);
    }
}
