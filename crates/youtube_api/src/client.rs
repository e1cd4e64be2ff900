use crate::error::ApiError;
use crate::wire::{CommentThreadListResponse, TimedText, VideosListResponse};
use domain::{Availability, Comment, TranscriptSegment, UnavailableReason, VideoMetadata};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// The Data API caps `maxResults` for commentThreads at 100
const MAX_COMMENTS_PER_PAGE: u32 = 100;

/// Connection settings for [`YoutubeClient`]
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_base: String,
    pub timedtext_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timedtext_url: DEFAULT_TIMEDTEXT_URL.to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timedtext_url", &self.timedtext_url)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

enum CaptionReply {
    Segments(Vec<TranscriptSegment>),
    Empty,
    Disabled,
}

/// Read-only client for videos, commentThreads and timedtext
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl YoutubeClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("yt-category-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), name)
    }

    async fn get_api<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        debug!(endpoint, ?query, "Calling YouTube Data API");
        let response = self
            .http
            .get(self.endpoint(endpoint))
            .query(query)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }

    /// Title, description, thumbnails and statistics for one video.
    ///
    /// Unknown, private and deleted videos all come back from `videos.list`
    /// as an empty item list and are reported as `VideoNotFound`.
    pub async fn fetch_metadata(
        &self,
        video_id: &str,
    ) -> Result<Availability<VideoMetadata>, ApiError> {
        let response: VideosListResponse = self
            .get_api("videos", &[("part", "snippet,statistics"), ("id", video_id)])
            .await?;

        let Some(video) = response.items.into_iter().find(|item| item.id == video_id) else {
            warn!(video_id, "Video not found or private");
            return Ok(Availability::unavailable(UnavailableReason::VideoNotFound));
        };

        let snippet = video.snippet.ok_or_else(|| ApiError::MissingField {
            endpoint: "videos",
            video_id: video_id.to_string(),
            field: "snippet",
        })?;
        Ok(Availability::Found(snippet.into_metadata(video.statistics)))
    }

    /// Caption cues in the configured language, falling back to the
    /// auto-generated track when no uploaded track exists.
    pub async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Availability<Vec<TranscriptSegment>>, ApiError> {
        let reply = match self.fetch_captions(video_id, None).await? {
            CaptionReply::Empty => self.fetch_captions(video_id, Some("asr")).await?,
            other => other,
        };

        Ok(match reply {
            CaptionReply::Segments(segments) => Availability::Found(segments),
            CaptionReply::Disabled => {
                warn!(video_id, "Transcripts disabled");
                Availability::unavailable(UnavailableReason::TranscriptsDisabled)
            }
            CaptionReply::Empty => {
                warn!(video_id, language = %self.config.language, "No transcript found");
                Availability::unavailable(UnavailableReason::NoTranscriptFound)
            }
        })
    }

    async fn fetch_captions(
        &self,
        video_id: &str,
        kind: Option<&str>,
    ) -> Result<CaptionReply, ApiError> {
        let mut query = vec![
            ("v", video_id),
            ("lang", self.config.language.as_str()),
            ("fmt", "json3"),
        ];
        if let Some(kind) = kind {
            query.push(("kind", kind));
        }
        debug!(video_id, ?kind, "Requesting timedtext captions");

        let response = self
            .http
            .get(&self.config.timedtext_url)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return Ok(CaptionReply::Empty),
            StatusCode::FORBIDDEN | StatusCode::GONE => return Ok(CaptionReply::Disabled),
            _ => {}
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(CaptionReply::Empty);
        }

        let document: TimedText = serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: "timedtext",
            source,
        })?;
        let segments = document.into_segments();
        Ok(if segments.is_empty() {
            CaptionReply::Empty
        } else {
            CaptionReply::Segments(segments)
        })
    }

    /// First page of top-level comments ordered by relevance
    pub async fn fetch_top_comments(
        &self,
        video_id: &str,
        limit: u32,
    ) -> Result<Availability<Vec<Comment>>, ApiError> {
        let max_results = limit.clamp(1, MAX_COMMENTS_PER_PAGE).to_string();
        let result = self
            .get_api::<CommentThreadListResponse>(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", max_results.as_str()),
                    ("order", "relevance"),
                    ("textFormat", "plainText"),
                ],
            )
            .await;

        match result {
            Ok(response) => Ok(Availability::Found(
                response.items.into_iter().map(Comment::from).collect(),
            )),
            Err(err) if err.reason() == Some("commentsDisabled") => {
                warn!(video_id, "Comments disabled");
                Ok(Availability::unavailable(UnavailableReason::CommentsDisabled))
            }
            Err(err) if err.reason() == Some("videoNotFound") => {
                warn!(video_id, "Comment threads report video not found");
                Ok(Availability::unavailable(UnavailableReason::VideoNotFound))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_key() {
        let config = ClientConfig::new("AIza-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("AIza-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = ClientConfig::new("k");
        config.api_base = "http://127.0.0.1:9/youtube/v3/".to_string();
        let client = YoutubeClient::new(config).unwrap();
        assert_eq!(
            client.endpoint("videos"),
            "http://127.0.0.1:9/youtube/v3/videos"
        );
    }
}
