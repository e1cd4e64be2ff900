use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name → ordered catalog entries
pub type CategoryMap = BTreeMap<String, Vec<CatalogEntry>>;

/// Category name → fetched records, in catalog order
pub type OutputDocument = BTreeMap<String, Vec<VideoRecord>>;

/// One operator-supplied video in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub video_id: String,
    /// Title given by the operator, not the one reported by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CatalogEntry {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            label: None,
            source: None,
            url: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Why a piece of a record could not be retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Unknown, private or deleted video
    VideoNotFound,
    TranscriptsDisabled,
    NoTranscriptFound,
    CommentsDisabled,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UnavailableReason::VideoNotFound => "video not found or private",
            UnavailableReason::TranscriptsDisabled => "transcripts are disabled",
            UnavailableReason::NoTranscriptFound => "no transcript found",
            UnavailableReason::CommentsDisabled => "comments are disabled",
        };
        f.write_str(text)
    }
}

/// Result of a content lookup that may legitimately be absent.
///
/// Serializes as the bare value when found and as
/// `{"unavailable": "<reason>"}` otherwise, so a missing feature is never
/// confused with a null field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Availability<T> {
    Found(T),
    Unavailable {
        #[serde(rename = "unavailable")]
        reason: UnavailableReason,
    },
}

impl<T> Availability<T> {
    pub fn unavailable(reason: UnavailableReason) -> Self {
        Availability::Unavailable { reason }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Availability::Found(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Availability::Found(value) => Some(value),
            Availability::Unavailable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<UnavailableReason> {
        match self {
            Availability::Found(_) => None,
            Availability::Unavailable { reason } => Some(*reason),
        }
    }
}

/// Video details and statistics as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub published_at: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Size name (`default`, `medium`, `high`, ...) → URL
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub thumbnails: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
}

/// One caption cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_ms: u64,
    pub duration_ms: u64,
}

/// A top-level comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: String,
}

/// Everything fetched for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub metadata: Availability<VideoMetadata>,
    pub transcript: Availability<Vec<TranscriptSegment>>,
    pub top_comments: Availability<Vec<Comment>>,
}

impl VideoRecord {
    /// Record for a video whose details could not be retrieved at all
    pub fn placeholder(entry: &CatalogEntry, reason: UnavailableReason) -> Self {
        Self::from_parts(
            entry,
            Availability::unavailable(reason),
            Availability::unavailable(reason),
            Availability::unavailable(reason),
        )
    }

    pub fn from_parts(
        entry: &CatalogEntry,
        metadata: Availability<VideoMetadata>,
        transcript: Availability<Vec<TranscriptSegment>>,
        top_comments: Availability<Vec<Comment>>,
    ) -> Self {
        Self {
            video_id: entry.video_id.clone(),
            label: entry.label.clone(),
            source: entry.source.clone(),
            url: entry.url.clone(),
            metadata,
            transcript,
            top_comments,
        }
    }

    /// Transcript cues joined with single spaces
    pub fn transcript_text(&self) -> Option<String> {
        self.transcript.found().map(|segments| {
            segments
                .iter()
                .map(|segment| segment.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}
