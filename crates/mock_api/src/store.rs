use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A video the mock knows about. Videos that are absent from the store
/// behave like private or deleted ones.
#[derive(Debug, Clone)]
pub struct MockVideo {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl MockVideo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            channel_id: format!("channel-{id}"),
            description: format!("Description of {id}"),
            id,
            title: title.into(),
            channel_title: "Mock Channel".to_string(),
            published_at: "2024-12-17T04:00:00Z".to_string(),
            view_count: Some(1000),
            like_count: Some(42),
            comment_count: Some(0),
        }
    }

    pub fn with_statistics(
        mut self,
        view_count: Option<u64>,
        like_count: Option<u64>,
        comment_count: Option<u64>,
    ) -> Self {
        self.view_count = view_count;
        self.like_count = like_count;
        self.comment_count = comment_count;
        self
    }
}

#[derive(Debug, Clone)]
pub struct MockComment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: String,
}

impl MockComment {
    pub fn new(author: impl Into<String>, text: impl Into<String>, like_count: u64) -> Self {
        let author = author.into();
        Self {
            id: format!("comment-{author}-{like_count}"),
            author,
            text: text.into(),
            like_count,
            published_at: "2024-12-17T05:00:00Z".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MockComments {
    Enabled(Vec<MockComment>),
    Disabled,
}

/// One caption cue as (start ms, duration ms, text)
pub type MockCue = (u64, u64, String);

#[derive(Debug, Clone)]
pub enum MockCaptions {
    Track {
        language: String,
        /// Auto-generated (`kind=asr`) rather than uploaded
        asr: bool,
        cues: Vec<MockCue>,
    },
    Disabled,
    /// Every request for the video gets this bare status
    Status(u16),
}

impl MockCaptions {
    pub fn uploaded(language: &str, cues: &[(u64, u64, &str)]) -> Self {
        Self::track(language, false, cues)
    }

    pub fn auto_generated(language: &str, cues: &[(u64, u64, &str)]) -> Self {
        Self::track(language, true, cues)
    }

    fn track(language: &str, asr: bool, cues: &[(u64, u64, &str)]) -> Self {
        MockCaptions::Track {
            language: language.to_string(),
            asr,
            cues: cues
                .iter()
                .map(|(start, duration, text)| (*start, *duration, text.to_string()))
                .collect(),
        }
    }
}

/// Storage seam for the mock endpoints
pub trait Store: Send + Sync {
    fn get_video(&self, id: &str) -> Option<MockVideo>;

    /// `None` when the video has no comment state, which is served as an
    /// empty thread list for known videos
    fn get_comments(&self, video_id: &str) -> Option<MockComments>;

    fn get_captions(&self, video_id: &str) -> Option<MockCaptions>;

    fn add_video(&self, video: MockVideo);

    fn set_comments(&self, video_id: &str, comments: MockComments);

    fn set_captions(&self, video_id: &str, captions: MockCaptions);
}

#[derive(Default)]
pub struct InMemoryStore {
    videos: Arc<RwLock<HashMap<String, MockVideo>>>,
    comments: Arc<RwLock<HashMap<String, MockComments>>>,
    captions: Arc<RwLock<HashMap<String, MockCaptions>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    fn get_video(&self, id: &str) -> Option<MockVideo> {
        self.videos
            .read()
            .expect("Failed to acquire read lock on videos")
            .get(id)
            .cloned()
    }

    fn get_comments(&self, video_id: &str) -> Option<MockComments> {
        self.comments
            .read()
            .expect("Failed to acquire read lock on comments")
            .get(video_id)
            .cloned()
    }

    fn get_captions(&self, video_id: &str) -> Option<MockCaptions> {
        self.captions
            .read()
            .expect("Failed to acquire read lock on captions")
            .get(video_id)
            .cloned()
    }

    fn add_video(&self, video: MockVideo) {
        self.videos
            .write()
            .expect("Failed to acquire write lock on videos")
            .insert(video.id.clone(), video);
    }

    fn set_comments(&self, video_id: &str, comments: MockComments) {
        self.comments
            .write()
            .expect("Failed to acquire write lock on comments")
            .insert(video_id.to_string(), comments);
    }

    fn set_captions(&self, video_id: &str, captions: MockCaptions) {
        self.captions
            .write()
            .expect("Failed to acquire write lock on captions")
            .insert(video_id.to_string(), captions);
    }
}
