use crate::config::Config;
use crate::output::{self, RunSummary};
use crate::FetchError;
use domain::{Availability, CatalogEntry, CategoryMap, OutputDocument, UnavailableReason, VideoRecord};
use std::path::Path;
use tracing::{debug, info};
use youtube_api::{ApiError, YoutubeClient};

/// Walks a category map and collects one record per video.
///
/// Requests are issued one after another; the first transport or quota
/// failure aborts the whole pass.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: YoutubeClient,
    comment_limit: u32,
}

impl Fetcher {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = YoutubeClient::new(config.client)?;
        Ok(Self::with_client(client, config.comment_limit))
    }

    pub fn with_client(client: YoutubeClient, comment_limit: u32) -> Self {
        Self {
            client,
            comment_limit,
        }
    }

    /// Metadata, transcript and top comments for one entry. A video that
    /// cannot be found is not queried further.
    pub async fn build_record(&self, entry: &CatalogEntry) -> Result<VideoRecord, ApiError> {
        let video_id = entry.video_id.as_str();

        let metadata = self.client.fetch_metadata(video_id).await?;
        if metadata.reason() == Some(UnavailableReason::VideoNotFound) {
            return Ok(VideoRecord::placeholder(entry, UnavailableReason::VideoNotFound));
        }

        let transcript = self.client.fetch_transcript(video_id).await?;
        let top_comments = self
            .client
            .fetch_top_comments(video_id, self.comment_limit)
            .await?;

        debug!(
            video_id,
            transcript = transcript.is_found(),
            comments = top_comments.found().map(Vec::len),
            "Built record"
        );
        Ok(VideoRecord::from_parts(entry, metadata, transcript, top_comments))
    }

    /// Every category in map order, every video in catalog order
    pub async fn fetch_all(&self, categories: &CategoryMap) -> Result<OutputDocument, ApiError> {
        let mut document = OutputDocument::new();
        for (category, entries) in categories {
            info!(category = %category, videos = entries.len(), "Fetching category");
            let mut records = Vec::with_capacity(entries.len());
            for entry in entries {
                let record = self.build_record(entry).await?;
                let title = match &record.metadata {
                    Availability::Found(metadata) => metadata.title.as_str(),
                    Availability::Unavailable { .. } => "<unavailable>",
                };
                info!(video_id = %entry.video_id, title, "Fetched video");
                records.push(record);
            }
            document.insert(category.clone(), records);
        }
        Ok(document)
    }

    /// Fetch everything, then overwrite `output_path` with the document.
    /// Nothing is written unless every request succeeded.
    pub async fn run(
        &self,
        categories: &CategoryMap,
        output_path: &Path,
    ) -> Result<RunSummary, FetchError> {
        let document = self.fetch_all(categories).await?;
        output::write_document(output_path, &document).await?;

        let summary = RunSummary::from_document(&document);
        info!(
            path = %output_path.display(),
            categories = summary.categories,
            videos = summary.videos,
            missing_metadata = summary.missing_metadata,
            missing_transcripts = summary.missing_transcripts,
            missing_comments = summary.missing_comments,
            "Wrote output document"
        );
        Ok(summary)
    }
}
