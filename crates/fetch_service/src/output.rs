use crate::FetchError;
use domain::{OutputDocument, VideoRecord};
use std::path::Path;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub categories: usize,
    pub videos: usize,
    pub missing_metadata: usize,
    pub missing_transcripts: usize,
    pub missing_comments: usize,
}

impl RunSummary {
    pub fn from_document(document: &OutputDocument) -> Self {
        let mut summary = RunSummary {
            categories: document.len(),
            ..Default::default()
        };
        for record in document.values().flatten() {
            summary.add(record);
        }
        summary
    }

    fn add(&mut self, record: &VideoRecord) {
        self.videos += 1;
        if !record.metadata.is_found() {
            self.missing_metadata += 1;
        }
        if !record.transcript.is_found() {
            self.missing_transcripts += 1;
        }
        if !record.top_comments.is_found() {
            self.missing_comments += 1;
        }
    }
}

/// Pretty UTF-8 JSON, replacing whatever was at `path`
pub async fn write_document(path: &Path, document: &OutputDocument) -> Result<(), FetchError> {
    let mut json = serde_json::to_vec_pretty(document)?;
    json.push(b'\n');
    tokio::fs::write(path, json)
        .await
        .map_err(|source| FetchError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Availability, CatalogEntry, UnavailableReason};

    #[test]
    fn test_summary_counts() {
        let partial = VideoRecord::from_parts(
            &CatalogEntry::new("a"),
            Availability::unavailable(UnavailableReason::VideoNotFound),
            Availability::Found(Vec::new()),
            Availability::unavailable(UnavailableReason::CommentsDisabled),
        );
        let missing = VideoRecord::placeholder(&CatalogEntry::new("b"), UnavailableReason::VideoNotFound);

        let mut document = OutputDocument::new();
        document.insert("One".to_string(), vec![partial, missing]);
        document.insert("Empty".to_string(), Vec::new());

        let summary = RunSummary::from_document(&document);
        assert_eq!(
            summary,
            RunSummary {
                categories: 2,
                videos: 2,
                missing_metadata: 2,
                missing_transcripts: 1,
                missing_comments: 2,
            }
        );
    }
}
