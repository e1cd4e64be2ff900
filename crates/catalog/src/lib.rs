mod builtin;
mod file;
mod video_id;

pub use builtin::BuiltinCatalog;
pub use file::FileCatalog;
pub use video_id::extract_video_id;

use domain::CategoryMap;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index} of category '{category}' has neither a video id nor a URL")]
    MissingVideoId { category: String, index: usize },
}

/// Where the category → video mapping comes from
///
/// Implementations only read; the mapping is never written back.
pub trait CatalogSource {
    fn load(&self) -> Result<CategoryMap, CatalogError>;
}

/// The id in `input`, or `input` itself when no id can be read from it. An
/// unreadable entry then comes back from the API as an unknown video instead
/// of failing the whole catalog.
pub(crate) fn id_or_raw_input(category: &str, input: &str) -> String {
    extract_video_id(input).unwrap_or_else(|| {
        warn!(category, input, "No video id in catalog entry, passing it through unchanged");
        input.trim().to_string()
    })
}
