mod config;
mod fetcher;
mod output;

pub use config::{
    API_BASE_VAR, API_KEY_VAR, COMMENT_LIMIT_VAR, Config, ConfigError, DEFAULT_COMMENT_LIMIT,
    LANGUAGE_VAR, TIMEDTEXT_URL_VAR, TIMEOUT_VAR,
};
pub use fetcher::Fetcher;
pub use output::{RunSummary, write_document};

use std::path::PathBuf;
use youtube_api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
