mod client;
mod error;
pub mod wire;

pub use client::{ClientConfig, DEFAULT_API_BASE, DEFAULT_TIMEDTEXT_URL, YoutubeClient};
pub use error::ApiError;
