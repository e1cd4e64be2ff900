use std::time::Duration;
use url::Url;
use youtube_api::{ClientConfig, DEFAULT_API_BASE, DEFAULT_TIMEDTEXT_URL};

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const API_BASE_VAR: &str = "YOUTUBE_API_BASE_URL";
pub const TIMEDTEXT_URL_VAR: &str = "YOUTUBE_TIMEDTEXT_URL";
pub const LANGUAGE_VAR: &str = "YOUTUBE_TRANSCRIPT_LANG";
pub const COMMENT_LIMIT_VAR: &str = "YOUTUBE_COMMENT_LIMIT";
pub const TIMEOUT_VAR: &str = "YOUTUBE_HTTP_TIMEOUT_SECS";

pub const DEFAULT_COMMENT_LIMIT: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("YouTube API key not found: set YOUTUBE_API_KEY in the environment or .env")]
    MissingApiKey,

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for one run, read once at start-up and handed to the fetcher
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub comment_limit: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;

        let mut client = ClientConfig::new(api_key);
        client.api_base = http_url(API_BASE_VAR, get(API_BASE_VAR), DEFAULT_API_BASE)?;
        client.timedtext_url =
            http_url(TIMEDTEXT_URL_VAR, get(TIMEDTEXT_URL_VAR), DEFAULT_TIMEDTEXT_URL)?;
        if let Some(language) = get(LANGUAGE_VAR) {
            client.language = language;
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = parse_in_range(TIMEOUT_VAR, &raw, 1, 3600)?;
            client.timeout = Duration::from_secs(secs);
        } else {
            client.timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        }

        let comment_limit = match get(COMMENT_LIMIT_VAR) {
            Some(raw) => parse_in_range(COMMENT_LIMIT_VAR, &raw, 1, 100)? as u32,
            None => DEFAULT_COMMENT_LIMIT,
        };

        Ok(Self {
            client,
            comment_limit,
        })
    }
}

fn http_url(key: &'static str, value: Option<String>, default: &str) -> Result<String, ConfigError> {
    let Some(value) = value else {
        return Ok(default.to_string());
    };
    let invalid = |reason: String| ConfigError::InvalidValue {
        key,
        value: value.clone(),
        reason,
    };
    let url = Url::parse(&value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(value.trim_end_matches('/').to_string())
}

fn parse_in_range(key: &'static str, raw: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: format!("expected a whole number between {min} and {max}"),
        }),
    }
}
