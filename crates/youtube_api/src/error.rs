use crate::wire::ErrorResponse;

const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

const KEY_REASONS: &[&str] = &["keyInvalid", "keyExpired", "API_KEY_INVALID"];

/// Failures that end a run. Content that is merely absent is reported
/// through `domain::Availability` instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure. The request URL is stripped because it carries the key.
    #[error("HTTP request error: {0}")]
    Http(reqwest::Error),

    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("YouTube API rejected the API key: {0}")]
    InvalidApiKey(String),

    #[error("YouTube API error {status} ({reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response for video {video_id} has no {field}")]
    MissingField {
        endpoint: &'static str,
        video_id: String,
        field: &'static str,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Http(error.without_url())
    }
}

impl ApiError {
    /// Classify a non-success response from the Data API
    pub fn from_response(status: u16, body: &str) -> Self {
        let Ok(ErrorResponse { error }) = serde_json::from_str::<ErrorResponse>(body) else {
            let message: String = body.trim().chars().take(200).collect();
            return ApiError::Api {
                status,
                reason: "unknown".to_string(),
                message,
            };
        };

        let reason = error.reason().to_string();
        if QUOTA_REASONS.contains(&reason.as_str()) {
            ApiError::QuotaExceeded(error.message)
        } else if KEY_REASONS.contains(&reason.as_str())
            || (status == 400 && error.message.contains("API key"))
        {
            ApiError::InvalidApiKey(error.message)
        } else {
            ApiError::Api {
                status,
                reason,
                message: error.message,
            }
        }
    }

    /// The Data API `reason` code, when the error carried one
    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiError::Api { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: u16, reason: &str, message: &str) -> String {
        serde_json::json!({
            "error": {
                "code": code,
                "message": message,
                "errors": [{"message": message, "domain": "youtube.quota", "reason": reason}]
            }
        })
        .to_string()
    }

    #[test]
    fn test_quota_reasons() {
        let err = ApiError::from_response(403, &body(403, "quotaExceeded", "out of quota"));
        assert!(matches!(err, ApiError::QuotaExceeded(ref m) if m == "out of quota"));
    }

    #[test]
    fn test_bad_key() {
        let err = ApiError::from_response(
            400,
            &body(400, "badRequest", "API key not valid. Please pass a valid API key."),
        );
        assert!(matches!(err, ApiError::InvalidApiKey(_)));
    }

    #[test]
    fn test_content_reason_is_kept() {
        let err = ApiError::from_response(403, &body(403, "commentsDisabled", "disabled"));
        assert_eq!(err.reason(), Some("commentsDisabled"));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_non_json_body() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        match err {
            ApiError::Api { status, reason, message } => {
                assert_eq!(status, 502);
                assert_eq!(reason, "unknown");
                assert_eq!(message, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
