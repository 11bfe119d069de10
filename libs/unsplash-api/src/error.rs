/// Error types for the photo API client
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bearer token missing or rejected")]
    Unauthorized,

    #[error("unexpected status {status} from {endpoint}")]
    Status {
        status: StatusCode,
        endpoint: String,
    },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;
