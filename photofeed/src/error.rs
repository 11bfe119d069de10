/// Error types for the application services
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(#[from] unsplash_api::ApiError),

    #[error("no access token in the session")]
    MissingToken,

    #[error("avatar URL is not a valid URL: {0}")]
    InvalidAvatarUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
