use reqwest::StatusCode;
use thiserror::Error;

/// Table API client error types
#[derive(Error, Debug)]
pub enum SnowError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode JSON response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: check the username and password (SN_USERNAME / SN_PASSWORD)")]
    Unauthorized,

    #[error("request failed unexpectedly: code {status}, url {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Result type for Table API operations
pub type SnowResult<T> = Result<T, SnowError>;

impl SnowError {
    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create an unexpected status error for the given URL
    pub fn unexpected_status(status: StatusCode, url: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// True if the server rejected the credentials (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// True if the request hit the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}
