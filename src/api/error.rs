use thiserror::Error;

/// Failure of a single request to the media server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Server reported an error: {0}")]
    Server(String),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
