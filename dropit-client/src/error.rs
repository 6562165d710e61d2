use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Figma client is not initialized, call initialize(token) first")]
    Uninitialized,

    #[error("Figma client is already initialized with a different token")]
    AlreadyInitialized,

    #[error("A valid Figma personal access token is required")]
    InvalidCredential,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Figma API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Transport-level failures, as opposed to the API answering with an error.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::HttpError(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
