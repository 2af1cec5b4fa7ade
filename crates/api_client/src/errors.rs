use thiserror::Error;

use crate::body::ApiBody;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request did not complete within the client's timeout.
    #[error("Request timeout")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        status_text: String,
        message: String,
        body: Option<ApiBody>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status this error stands for, if any. Timeouts report 408.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Timeout => Some(408),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(err) => err.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}
