use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call against the Ticketero service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, timeout, broken body and the like
    #[error("request to Ticketero failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    /// Body did not match the expected shape; the source names the JSON path
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport(error) => error.status(),
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            ApiError::Decode { .. } => None,
        }
    }
}
