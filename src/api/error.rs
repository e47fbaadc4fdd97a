//! Errors raised while talking to the query service

use thiserror::Error;

/// Failure of a single backend call.
///
/// A server-reported query error is not an `ApiError`: it decodes fine and is
/// carried as [`QueryOutcome::Failure`](crate::api::QueryOutcome::Failure).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid server url '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build a status error, keeping only the start of long bodies
    pub fn status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let body: String = text.chars().take(200).collect();
        ApiError::Status { status, body }
    }
}
