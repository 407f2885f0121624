//! Error types for mirror-gitlab.

use thiserror::Error;

/// All errors that can arise from GitLab API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure (DNS, refused connection, TLS).
    #[error("transport error calling GitLab: {0}")]
    Transport(#[from] Box<ureq::Transport>),

    /// A 4xx/5xx response whose message is not on the benign allowlist.
    /// Carries the full response body for diagnosis.
    #[error("GitLab API error (status {status}): {body}")]
    Remote {
        status: u16,
        body: serde_json::Value,
    },

    /// The response body could not be read off the wire.
    #[error("failed to read GitLab response body: {0}")]
    Body(#[from] std::io::Error),

    /// A successful response did not have the expected shape.
    #[error("unexpected GitLab response shape: {0}")]
    Decode(#[from] serde_json::Error),
}
