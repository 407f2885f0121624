//! Error types for mirror-core.

use thiserror::Error;

/// All errors that can arise while building the process [`Config`].
///
/// [`Config`]: crate::config::Config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// All errors that can arise while resolving a webhook payload into a
/// [`SyncEvent`].
///
/// [`SyncEvent`]: crate::event::SyncEvent
#[derive(Debug, Error)]
pub enum EventError {
    /// The payload was not valid JSON or lacked the repository block.
    #[error("malformed webhook payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither a branch ref nor a pull-request number was present.
    #[error("payload carries neither a ref nor a pull-request number")]
    MissingTarget,

    /// A pull-request payload had no `sender.login` to authorize against.
    #[error("pull-request payload has no sender identity")]
    MissingSender,
}
