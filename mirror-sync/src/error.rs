//! Error types for mirror-sync.

use thiserror::Error;

use mirror_core::Actor;
use mirror_gitlab::ApiError;
use mirror_repo::GitError;

use crate::step::SyncStep;

/// All errors that can terminate an orchestration run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A pull-request event arrived but no contributor allowlist is
    /// configured. Absence must abort, never silently permit.
    #[error("no contributor allowlist configured; refusing to sync a pull request")]
    AllowlistMissing,

    /// The triggering actor is not on the allowlist.
    #[error("'{actor}' is not a trusted contributor")]
    Unauthorized { actor: Actor },

    /// A remote API call failed at the named step.
    #[error("{step} failed: {source}")]
    Api {
        step: SyncStep,
        #[source]
        source: ApiError,
    },

    /// A git operation failed at the named step.
    #[error("{step} failed: {source}")]
    Git {
        step: SyncStep,
        #[source]
        source: GitError,
    },
}

/// Convenience adapters for step attribution at `map_err` sites.
pub(crate) fn api_err(step: SyncStep) -> impl FnOnce(ApiError) -> SyncError {
    move |source| SyncError::Api { step, source }
}

pub(crate) fn git_err(step: SyncStep) -> impl FnOnce(GitError) -> SyncError {
    move |source| SyncError::Git { step, source }
}
