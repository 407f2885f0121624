//! Error types for mirror-repo.

use thiserror::Error;

/// All errors that can arise from local git operations.
///
/// A git command that runs and exits non-zero is not an error here — that
/// outcome is logged and tolerated (removing an absent remote, for
/// instance, is expected to fail). Only failing to run git at all is fatal.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` process could not be spawned or its output collected.
    #[error("failed to run `git {args}`: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },
}
