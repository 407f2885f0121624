//! Pipeline steps and the terminal outcome of a run.

use std::fmt;

use serde::Serialize;

/// One step of the reconciliation chain, in execution order.
///
/// Every step is a precondition for the next; errors carry the step they
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    /// Ensure the mirror project exists, creating it when absent.
    EnsureProject,
    /// Attach the configured CI runner to the project.
    EnableRunner,
    /// Register the build-events webhook on the project.
    AttachHook,
    /// Ensure the local working copy exists on disk.
    EnsureClone,
    /// Re-register the mirror remote with current credentials.
    EnsureRemote,
    /// Push the resolved ref (branch or pull-request head).
    PushRef,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncStep::EnsureProject => "project-ensure",
            SyncStep::EnableRunner => "runner-enable",
            SyncStep::AttachHook => "hook-attach",
            SyncStep::EnsureClone => "clone-ensure",
            SyncStep::EnsureRemote => "remote-ensure",
            SyncStep::PushRef => "ref-push",
        };
        f.write_str(label)
    }
}

/// The ref that ended up on the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PushedRef {
    /// `refs/heads/<branch>` on the mirror.
    Branch(String),
    /// `refs/heads/gh-pr-<id>` on the mirror.
    PullRequest(u64),
}

impl fmt::Display for PushedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushedRef::Branch(branch) => write!(f, "refs/heads/{branch}"),
            PushedRef::PullRequest(number) => write!(f, "refs/heads/gh-pr-{number}"),
        }
    }
}

/// Terminal outcome of one successful orchestration run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub repository: String,
    /// Numeric id of the mirror project (looked up or freshly assigned).
    pub project_id: u64,
    /// Whether this run created the mirror project.
    pub created_project: bool,
    pub pushed: PushedRef,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
