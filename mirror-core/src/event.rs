//! Webhook event model.
//!
//! The GitHub payload's shape varies by event type; it is resolved exactly
//! once, at entry, into a tagged union. Downstream code never probes
//! optional payload fields.

use serde::Deserialize;

use crate::error::EventError;
use crate::types::{Actor, RepoName};

/// One webhook event, reduced to the fields the sync run needs.
///
/// Invariant: exactly one of a branch ref or a pull-request number is the
/// sync target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A push to a branch on the source repository.
    BranchPush {
        repository: RepoName,
        /// Branch name with any `refs/heads/` prefix stripped.
        branch: String,
    },
    /// A pull request was opened or synchronized.
    PullRequest {
        repository: RepoName,
        number: u64,
        author: Actor,
    },
}

impl SyncEvent {
    /// Resolve a raw webhook payload into an event.
    ///
    /// A payload carrying a `number` is a pull-request event and must also
    /// carry `sender.login`; otherwise `ref` is required.
    pub fn from_payload(payload: &str) -> Result<Self, EventError> {
        let raw: RawPayload = serde_json::from_str(payload)?;
        let repository = RepoName(raw.repository.name);

        if let Some(number) = raw.number {
            let author = raw
                .sender
                .and_then(|s| s.login)
                .map(Actor)
                .ok_or(EventError::MissingSender)?;
            return Ok(SyncEvent::PullRequest {
                repository,
                number,
                author,
            });
        }

        match raw.r#ref {
            Some(r) if !r.is_empty() => Ok(SyncEvent::BranchPush {
                branch: branch_from_ref(&r),
                repository,
            }),
            _ => Err(EventError::MissingTarget),
        }
    }

    /// Repository the event targets.
    pub fn repository(&self) -> &RepoName {
        match self {
            SyncEvent::BranchPush { repository, .. } => repository,
            SyncEvent::PullRequest { repository, .. } => repository,
        }
    }

    /// The actor to authorize, when the event type requires authorization.
    pub fn actor(&self) -> Option<&Actor> {
        match self {
            SyncEvent::BranchPush { .. } => None,
            SyncEvent::PullRequest { author, .. } => Some(author),
        }
    }
}

/// Branch name for a push ref: `refs/heads/main` → `main`; anything without
/// the prefix passes through verbatim (nested branch names keep their
/// slashes).
fn branch_from_ref(r: &str) -> String {
    r.strip_prefix("refs/heads/").unwrap_or(r).to_owned()
}

// ---------------------------------------------------------------------------
// Raw payload shapes (deserialization only)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawPayload {
    repository: RawRepository,
    #[serde(default)]
    r#ref: Option<String>,
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    sender: Option<RawSender>,
}

#[derive(Deserialize)]
struct RawRepository {
    name: String,
}

#[derive(Deserialize)]
struct RawSender {
    #[serde(default)]
    login: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
