//! Pull-request author authorization.
//!
//! Pull requests from arbitrary forks can run CI on the mirror, so only
//! configured trusted contributors may trigger a pull-request sync.
//! Branch pushes need no check (only collaborators can push).

use crate::types::Actor;

/// True when `actor` appears in the allowlist.
///
/// An empty allowlist authorizes nobody.
pub fn is_authorized(actor: &Actor, allowlist: &[Actor]) -> bool {
    allowlist.contains(actor)
}

/// Parse a comma-separated allowlist value.
///
/// Entries are trimmed and empty entries discarded, so `"a, b,,"` yields
/// exactly `a` and `b`.
pub fn parse_allowlist(raw: &str) -> Vec<Actor> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Actor::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
