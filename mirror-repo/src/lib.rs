//! # mirror-repo
//!
//! Local working-copy manager for mirror synchronization.
//!
//! Working copies live on disk across invocations, keyed by
//! `<repo>_<owner>` under a configured root. Each sync run ensures the
//! clone exists, re-registers the mirror remote with current credentials,
//! and force-pushes the resolved ref.
//!
//! git is driven as a subprocess with stderr inherited, so git's own
//! diagnostics reach the operator unfiltered. A non-zero exit is logged as
//! a warning and tolerated; only failing to spawn git is fatal.

pub mod error;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use mirror_core::RepoName;

pub use error::GitError;

/// Name of the remote pointing at the mirror.
///
/// The remote is removed and re-added on every run rather than assumed
/// correct, because the embedded credentials may rotate between runs.
pub const MIRROR_REMOTE: &str = "gitlab";

/// On-disk store of working copies under one root directory.
#[derive(Debug, Clone)]
pub struct LocalRepos {
    root: PathBuf,
}

impl LocalRepos {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Deterministic working directory for a repository/owner pair.
    pub fn working_dir(&self, repo: &RepoName, owner: &str) -> PathBuf {
        self.root.join(format!("{repo}_{owner}"))
    }

    /// Clone the source repository unless its working directory already
    /// exists. A plain path probe — no validity or freshness check of an
    /// existing clone.
    pub fn clone_if_absent(
        &self,
        repo: &RepoName,
        owner: &str,
        clone_url: &str,
    ) -> Result<(), GitError> {
        let dir = self.working_dir(repo, owner);
        if dir.exists() {
            log::debug!("working copy already present at {}", dir.display());
            return Ok(());
        }
        let dir = dir.to_string_lossy().into_owned();
        git(&["clone", clone_url, &dir], None)?;
        Ok(())
    }

    /// Remove any existing mirror remote (absence is not a failure), then
    /// add it fresh with the authenticated push URL.
    pub fn register_mirror_remote(
        &self,
        repo: &RepoName,
        owner: &str,
        push_url: &str,
    ) -> Result<(), GitError> {
        let dir = self.working_dir(repo, owner);
        git(&["remote", "remove", MIRROR_REMOTE], Some(&dir))?;
        git(&["remote", "add", MIRROR_REMOTE, push_url], Some(&dir))?;
        Ok(())
    }

    /// Fetch `origin` fully, then force-push the branch to the mirror.
    ///
    /// Force is intentional: the mirror is a disposable read replica, not
    /// an independent history.
    pub fn push_branch(&self, repo: &RepoName, owner: &str, branch: &str) -> Result<(), GitError> {
        let dir = self.working_dir(repo, owner);
        git(&["fetch", "origin"], Some(&dir))?;
        let refspec = format!("refs/remotes/origin/{branch}:refs/heads/{branch}");
        git(&["push", MIRROR_REMOTE, &refspec, "--force"], Some(&dir))?;
        Ok(())
    }

    /// Fetch the pull-request refs namespace, then push one pull request's
    /// head to a synthetic `gh-pr-<id>` branch on the mirror, so CI can
    /// build the pull request without merging it.
    pub fn push_pull_request(
        &self,
        repo: &RepoName,
        owner: &str,
        number: u64,
    ) -> Result<(), GitError> {
        let dir = self.working_dir(repo, owner);
        git(&["fetch", "origin", "+refs/pull/*:refs/pull/*"], Some(&dir))?;
        let refspec = format!("+refs/pull/{number}/head:refs/heads/gh-pr-{number}");
        git(&["push", MIRROR_REMOTE, &refspec], Some(&dir))?;
        Ok(())
    }
}

/// Run one git command, returning its trimmed stdout.
///
/// stderr is inherited; a non-zero exit logs a warning and still resolves.
fn git(args: &[&str], cwd: Option<&Path>) -> Result<String, GitError> {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|source| GitError::Spawn {
        args: args.join(" "),
        source,
    })?;

    if !output.status.success() {
        log::warn!("`git {}` exited with {}", args.join(" "), output.status);
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
