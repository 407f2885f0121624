//! Working-copy operations against real git repositories in temp dirs.
//!
//! Each test builds an upstream repository (playing GitHub) and a bare
//! repository (playing the GitLab mirror), then drives `LocalRepos` between
//! them. Tests skip when git is not installed.

use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use mirror_core::RepoName;
use mirror_repo::{LocalRepos, MIRROR_REMOTE};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run a git command in `dir`, panicking on failure (test setup only).
fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr),
    );
    String::from_utf8_lossy(&output.stdout).trim().to_owned()
}

/// Upstream repository with one commit on `main` and a `refs/pull/42/head`
/// ref pointing at it.
fn setup_upstream() -> TempDir {
    let upstream = TempDir::new().expect("upstream dir");
    run_git(upstream.path(), &["init", "-b", "main"]);
    run_git(upstream.path(), &["config", "user.email", "ci@example.com"]);
    run_git(upstream.path(), &["config", "user.name", "CI"]);
    std::fs::write(upstream.path().join("README.md"), "mirror me").expect("write");
    run_git(upstream.path(), &["add", "README.md"]);
    run_git(upstream.path(), &["commit", "-m", "initial"]);
    run_git(upstream.path(), &["update-ref", "refs/pull/42/head", "HEAD"]);
    upstream
}

fn setup_mirror() -> TempDir {
    let mirror = TempDir::new().expect("mirror dir");
    run_git(mirror.path(), &["init", "--bare"]);
    mirror
}

#[test]
fn clone_if_absent_clones_once_and_reuses() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let upstream = setup_upstream();
    let root = TempDir::new().expect("root");
    let repos = LocalRepos::new(root.path());
    let repo = RepoName::from("widget");
    let url = upstream.path().to_string_lossy().into_owned();

    repos.clone_if_absent(&repo, "acme", &url).expect("clone");
    let dir = repos.working_dir(&repo, "acme");
    assert!(dir.join(".git").exists(), "clone should exist");

    // A marker file survives the second call, proving no re-clone happened.
    std::fs::write(dir.join("marker"), "x").expect("marker");
    repos.clone_if_absent(&repo, "acme", &url).expect("no-op");
    assert!(dir.join("marker").exists(), "second call must be a no-op");
}

#[test]
fn register_mirror_remote_is_idempotent_and_replaces_stale_urls() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let upstream = setup_upstream();
    let root = TempDir::new().expect("root");
    let repos = LocalRepos::new(root.path());
    let repo = RepoName::from("widget");
    let url = upstream.path().to_string_lossy().into_owned();
    repos.clone_if_absent(&repo, "acme", &url).expect("clone");
    let dir = repos.working_dir(&repo, "acme");

    // First registration: no prior remote, removal must be tolerated.
    repos
        .register_mirror_remote(&repo, "acme", "https://one.example/m.git")
        .expect("first registration");
    assert_eq!(
        run_git(&dir, &["remote", "get-url", MIRROR_REMOTE]),
        "https://one.example/m.git"
    );

    // Second registration with a rotated URL replaces the stale one.
    repos
        .register_mirror_remote(&repo, "acme", "https://two.example/m.git")
        .expect("second registration");
    assert_eq!(
        run_git(&dir, &["remote", "get-url", MIRROR_REMOTE]),
        "https://two.example/m.git"
    );
}

#[test]
fn push_branch_force_pushes_the_origin_ref() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let upstream = setup_upstream();
    let mirror = setup_mirror();
    let root = TempDir::new().expect("root");
    let repos = LocalRepos::new(root.path());
    let repo = RepoName::from("widget");
    let url = upstream.path().to_string_lossy().into_owned();

    repos.clone_if_absent(&repo, "acme", &url).expect("clone");
    repos
        .register_mirror_remote(&repo, "acme", &mirror.path().to_string_lossy())
        .expect("remote");
    repos.push_branch(&repo, "acme", "main").expect("push");

    let upstream_head = run_git(upstream.path(), &["rev-parse", "refs/heads/main"]);
    let mirrored = run_git(mirror.path(), &["rev-parse", "refs/heads/main"]);
    assert_eq!(mirrored, upstream_head, "mirror must match upstream head");
}

#[test]
fn push_pull_request_lands_on_a_synthetic_branch() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let upstream = setup_upstream();
    let mirror = setup_mirror();
    let root = TempDir::new().expect("root");
    let repos = LocalRepos::new(root.path());
    let repo = RepoName::from("widget");
    let url = upstream.path().to_string_lossy().into_owned();

    repos.clone_if_absent(&repo, "acme", &url).expect("clone");
    repos
        .register_mirror_remote(&repo, "acme", &mirror.path().to_string_lossy())
        .expect("remote");
    repos.push_pull_request(&repo, "acme", 42).expect("push pr");

    let pr_head = run_git(upstream.path(), &["rev-parse", "refs/pull/42/head"]);
    let mirrored = run_git(mirror.path(), &["rev-parse", "refs/heads/gh-pr-42"]);
    assert_eq!(mirrored, pr_head, "gh-pr-42 must point at the PR head");
}
