//! gitlab-mirror — push GitHub branches and pull requests into a GitLab
//! mirror project on webhook events.
//!
//! # Usage
//!
//! ```text
//! gitlab-mirror '<webhook payload JSON>'
//! gitlab-mirror --payload-file payload.json
//! ```
//!
//! Configuration comes from the environment (read once at startup):
//! `GITLAB_HOST`, `GITLAB_USER`, `GITLAB_TOKEN`, `GITLAB_REPO_OWNER`,
//! `GITHUB_REPO_OWNER`, `BUILD_EVENTS_WEBHOOK_URL`, `GITLAB_RUNNER_ID`,
//! `GITLAB_ENABLE_SHARED_RUNNERS`, `CONTRIBUTORS_WHITELIST`, `CWD`.
//!
//! Exit codes: 0 success, 1 sync failure, 2 configuration or payload
//! error, 3 unauthorized actor.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use mirror_core::{Config, SyncEvent};
use mirror_gitlab::GitlabClient;
use mirror_repo::LocalRepos;
use mirror_sync::SyncError;

const EXIT_SYNC_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_UNAUTHORIZED: u8 = 3;

const EXIT_CODES_HELP: &str = "Exit codes:
  0  ref pushed to the mirror
  1  sync failed (remote API, transport, or git)
  2  configuration or payload error
  3  actor not authorized";

#[derive(Parser, Debug)]
#[command(
    name = "gitlab-mirror",
    version,
    about = "Mirror a GitHub repository into GitLab CI on webhook events",
    after_help = EXIT_CODES_HELP,
)]
struct Cli {
    /// GitHub webhook payload JSON, as delivered to the hook endpoint.
    #[arg(required_unless_present = "payload_file", conflicts_with = "payload_file")]
    payload: Option<String>,

    /// Read the payload JSON from a file instead of the argument.
    #[arg(long, value_name = "PATH")]
    payload_file: Option<PathBuf>,

    /// Print the sync outcome as JSON instead of the summary line.
    #[arg(long)]
    json: bool,
}

/// A terminal failure paired with the process exit code it maps to.
struct Failure {
    code: u8,
    error: anyhow::Error,
}

fn failure<E: Into<anyhow::Error>>(code: u8) -> impl FnOnce(E) -> Failure {
    move |error| Failure {
        code,
        error: error.into(),
    }
}

fn main() -> ExitCode {
    // Progress lines go to stdout; the terminal error, if any, goes to
    // stderr below.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure { code, error }) => {
            eprintln!("gitlab-mirror: {error:#}");
            ExitCode::from(code)
        }
    }
}

fn execute(cli: Cli) -> Result<(), Failure> {
    let payload = read_payload(&cli).map_err(failure(EXIT_CONFIG))?;
    let event = SyncEvent::from_payload(&payload).map_err(failure(EXIT_CONFIG))?;
    let config = Config::from_env().map_err(failure(EXIT_CONFIG))?;

    let host = GitlabClient::from_config(&config);
    let repos = LocalRepos::new(config.workdir_root.clone());

    match mirror_sync::run(&config, &event, &host, &repos) {
        Ok(outcome) => {
            if cli.json {
                let rendered =
                    serde_json::to_string_pretty(&outcome).map_err(failure(EXIT_SYNC_FAILURE))?;
                println!("{rendered}");
            } else {
                let created = if outcome.created_project {
                    " (project created)"
                } else {
                    ""
                };
                println!(
                    "✓ '{}' mirrored: {} on project {}{}",
                    outcome.repository, outcome.pushed, outcome.project_id, created,
                );
            }
            Ok(())
        }
        Err(err) => {
            let code = match &err {
                SyncError::AllowlistMissing => EXIT_CONFIG,
                SyncError::Unauthorized { .. } => EXIT_UNAUTHORIZED,
                SyncError::Api { .. } | SyncError::Git { .. } => EXIT_SYNC_FAILURE,
            };
            Err(failure(code)(err))
        }
    }
}

fn read_payload(cli: &Cli) -> anyhow::Result<String> {
    if let Some(path) = &cli.payload_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("could not read payload file {}", path.display()));
    }
    // clap guarantees one of the two is present.
    cli.payload.clone().context("missing webhook payload")
}
