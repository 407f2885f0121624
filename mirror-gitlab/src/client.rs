//! GitLab REST API client.
//!
//! One authenticated request helper plus the typed operations the sync
//! orchestrator needs: project lookup/creation, runner attachment, and
//! build-events hook registration.

use serde::Deserialize;
use serde_json::Value;

use mirror_core::{Config, RepoName};

use crate::error::ApiError;

/// Error messages from GitLab that mean the desired state already holds.
/// Responses carrying one of these resolve successfully; callers interpret
/// the status/body themselves.
pub const BENIGN_ERRORS: [&str; 2] = [
    "Runner was already enabled for this project",
    "404 Project Not Found",
];

/// Status and parsed body of one API response.
///
/// The body is structured JSON when the server sent JSON; otherwise the raw
/// text is carried as an opaque string value.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// A GitLab project, as much of it as the sync run needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
}

/// Authenticated client against one GitLab instance's v4 API.
pub struct GitlabClient {
    agent: ureq::Agent,
    base: String,
    token: String,
}

impl GitlabClient {
    /// Build a client for `host` (scheme included) using a private token.
    pub fn new(host: &str, token: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base: format!("{}/api/v4", host.trim_end_matches('/')),
            token: token.to_owned(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.gitlab_host, &config.gitlab_token)
    }

    /// Issue one authenticated request.
    ///
    /// GET when `form` is `None`, otherwise a URL-form-encoded POST. Exactly
    /// one attempt; 4xx/5xx responses with a benign message resolve, all
    /// other error statuses fail with the full body.
    pub fn request(
        &self,
        path: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}/{}", self.base, path.trim_start_matches('/'));

        let result = match form {
            Some(fields) => self
                .agent
                .post(&url)
                .set("PRIVATE-TOKEN", &self.token)
                .send_form(fields),
            None => self.agent.get(&url).set("PRIVATE-TOKEN", &self.token).call(),
        };

        match result {
            Ok(resp) => {
                let status = resp.status();
                let body = parse_body(resp)?;
                Ok(ApiResponse { status, body })
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = parse_body(resp)?;
                if is_benign(&body) {
                    log::debug!("benign GitLab error (status {status}): {body}");
                    Ok(ApiResponse { status, body })
                } else {
                    Err(ApiError::Remote { status, body })
                }
            }
            Err(ureq::Error::Transport(t)) => Err(ApiError::Transport(Box::new(t))),
        }
    }

    /// Look up a project by namespace and repository name.
    ///
    /// A 404 (benign by allowlist) means the project does not exist yet.
    pub fn find_project(
        &self,
        namespace: &str,
        repo: &RepoName,
    ) -> Result<Option<Project>, ApiError> {
        let resp = self.request(&format!("projects/{}", encoded_path(namespace, repo)), None)?;
        if resp.status == 404 {
            return Ok(None);
        }
        let project = serde_json::from_value(resp.body)?;
        Ok(Some(project))
    }

    /// Create the mirror project: public, issues disabled, shared runners
    /// per configuration.
    pub fn create_project(
        &self,
        repo: &RepoName,
        shared_runners_enabled: bool,
    ) -> Result<Project, ApiError> {
        let shared = if shared_runners_enabled { "true" } else { "false" };
        let resp = self.request(
            "projects",
            Some(&[
                ("name", repo.0.as_str()),
                ("public", "true"),
                ("shared_runners_enabled", shared),
                ("issues_enabled", "false"),
            ]),
        )?;
        let project = serde_json::from_value(resp.body)?;
        Ok(project)
    }

    /// Attach the configured CI runner to a project by numeric id.
    ///
    /// "Runner was already enabled for this project" resolves benignly.
    pub fn enable_runner(&self, project_id: u64, runner_id: u64) -> Result<(), ApiError> {
        let runner = runner_id.to_string();
        self.request(
            &format!("projects/{project_id}/runners"),
            Some(&[("runner_id", runner.as_str())]),
        )?;
        Ok(())
    }

    /// Register the build-events webhook on a project: job events on, push
    /// events off.
    pub fn add_build_events_hook(
        &self,
        namespace: &str,
        repo: &RepoName,
        webhook_url: &str,
    ) -> Result<(), ApiError> {
        self.request(
            &format!("projects/{}/hooks", encoded_path(namespace, repo)),
            Some(&[
                ("url", webhook_url),
                ("job_events", "true"),
                ("push_events", "false"),
            ]),
        )?;
        Ok(())
    }
}

/// URL-encoded `<namespace>/<repo>` path segment.
fn encoded_path(namespace: &str, repo: &RepoName) -> String {
    format!("{namespace}%2F{repo}")
}

/// Parse a response body as JSON when possible; opaque string otherwise.
fn parse_body(resp: ureq::Response) -> Result<Value, ApiError> {
    let raw = resp.into_string()?;
    Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
}

/// True when the body's `message` field is on the benign allowlist.
fn is_benign(body: &Value) -> bool {
    body.get("message")
        .and_then(Value::as_str)
        .map(|message| BENIGN_ERRORS.contains(&message))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
