// Vercel REST client: a small blocking HTTP client wrapping the four
// deployment endpoints the tool needs. Every call is a single request with
// bearer auth; non-2xx responses surface as errors carrying the status and
// response body.

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use crossterm::style::Stylize;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Lifecycle states a deployment filter can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeploymentState {
    Building,
    Error,
    Initializing,
    Queued,
    Ready,
    Canceled,
}

impl DeploymentState {
    pub const ALL: [DeploymentState; 6] = [
        DeploymentState::Building,
        DeploymentState::Error,
        DeploymentState::Initializing,
        DeploymentState::Queued,
        DeploymentState::Ready,
        DeploymentState::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentState::Building => "BUILDING",
            DeploymentState::Error => "ERROR",
            DeploymentState::Initializing => "INITIALIZING",
            DeploymentState::Queued => "QUEUED",
            DeploymentState::Ready => "READY",
            DeploymentState::Canceled => "CANCELED",
        }
    }

    pub fn parse(state: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == state)
            .with_context(|| format!("invalid deployment state {state:?}"))
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions offered against an inspected deployment, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Cancel,
    Redeploy,
    Exit,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Cancel, Action::Redeploy, Action::Exit];

    pub fn id(&self) -> &'static str {
        match self {
            Action::Cancel => "CANCEL",
            Action::Redeploy => "REDEPLOY",
            Action::Exit => "EXIT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Cancel => "Cancel",
            Action::Redeploy => "Redeploy",
            Action::Exit => "Exit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSource {
    #[serde(rename = "ref", default)]
    pub branch: String,
    #[serde(rename = "sha", default)]
    pub commit_sha: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentMeta {
    #[serde(rename = "githubCommitRef", default)]
    pub commit_ref: String,
}

/// One deployment as the API reports it. The list and detail endpoints
/// populate different subsets of these fields (the list carries `uid`, the
/// detail `id`), so everything defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: Vec<String>,
    #[serde(default)]
    pub url: String,
    /// Unix milliseconds.
    #[serde(default)]
    pub created: u64,
    /// Unix milliseconds.
    #[serde(default)]
    pub building_at: u64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub ready_state: String,
    #[serde(default)]
    pub creator: Creator,
    #[serde(default)]
    pub inspector_url: String,
    #[serde(default)]
    pub git_source: GitSource,
    #[serde(default)]
    pub meta: DeploymentMeta,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentsPage {
    #[serde(default)]
    deployments: Vec<Deployment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RedeployProjectSettings {
    command_for_ignoring_build_step: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RedeployRequest {
    name: String,
    deployment_id: String,
    project_settings: RedeployProjectSettings,
}

/// Blocking client for the deployments API. Holds the reqwest client, the
/// API base URL, the bearer token, the team id, and the configured project
/// name to id pairs.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    team_id: String,
    projects: Vec<(String, String)>,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: cfg.endpoint.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
            team_id: cfg.team_id.clone(),
            projects: cfg
                .projects
                .iter()
                .map(|p| (p.name.clone(), p.id.clone()))
                .collect(),
        })
    }

    fn project_id(&self, project: &str) -> Result<&str> {
        self.projects
            .iter()
            .find(|(name, _)| name == project)
            .map(|(_, id)| id.as_str())
            .with_context(|| format!("no project id configured for {project:?}"))
    }

    /// List deployments of `project` created within the last `hours_since`
    /// hours, filtered to `states`, at most `limit` entries.
    pub fn list_deployments(
        &self,
        project: &str,
        limit: u32,
        hours_since: i64,
        states: &[DeploymentState],
    ) -> Result<Vec<Deployment>> {
        let project_id = self.project_id(project)?;

        // The age window always reaches into the past, one hour at minimum.
        let hours_back = hours_since.abs().max(1);
        let since = (Utc::now() - Duration::hours(hours_back)).timestamp_millis();

        let state_filter = states
            .iter()
            .map(DeploymentState::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/v6/deployments", self.base_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("limit", limit.to_string()),
                ("projectId", project_id.to_string()),
                ("since", since.to_string()),
                ("state", state_filter),
            ])
            .send()
            .context("failed to send deployments list request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            bail!("Listing deployments failed: {} - {}", status, txt);
        }
        let page: DeploymentsPage = res.json().context("parsing deployments list json")?;
        Ok(page.deployments)
    }

    /// Fetch one deployment's details.
    pub fn get_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let url = format!("{}/v13/deployments/{}", self.base_url, deployment_id);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .context("failed to send deployment request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            bail!("Fetching deployment failed: {} - {}", status, txt);
        }
        res.json().context("parsing deployment json")
    }

    /// Cancel a queued or building deployment.
    pub fn cancel_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let url = format!("{}/v12/deployments/{}/cancel", self.base_url, deployment_id);
        let res = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .send()
            .context("failed to send cancel request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            bail!("Cancelling deployment failed: {} - {}", status, txt);
        }
        res.json().context("parsing cancel response json")
    }

    /// Create a new deployment reusing the source and configuration of an
    /// existing one.
    pub fn redeploy(&self, source: &Deployment) -> Result<Deployment> {
        let url = format!("{}/v13/deployments", self.base_url);
        let body = RedeployRequest {
            name: source.name.clone(),
            deployment_id: source.id.clone(),
            project_settings: RedeployProjectSettings {
                command_for_ignoring_build_step: String::new(),
            },
        };
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[("teamId", self.team_id.as_str()), ("forceNew", "1")])
            .json(&body)
            .send()
            .context("failed to send redeploy request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            bail!("Redeploying failed: {} - {}", status, txt);
        }
        res.json().context("parsing redeploy response json")
    }
}

/// Colorize a ready-state string for the info table. Unknown states pass
/// through uncolored.
pub fn format_state(state: &str) -> String {
    match DeploymentState::parse(state) {
        Ok(DeploymentState::Ready) => format!("{}", format!("\u{23fa} {state}").green()),
        Ok(DeploymentState::Error) => format!("{}", format!("\u{25cb} {state}").red()),
        Ok(DeploymentState::Building) => format!("{}", format!("\u{25cb} {state}").blue()),
        Ok(DeploymentState::Canceled) => format!("{}", format!("\u{25cb} {state}").dark_grey()),
        _ => format!("\u{23f6} {state}"),
    }
}
