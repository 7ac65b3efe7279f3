//! Projections from GitHub REST payloads to the smaller shapes returned to
//! MCP clients.
//!
//! The `*Record` types decode only the fields a projection needs. A payload
//! missing one of them fails to decode, so the caller sees a GitHub error
//! instead of a half-filled result.

use serde::{Deserialize, Serialize};

use crate::error::McpGithubError;

const NO_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, Deserialize)]
pub struct Login {
    pub login: String,
}

/// Fields of `GET /users/{username}` used by the profile summary.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub login: String,
    pub public_repos: u64,
    pub followers: u64,
}

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoListRecord {
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u64,
}

/// Fields of `GET /repos/{owner}/{repo}` used by the summary prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

/// One element of `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub title: String,
    pub html_url: String,
    pub user: Login,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub url: String,
    pub stars: u64,
}

impl From<RepoListRecord> for RepoSummary {
    fn from(r: RepoListRecord) -> Self {
        Self {
            name: r.name,
            url: r.html_url,
            stars: r.stargazers_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub title: String,
    pub url: String,
    pub user: String,
}

impl From<IssueRecord> for IssueSummary {
    fn from(i: IssueRecord) -> Self {
        Self {
            title: i.title,
            url: i.html_url,
            user: i.user.login,
        }
    }
}

/// Issue state filter accepted by the issues endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn parse(value: Option<&str>) -> Result<Self, McpGithubError> {
        match value.map(str::trim) {
            None | Some("") | Some("open") => Ok(IssueState::Open),
            Some("closed") => Ok(IssueState::Closed),
            Some("all") => Ok(IssueState::All),
            Some(other) => Err(McpGithubError::InvalidParam(format!(
                "state must be open, closed, or all (got '{}')",
                other
            ))),
        }
    }
}

/// Query string for the issues endpoint.
#[derive(Debug, Serialize)]
pub struct IssueQuery {
    pub state: IssueState,
}

pub fn user_summary(user: &UserRecord) -> String {
    format!(
        "{} has {} public repos and {} followers.",
        user.login, user.public_repos, user.followers
    )
}

pub fn repo_summary_prompt(repo: &RepoRecord) -> String {
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    format!(
        "Write a clear, concise summary of the GitHub repository '{}'. \
         Description: {}. It has {} stars and {} forks.",
        repo.name, description, repo.stargazers_count, repo.forks_count
    )
}
