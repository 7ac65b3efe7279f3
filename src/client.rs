use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::McpGithubError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Shared handle to an authenticated GitHub REST client.
#[derive(Clone)]
pub struct GithubClient {
    github: Arc<octocrab::Octocrab>,
}

impl GithubClient {
    /// Build a client that authenticates every request with `token` and
    /// resolves routes against `api_url`.
    pub fn new(token: String, api_url: &str) -> Result<Self, McpGithubError> {
        let github = octocrab::OctocrabBuilder::new()
            .personal_token(token)
            .base_uri(api_url)?
            .build()?;
        Ok(Self::from_octocrab(github))
    }

    pub fn from_octocrab(github: octocrab::Octocrab) -> Self {
        Self {
            github: Arc::new(github),
        }
    }

    /// GET `endpoint` (an absolute API path such as `/users/octocat`) with
    /// optional query parameters and decode the body as `T`.
    ///
    /// Non-2xx responses and bodies missing required fields both surface as
    /// [`McpGithubError::GitHub`].
    pub async fn github_request<T, P>(
        &self,
        endpoint: &str,
        params: Option<&P>,
    ) -> Result<T, McpGithubError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        tracing::debug!(endpoint, "GitHub request");
        self.github.get(endpoint, params).await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "GitHub request failed");
            McpGithubError::GitHub(e)
        })
    }
}

/// Validate that a GitHub user/owner/repo name doesn't contain characters
/// that could be used for URL injection in raw API routes.
pub fn sanitize_github_name(name: &str, field: &str) -> Result<(), McpGithubError> {
    if name.is_empty() {
        return Err(McpGithubError::InvalidParam(format!(
            "{} must not be empty",
            field
        )));
    }
    if name.chars().all(|ch| ch == '.') {
        return Err(McpGithubError::InvalidParam(format!(
            "{} must not consist only of dots",
            field
        )));
    }
    for ch in ['/', '?', '#', '%', '\0', ' ', '\n', '\t'] {
        if name.contains(ch) {
            return Err(McpGithubError::InvalidParam(format!(
                "{} contains invalid character '{}'",
                field,
                ch.escape_default()
            )));
        }
    }
    Ok(())
}
