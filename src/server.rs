use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{
    prompt, prompt_handler, prompt_router, schemars, tool, tool_handler, tool_router,
    RoleServer, ServerHandler,
};
use serde::Deserialize;

use crate::client::{sanitize_github_name, GithubClient};
use crate::error::McpGithubError;
use crate::shape::{
    repo_summary_prompt, user_summary, IssueQuery, IssueRecord, IssueState, IssueSummary,
    RepoListRecord, RepoRecord, RepoSummary, UserRecord,
};

pub const SERVER_NAME: &str = "GitHubConnector";
pub const USER_RESOURCE_PREFIX: &str = "github://user/";
pub const USER_RESOURCE_TEMPLATE: &str = "github://user/{username}";

#[derive(Clone)]
pub struct McpGithubServer {
    github: GithubClient,
    default_owner: Option<String>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

// -- Tool and prompt parameter types --

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UsernameParam {
    #[schemars(description = "GitHub username")]
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RepoIssuesParams {
    #[schemars(description = "Repository owner (user or org)")]
    #[serde(default)]
    pub owner: Option<String>,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Filter by state: open, closed, or all (default: open)")]
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummarizeRepoArgs {
    #[schemars(description = "Repository owner (user or org)")]
    #[serde(default)]
    pub owner: Option<String>,

    #[schemars(description = "Repository name")]
    pub repo: String,
}

impl McpGithubServer {
    pub fn new(github: GithubClient, default_owner: Option<String>) -> Self {
        Self {
            github,
            default_owner,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    /// Pick the caller's value, falling back to `--owner`, and make sure it is
    /// safe to splice into a route.
    fn resolve_owner(&self, param: Option<&str>, field: &str) -> Result<String, McpGithubError> {
        let owner = param
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .or_else(|| self.default_owner.clone())
            .ok_or_else(|| {
                McpGithubError::InvalidParam(format!(
                    "{} is required (or set --owner default)",
                    field
                ))
            })?;
        sanitize_github_name(&owner, field)?;
        Ok(owner)
    }

    fn resolve_repo(&self, repo: &str) -> Result<String, McpGithubError> {
        let repo = repo.trim();
        sanitize_github_name(repo, "repo")?;
        Ok(repo.to_string())
    }

    fn err(&self, e: McpGithubError) -> ErrorData {
        e.to_mcp_error()
    }

    async fn fetch_user(&self, username: &str) -> Result<UserRecord, McpGithubError> {
        self.github
            .github_request(&format!("/users/{}", username), None::<&()>)
            .await
    }

    /// Text for the `github://user/{username}` resource.
    pub async fn read_user_summary(&self, uri: &str) -> Result<String, McpGithubError> {
        let username = parse_user_uri(uri)?;
        let user = self.fetch_user(username).await?;
        Ok(user_summary(&user))
    }

    async fn user_resource(&self, uri: String) -> Result<ReadResourceResult, McpGithubError> {
        let text = self.read_user_summary(&uri).await?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

/// Extract the username from `github://user/{username}`.
fn parse_user_uri(uri: &str) -> Result<&str, McpGithubError> {
    let username = uri
        .strip_prefix(USER_RESOURCE_PREFIX)
        .ok_or_else(|| McpGithubError::UnknownResource(uri.to_string()))?;
    sanitize_github_name(username, "username")
        .map_err(|_| McpGithubError::UnknownResource(uri.to_string()))?;
    Ok(username)
}

fn user_resource_template() -> Result<ResourceTemplate, McpGithubError> {
    let template = serde_json::from_value(serde_json::json!({
        "uriTemplate": USER_RESOURCE_TEMPLATE,
        "name": "github_user",
        "description": "GitHub user profile summary: public repository and follower counts",
        "mimeType": "text/plain",
    }))?;
    Ok(template)
}

fn json_text<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpGithubError> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

// -- MCP tool handlers --

#[tool_router]
impl McpGithubServer {
    #[tool(
        name = "get_user_info",
        description = "Fetch GitHub profile information for a given username"
    )]
    async fn get_user_info(
        &self,
        Parameters(params): Parameters<UsernameParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let username = self
            .resolve_owner(params.username.as_deref(), "username")
            .map_err(|e| self.err(e))?;

        let profile: serde_json::Value = self
            .github
            .github_request(&format!("/users/{}", username), None::<&()>)
            .await
            .map_err(|e| self.err(e))?;

        json_text(&profile).map_err(|e| self.err(e))
    }

    #[tool(
        name = "list_repos",
        description = "List public repositories of a GitHub user"
    )]
    async fn list_repos(
        &self,
        Parameters(params): Parameters<UsernameParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let username = self
            .resolve_owner(params.username.as_deref(), "username")
            .map_err(|e| self.err(e))?;

        let repos: Vec<RepoListRecord> = self
            .github
            .github_request(&format!("/users/{}/repos", username), None::<&()>)
            .await
            .map_err(|e| self.err(e))?;

        let results: Vec<RepoSummary> = repos.into_iter().map(RepoSummary::from).collect();
        json_text(&results).map_err(|e| self.err(e))
    }

    #[tool(
        name = "get_repo_issues",
        description = "List issues from a repository (open by default)"
    )]
    async fn get_repo_issues(
        &self,
        Parameters(params): Parameters<RepoIssuesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let owner = self
            .resolve_owner(params.owner.as_deref(), "owner")
            .map_err(|e| self.err(e))?;
        let repo = self
            .resolve_repo(&params.repo)
            .map_err(|e| self.err(e))?;
        let state = IssueState::parse(params.state.as_deref()).map_err(|e| self.err(e))?;

        let issues: Vec<IssueRecord> = self
            .github
            .github_request(
                &format!("/repos/{}/{}/issues", owner, repo),
                Some(&IssueQuery { state }),
            )
            .await
            .map_err(|e| self.err(e))?;

        let results: Vec<IssueSummary> = issues.into_iter().map(IssueSummary::from).collect();
        json_text(&results).map_err(|e| self.err(e))
    }
}

// -- MCP prompts --

#[prompt_router]
impl McpGithubServer {
    #[prompt(
        name = "summarize_repo",
        description = "Generate a writing prompt to summarize a GitHub repo"
    )]
    async fn summarize_repo(
        &self,
        Parameters(args): Parameters<SummarizeRepoArgs>,
    ) -> Result<Vec<PromptMessage>, ErrorData> {
        let owner = self
            .resolve_owner(args.owner.as_deref(), "owner")
            .map_err(|e| self.err(e))?;
        let name = self
            .resolve_repo(&args.repo)
            .map_err(|e| self.err(e))?;

        let repo: RepoRecord = self
            .github
            .github_request(&format!("/repos/{}/{}", owner, name), None::<&()>)
            .await
            .map_err(|e| self.err(e))?;

        Ok(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            repo_summary_prompt(&repo),
        )])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for McpGithubServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "GitHub connector. Use get_user_info for a user's profile, list_repos for \
                 their public repositories, and get_repo_issues for a repository's issues. \
                 Read github://user/{username} for a one-line profile summary, and use the \
                 summarize_repo prompt to draft a repository summary."
                    .to_string(),
            ),
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        let template = user_resource_template().map_err(|e| self.err(e))?;
        Ok(ListResourceTemplatesResult::with_all_items(vec![template]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.user_resource(request.uri)
            .await
            .map_err(|e| self.err(e))
    }
}
