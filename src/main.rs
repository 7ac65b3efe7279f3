use anyhow::Result;
use clap::Parser;
use mcp_github_connector::client::{GithubClient, DEFAULT_API_URL};
use mcp_github_connector::error::McpGithubError;
use mcp_github_connector::server;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// MCP server exposing GitHub user profiles, repositories, and issues to LLMs
#[derive(Parser)]
#[command(name = "mcp-github-connector", version, about)]
struct Cli {
    /// GitHub personal access token.
    /// Can also be set via GITHUB_TOKEN (environment or .env file).
    #[arg(long)]
    token: Option<String>,

    /// Read GitHub token from an environment variable.
    /// Default: GITHUB_TOKEN
    #[arg(long = "token-env")]
    token_env: Option<String>,

    /// Default user/owner when a request omits one
    #[arg(long)]
    owner: Option<String>,

    /// GitHub API base URL (set for GitHub Enterprise)
    #[arg(long = "api-url", default_value = DEFAULT_API_URL)]
    api_url: String,
}

/// Resolve token: --token > --token-env > GITHUB_TOKEN. Empty values count as unset.
fn resolve_token(
    flag: Option<String>,
    env_name: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, McpGithubError> {
    if let Some(t) = flag.filter(|t| !t.is_empty()) {
        return Ok(t);
    }
    let env_name = env_name.unwrap_or(DEFAULT_TOKEN_ENV);
    match lookup(env_name) {
        Some(t) if !t.is_empty() => {
            tracing::info!(env = env_name, "Read GitHub token from environment variable");
            Ok(t)
        }
        _ => Err(McpGithubError::MissingToken(env_name.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }

    let token = resolve_token(cli.token, cli.token_env.as_deref(), |name| {
        std::env::var(name).ok()
    })?;

    let github = GithubClient::new(token, &cli.api_url)
        .map_err(|e| anyhow::anyhow!("Failed to create GitHub client: {}", e))?;

    tracing::info!(
        api_url = %cli.api_url,
        owner = cli.owner.as_deref().unwrap_or("none"),
        "Starting {} server",
        server::SERVER_NAME
    );

    let service = server::McpGithubServer::new(github, cli.owner);
    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    Ok(())
}
