//! Live tests against the public GitHub API.
//!
//! They need network access and a token in `GITHUB_TOKEN`:
//!
//! ```bash
//! GITHUB_TOKEN=ghp_... cargo test --test live -- --ignored
//! ```

use mcp_github_connector::client::{GithubClient, DEFAULT_API_URL};
use mcp_github_connector::server::McpGithubServer;
use mcp_github_connector::shape::{
    repo_summary_prompt, IssueQuery, IssueRecord, IssueState, IssueSummary, RepoListRecord,
    RepoRecord, RepoSummary,
};

fn client() -> Option<GithubClient> {
    let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty())?;
    Some(GithubClient::new(token, DEFAULT_API_URL).expect("client"))
}

#[tokio::test]
#[ignore = "integration test - requires GITHUB_TOKEN and network"]
async fn live_user_profile() {
    let Some(github) = client() else {
        eprintln!("Skipping: GITHUB_TOKEN not set");
        return;
    };
    let profile: serde_json::Value = github
        .github_request("/users/octocat", None::<&()>)
        .await
        .expect("profile");
    assert_eq!(profile["login"], "octocat");
}

#[tokio::test]
#[ignore = "integration test - requires GITHUB_TOKEN and network"]
async fn live_list_repos() {
    let Some(github) = client() else {
        eprintln!("Skipping: GITHUB_TOKEN not set");
        return;
    };
    let repos: Vec<RepoListRecord> = github
        .github_request("/users/octocat/repos", None::<&()>)
        .await
        .expect("repos");
    let summaries: Vec<RepoSummary> = repos.into_iter().map(RepoSummary::from).collect();
    assert!(summaries.iter().any(|r| r.name == "Hello-World"));
    assert!(summaries.iter().all(|r| r.url.starts_with("https://github.com/octocat/")));
}

#[tokio::test]
#[ignore = "integration test - requires GITHUB_TOKEN and network"]
async fn live_closed_issues() {
    let Some(github) = client() else {
        eprintln!("Skipping: GITHUB_TOKEN not set");
        return;
    };
    let query = IssueQuery {
        state: IssueState::Closed,
    };
    let issues: Vec<IssueRecord> = github
        .github_request("/repos/octocat/Hello-World/issues", Some(&query))
        .await
        .expect("issues");
    for issue in issues.into_iter().map(IssueSummary::from) {
        assert!(!issue.user.is_empty());
        assert!(issue.url.contains("/octocat/Hello-World/"));
    }
}

#[tokio::test]
#[ignore = "integration test - requires GITHUB_TOKEN and network"]
async fn live_user_resource_and_prompt_text() {
    let Some(github) = client() else {
        eprintln!("Skipping: GITHUB_TOKEN not set");
        return;
    };

    let repo: RepoRecord = github
        .github_request("/repos/octocat/Hello-World", None::<&()>)
        .await
        .expect("repo");
    assert!(repo_summary_prompt(&repo).contains("'Hello-World'"));

    let server = McpGithubServer::new(github, None);
    let summary = server
        .read_user_summary("github://user/octocat")
        .await
        .expect("summary");
    assert!(summary.starts_with("octocat has "));
    assert!(summary.ends_with(" followers."));
}

#[tokio::test]
#[ignore = "integration test - requires GITHUB_TOKEN and network"]
async fn live_unknown_user_is_an_error() {
    let Some(github) = client() else {
        eprintln!("Skipping: GITHUB_TOKEN not set");
        return;
    };
    let result: Result<serde_json::Value, _> = github
        .github_request("/users/this-user-should-not-exist-4f1c2a", None::<&()>)
        .await;
    assert!(result.is_err());
}
