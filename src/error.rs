use rmcp::model::ErrorData;

#[derive(Debug, thiserror::Error)]
pub enum McpGithubError {
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Please set the {0} environment variable (or pass --token)")]
    MissingToken(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpGithubError {
    pub fn to_mcp_error(&self) -> ErrorData {
        match self {
            McpGithubError::InvalidParam(_) | McpGithubError::MissingToken(_) => {
                ErrorData::invalid_params(self.to_string(), None)
            }
            McpGithubError::UnknownResource(uri) => ErrorData::resource_not_found(
                self.to_string(),
                Some(serde_json::json!({ "uri": uri })),
            ),
            McpGithubError::GitHub(_) | McpGithubError::Json(_) => {
                ErrorData::internal_error(self.to_string(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_invalid_param_maps_to_invalid_params() {
        let err = McpGithubError::InvalidParam("state must be open, closed, or all".into());
        let mcp = err.to_mcp_error();
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.message.contains("state must be"));
    }

    #[test]
    fn test_unknown_resource_carries_uri() {
        let err = McpGithubError::UnknownResource("github://repo/x".into());
        let mcp = err.to_mcp_error();
        assert_eq!(mcp.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert_eq!(
            mcp.data,
            Some(serde_json::json!({ "uri": "github://repo/x" }))
        );
    }

    #[test]
    fn test_missing_token_message_names_variable() {
        let err = McpGithubError::MissingToken("GITHUB_TOKEN".into());
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }
}
