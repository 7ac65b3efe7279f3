//! MCP server that exposes a read-only slice of the GitHub API to LLMs.
//!
//! Provides tools for fetching user profiles, listing a user's repositories,
//! and listing repository issues, plus a `github://user/{username}` resource
//! and a `summarize_repo` prompt.

pub mod client;
pub mod error;
pub mod server;
pub mod shape;
