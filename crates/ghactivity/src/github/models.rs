//! Response bodies of the GitHub REST API, restricted to the fields this crate uses.

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub mod page;
pub use page::Page;

// -------------------------------------------------------------------------------------------------
// ClientError
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct ClientError {
    pub message: String,
    pub documentation_url: Option<String>,
}

// -------------------------------------------------------------------------------------------------
// RateLimit
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct RateLimitOverview {
    pub rate: Rate,
}

#[derive(Debug, Deserialize)]
pub struct Rate {
    pub limit: i64,
    pub remaining: i64,
    pub reset: i64,
    pub used: i64,
}

// -------------------------------------------------------------------------------------------------
// Repository
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub fork: bool,
    /// Absent for empty repositories on some GitHub Enterprise versions
    pub default_branch: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

// -------------------------------------------------------------------------------------------------
// Branch
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
}

// -------------------------------------------------------------------------------------------------
// Commits
// -------------------------------------------------------------------------------------------------
/// An entry from the commit listing endpoint.
#[derive(Debug, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: GitCommit,
    /// The GitHub account linked to the commit author, if any
    pub author: Option<Account>,
}

/// A single commit as returned by the commit detail endpoint.
#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub sha: String,
    pub commit: GitCommit,
    pub author: Option<Account>,
    pub stats: Option<CommitStats>,
}

#[derive(Debug, Deserialize)]
pub struct GitCommit {
    pub message: String,
    pub author: Option<GitSignature>,
}

#[derive(Debug, Deserialize)]
pub struct GitSignature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}
