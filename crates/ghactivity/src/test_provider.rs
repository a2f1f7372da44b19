//! An in-memory `RepositoryProvider` for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};

use crate::model::{Author, Branch, Commit, CommitStats, Repository};
use crate::provider::{ProviderResult, RepositoryProvider};

#[derive(Default)]
pub struct FakeProvider {
    repos: Vec<Repository>,
    branches: HashMap<String, Result<Vec<Branch>, String>>,
    commits: HashMap<(String, String), Result<Vec<Commit>, String>>,
    pending: HashSet<String>,
    panicking: HashSet<String>,
}

impl FakeProvider {
    pub fn with_repo(mut self, repo: Repository) -> Self {
        self.repos.push(repo);
        self
    }

    pub fn with_branches(mut self, full_name: &str, names: &[&str]) -> Self {
        let branches = names.iter().map(|n| Branch::new(*n, "0000")).collect();
        self.branches.insert(full_name.to_string(), Ok(branches));
        self
    }

    pub fn with_branch_error(mut self, full_name: &str, message: &str) -> Self {
        self.branches.insert(full_name.to_string(), Err(message.to_string()));
        self
    }

    /// Branch listing for this repository never completes.
    pub fn with_pending_branches(mut self, full_name: &str) -> Self {
        self.pending.insert(full_name.to_string());
        self
    }

    /// Branch listing for this repository panics.
    pub fn with_panicking_branches(mut self, full_name: &str) -> Self {
        self.panicking.insert(full_name.to_string());
        self
    }

    pub fn with_commits(mut self, full_name: &str, branch: &str, commits: Vec<Commit>) -> Self {
        self.commits.insert((full_name.to_string(), branch.to_string()), Ok(commits));
        self
    }

    pub fn with_commit_error(mut self, full_name: &str, branch: &str, message: &str) -> Self {
        self.commits
            .insert((full_name.to_string(), branch.to_string()), Err(message.to_string()));
        self
    }
}

#[async_trait]
impl RepositoryProvider for FakeProvider {
    async fn list_repositories(&self, _target: &str) -> ProviderResult<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> ProviderResult<Vec<Branch>> {
        let full_name = format!("{owner}/{repo}");
        if self.pending.contains(&full_name) {
            std::future::pending::<()>().await;
        }
        if self.panicking.contains(&full_name) {
            panic!("branch listing of {full_name} blew up");
        }
        match self.branches.get(&full_name) {
            Some(Ok(branches)) => Ok(branches.clone()),
            Some(Err(e)) => Err(e.clone().into()),
            None => Err(format!("{full_name} not found").into()),
        }
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        _since: DateTime<Utc>,
        _until: DateTime<Utc>,
    ) -> ProviderResult<Vec<Commit>> {
        let key = (format!("{owner}/{repo}"), branch.to_string());
        match self.commits.get(&key) {
            Some(Ok(commits)) => Ok(commits.clone()),
            Some(Err(e)) => Err(e.clone().into()),
            None => Ok(Vec::new()),
        }
    }
}

/// A commit by the author with the given login.
pub fn commit(sha: &str, login: &str, additions: u64, deletions: u64) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: format!("commit {sha}"),
        author: Author {
            name: format!("{login} name"),
            email: format!("{login}@example.com"),
            login: Some(login.to_string()),
        },
        date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        stats: CommitStats::new(additions, deletions),
    }
}
