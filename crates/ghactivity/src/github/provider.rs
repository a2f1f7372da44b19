use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::model;
use crate::provider::{ProviderResult, RepositoryProvider};

use super::models::{CommitDetail, Repository};
use super::{Client, RepoEnumerator};

impl From<Repository> for model::Repository {
    fn from(r: Repository) -> Self {
        model::Repository::new(
            r.name,
            r.full_name,
            r.html_url,
            r.default_branch.unwrap_or_default(),
        )
    }
}

impl From<CommitDetail> for model::Commit {
    fn from(c: CommitDetail) -> Self {
        let signature = c.commit.author;
        let (name, email, date) = match signature {
            Some(s) => (s.name, s.email, s.date),
            None => (String::new(), String::new(), None),
        };
        let stats = match c.stats {
            Some(s) => model::CommitStats::new(s.additions, s.deletions),
            None => model::CommitStats::default(),
        };
        model::Commit {
            sha: c.sha,
            message: c.commit.message,
            author: model::Author {
                name,
                email,
                login: c.author.map(|a| a.login),
            },
            date: date.unwrap_or_default(),
            stats,
        }
    }
}

#[async_trait]
impl RepositoryProvider for Client {
    async fn list_repositories(&self, target: &str) -> ProviderResult<Vec<model::Repository>> {
        let repos = RepoEnumerator::new(self).enumerate_target_repos(target).await?;
        Ok(repos.into_iter().map(model::Repository::from).collect())
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> ProviderResult<Vec<model::Branch>> {
        let page = self.get_repo_branches(owner, repo).await?;
        let branches = self.get_all(page).await?;
        Ok(branches
            .into_iter()
            .map(|b| model::Branch::new(b.name, b.commit.sha))
            .collect())
    }

    /// Change statistics are only available from the per-commit endpoint, so each listed commit
    /// costs one more request. A commit whose details cannot be fetched is skipped.
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> ProviderResult<Vec<model::Commit>> {
        let page = self.get_repo_commits(owner, repo, branch, since, until).await?;
        let summaries = self.get_all(page).await?;
        debug!("{owner}/{repo}@{branch}: {} commits listed", summaries.len());

        let mut commits = Vec::with_capacity(summaries.len());
        for summary in summaries {
            match self.get_commit(owner, repo, &summary.sha).await {
                Ok(detail) => commits.push(model::Commit::from(detail)),
                Err(e) => {
                    warn!("Failed to get details of commit {} in {owner}/{repo}: {e}", summary.sha);
                }
            }
        }
        Ok(commits)
    }
}
