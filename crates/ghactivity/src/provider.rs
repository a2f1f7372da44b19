use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{Branch, Commit, Repository};

/// The error type returned by a `RepositoryProvider`.
///
/// Provider failures of any kind (transport, authorization, not found) are treated identically,
/// so they are carried opaquely.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// A remote source-hosting service that can list repositories, branches, and commits.
///
/// Implementations handle authentication and pagination; every method returns the complete
/// list.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// List the non-archived repositories belonging to the given user or organization.
    ///
    /// The returned repositories have no branches attached.
    async fn list_repositories(&self, target: &str) -> ProviderResult<Vec<Repository>>;

    /// List the branches of a repository. The returned branches have no commits attached.
    async fn list_branches(&self, owner: &str, repo: &str) -> ProviderResult<Vec<Branch>>;

    /// List the commits reachable from `branch` whose author date falls within
    /// `[since, until]`, including per-commit change statistics.
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> ProviderResult<Vec<Commit>>;
}
