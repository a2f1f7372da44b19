use tracing::debug;

use super::models::Repository;
use super::{Client, Result};

/// A `RepoEnumerator` provides higher-level functionality on top of the GitHub REST API to list
/// repositories belonging to specific users or organizations.
pub struct RepoEnumerator<'c> {
    client: &'c Client,
}

impl<'c> RepoEnumerator<'c> {
    pub fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Enumerate the accessible repositories that belong to the given user.
    pub async fn enumerate_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let repo_page = self.client.get_user_repos(username).await?;
        self.client.get_all(repo_page).await
    }

    /// Enumerate the accessible repositories that belong to the given organization.
    pub async fn enumerate_org_repos(&self, orgname: &str) -> Result<Vec<Repository>> {
        let repo_page = self.client.get_org_repos(orgname).await?;
        self.client.get_all(repo_page).await
    }

    /// Enumerate the non-archived repositories of a target that may be either an organization or
    /// a user.
    ///
    /// The target is tried as an organization first. If that fails for any reason, it is tried as
    /// a user, and the outcome of that attempt is returned.
    pub async fn enumerate_target_repos(&self, target: &str) -> Result<Vec<Repository>> {
        let repos = match self.enumerate_org_repos(target).await {
            Ok(repos) => repos,
            Err(e) => {
                debug!("Failed to list repositories of organization {target:?}, trying as user: {e}");
                self.enumerate_user_repos(target).await?
            }
        };

        let total = repos.len();
        let repos: Vec<Repository> = repos.into_iter().filter(|r| !r.archived).collect();
        debug!("Found {} repositories of {target:?} ({} archived)", repos.len(), total - repos.len());
        Ok(repos)
    }
}
