use tracing::{debug, info, warn};

use crate::branch_selector::BranchSelector;
use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::model::{Period, Repository};
use crate::provider::RepositoryProvider;

/// Fetch the commits of a repository's selected branches within the given period and attach
/// them to the repository.
///
/// Failing to split the repository name or to list its branches fails the repository.
/// Failing to list the commits of a branch only drops that branch. A repository with no
/// selected or no successfully fetched branches is returned with an empty branch list.
pub async fn process_repository<P>(
    provider: &P,
    mut repo: Repository,
    period: &Period,
    selector: &BranchSelector,
    cancel: &CancellationToken,
) -> Result<Repository>
where
    P: RepositoryProvider + ?Sized,
{
    info!("Processing repository: {}", repo.full_name);

    let (owner, name) = repo.owner_and_name()?;

    let branches = cancel
        .run(provider.list_branches(owner, name))
        .await
        .ok_or(Error::Cancelled)?
        .map_err(|e| Error::provider(format!("failed to list branches of {}", repo.full_name), e))?;

    let selected = selector.select(&branches, &repo.default_branch);
    debug!(
        "{}: selected {} of {} branches",
        repo.full_name,
        selected.len(),
        branches.len()
    );

    let mut processed = Vec::with_capacity(selected.len());
    for mut branch in selected {
        let fetched = cancel
            .run(provider.list_commits(owner, name, &branch.name, period.since, period.until))
            .await;
        match fetched {
            None => return Err(Error::Cancelled),
            Some(Err(e)) => {
                warn!("Failed to get commits for {}@{}: {e}", repo.full_name, branch.name);
            }
            Some(Ok(commits)) => {
                debug!("{}: branch {}: {} commits", repo.full_name, branch.name, commits.len());
                branch.commits = commits;
                processed.push(branch);
            }
        }
    }

    repo.branches = processed;
    Ok(repo)
}
