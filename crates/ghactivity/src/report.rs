use std::sync::Arc;
use tracing::{info, warn};

use progress::Progress;

use crate::aggregator::aggregate;
use crate::cancel::CancellationToken;
use crate::coordinator::{fetch_all, FetchOptions, RepositoryFailure};
use crate::error::{Error, Result};
use crate::model::{Period, Report, Repository};
use crate::provider::RepositoryProvider;

impl Report {
    /// Assemble a report from processed repositories, computing the contributor summary.
    pub fn new<S: Into<String>>(target: S, period: Period, repositories: Vec<Repository>) -> Self {
        let summary = aggregate(&repositories);
        Report {
            target: target.into(),
            period,
            repositories,
            summary,
        }
    }

    /// Total number of commits across all processed repositories.
    pub fn num_commits(&self) -> usize {
        self.repositories.iter().map(|r| r.commits().count()).sum()
    }
}

/// Build the activity report for a user or organization.
///
/// Only a failure to list the target's repositories is an error. Repositories that cannot be
/// processed are logged, left out of the report, and returned alongside it.
///
/// If `progress` is given, it is advanced once per finished repository.
pub async fn generate_report<P>(
    provider: Arc<P>,
    target: &str,
    period: Period,
    options: &FetchOptions,
    cancel: &CancellationToken,
    progress: Option<&mut Progress>,
) -> Result<(Report, Vec<RepositoryFailure>)>
where
    P: RepositoryProvider + ?Sized + 'static,
{
    info!(
        "Generating report for {target} from {} to {}",
        period.since.format("%Y-%m-%d"),
        period.until.format("%Y-%m-%d")
    );

    let repos = cancel
        .run(provider.list_repositories(target))
        .await
        .ok_or(Error::Cancelled)?
        .map_err(|e| Error::provider(format!("failed to list repositories of {target}"), e))?;
    info!("Found {} repositories", repos.len());

    let outcome = fetch_all(provider, repos, period, options, cancel, progress).await;
    for failure in &outcome.failures {
        warn!("{failure}");
    }
    info!("Successfully processed {} repositories", outcome.repositories.len());

    let report = Report::new(target, period, outcome.repositories);
    Ok((report, outcome.failures))
}
