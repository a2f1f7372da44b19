use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

use progress::Progress;

use crate::branch_selector::BranchSelector;
use crate::cancel::CancellationToken;
use crate::error::Error;
use crate::model::{Period, Repository};
use crate::processor::process_repository;
use crate::provider::RepositoryProvider;

/// The number of repositories processed concurrently by default
pub const DEFAULT_CONCURRENCY: usize = 10;

// -------------------------------------------------------------------------------------------------
// FetchOptions
// -------------------------------------------------------------------------------------------------
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Maximum number of repositories processed at once; values below 1 are treated as 1
    pub concurrency: usize,

    pub selector: BranchSelector,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            concurrency: DEFAULT_CONCURRENCY,
            selector: BranchSelector::default(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// RepositoryFailure
// -------------------------------------------------------------------------------------------------
/// A repository that could not be processed.
#[derive(Debug)]
pub struct RepositoryFailure {
    pub full_name: String,
    pub error: Error,
}

impl std::fmt::Display for RepositoryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "repository {}: {}", self.full_name, self.error)
    }
}

// -------------------------------------------------------------------------------------------------
// FetchOutcome
// -------------------------------------------------------------------------------------------------
/// The result of processing a batch of repositories.
///
/// Every input repository ends up in exactly one of the two lists. The order of `repositories`
/// reflects completion order, not input order.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub repositories: Vec<Repository>,
    pub failures: Vec<RepositoryFailure>,
}

/// Process the given repositories on a pool of `min(concurrency, repositories.len())` workers.
///
/// Workers take repositories from a shared queue and send each result to one of two channels,
/// one for processed repositories and one for failures. Both channels have room for every input,
/// so workers never wait on the consumer. The channels are drained concurrently until every
/// worker has finished.
///
/// A failing repository never aborts the batch, even if processing it panics. On cancellation,
/// in-flight and remaining repositories are reported as failures.
///
/// If `progress` is given, its length is set to the number of repositories and it is advanced
/// once per finished repository.
pub async fn fetch_all<P>(
    provider: Arc<P>,
    repositories: Vec<Repository>,
    period: Period,
    options: &FetchOptions,
    cancel: &CancellationToken,
    mut progress: Option<&mut Progress>,
) -> FetchOutcome
where
    P: RepositoryProvider + ?Sized + 'static,
{
    let num_repos = repositories.len();
    if num_repos == 0 {
        return FetchOutcome::default();
    }
    let num_workers = options.concurrency.clamp(1, num_repos);
    if let Some(progress) = progress.as_mut() {
        progress.set_length(num_repos as u64);
    }
    debug!("Processing {num_repos} repositories with {num_workers} workers");

    // The queue is filled completely before any worker starts, so a worker that finds it empty
    // can stop.
    let (queue_send, queue_recv) = crossbeam_channel::bounded::<Repository>(num_repos);
    for repo in repositories {
        queue_send
            .send(repo)
            .expect("work queue should have room for every repository");
    }
    drop(queue_send);

    let (success_send, mut success_recv) = mpsc::channel::<Repository>(num_repos);
    let (failure_send, mut failure_recv) = mpsc::channel::<RepositoryFailure>(num_repos);
    let selector = Arc::new(options.selector.clone());

    let workers: Vec<_> = (0..num_workers)
        .map(|worker_id| {
            let provider = Arc::clone(&provider);
            let selector = Arc::clone(&selector);
            let cancel = cancel.clone();
            let queue_recv = queue_recv.clone();
            let success_send = success_send.clone();
            let failure_send = failure_send.clone();

            tokio::spawn(async move {
                while let Ok(repo) = queue_recv.try_recv() {
                    let full_name = repo.full_name.clone();
                    // Each repository runs in its own task so that a panic fails only that
                    // repository, not the rest of this worker's queue.
                    let task = tokio::spawn({
                        let provider = Arc::clone(&provider);
                        let selector = Arc::clone(&selector);
                        let cancel = cancel.clone();
                        async move {
                            process_repository(provider.as_ref(), repo, &period, &selector, &cancel)
                                .await
                        }
                    });
                    let result = match task.await {
                        Ok(result) => result,
                        Err(e) => {
                            error!("Processing {full_name} failed unexpectedly: {e}");
                            Err(Error::Panicked(e.to_string()))
                        }
                    };
                    // the receivers live until every sender is dropped, so sends cannot fail
                    let _ = match result {
                        Ok(repo) => success_send.send(repo).await.map_err(|_| ()),
                        Err(error) => failure_send
                            .send(RepositoryFailure { full_name, error })
                            .await
                            .map_err(|_| ()),
                    };
                }
                debug!("Worker {worker_id} finished");
            })
        })
        .collect();

    // Only the workers hold senders now; both channels close once every worker is done.
    drop(success_send);
    drop(failure_send);

    let mut outcome = FetchOutcome::default();
    let mut successes_open = true;
    let mut failures_open = true;
    while successes_open || failures_open {
        tokio::select! {
            repo = success_recv.recv(), if successes_open => match repo {
                Some(repo) => {
                    outcome.repositories.push(repo);
                    if let Some(progress) = progress.as_mut() {
                        progress.inc(1);
                    }
                }
                None => successes_open = false,
            },
            failure = failure_recv.recv(), if failures_open => match failure {
                Some(failure) => {
                    outcome.failures.push(failure);
                    if let Some(progress) = progress.as_mut() {
                        progress.inc(1);
                    }
                }
                None => failures_open = false,
            },
        }
    }

    for worker in workers {
        if let Err(e) = worker.await {
            error!("Repository worker failed: {e}");
        }
    }

    outcome
}
