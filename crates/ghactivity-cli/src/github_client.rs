use anyhow::{Context, Result};
use tracing::{debug, warn};

use ghactivity::github::{self, Client, ClientBuilder};

use crate::args::GitHubApiArgs;

/// Create a GitHub client according to the command-line options and the environment.
pub fn build_client(args: &GitHubApiArgs) -> Result<Client> {
    ClientBuilder::new()
        .base_url(args.github_api_url.clone())
        .context("Failed to set base URL")?
        .personal_access_token_from_env()
        .context("Failed to get GitHub access token from environment")?
        .ignore_certs(args.ignore_certs)
        .build()
        .context("Failed to initialize GitHub client")
}

pub fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to initialize async runtime")
}

/// Get the rate limit status.
///
/// This is done first thing: if there are connectivity or authentication problems, this is likely
/// to reveal them before any real work is started.
pub async fn check_connectivity(client: &Client) -> Result<()> {
    let rate_limit = client
        .get_rate_limit()
        .await
        .context("Failed to connect to the GitHub API")?;
    debug!("GitHub rate limits: {:?}", rate_limit.rate);
    Ok(())
}

/// Find the GitHub error somewhere in the given error's chain of causes, if any.
pub fn find_github_error<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> Option<&'a github::Error> {
    std::iter::successors(Some(err), |e| e.source()).find_map(|e| e.downcast_ref::<github::Error>())
}

/// If the given error was caused by rate limiting, explain what can be done about it.
///
/// Returns whether the error was caused by rate limiting.
pub fn explain_rate_limit(client: &Client, err: &(dyn std::error::Error + 'static)) -> bool {
    match find_github_error(err) {
        Some(github::Error::RateLimited { wait, .. }) => {
            let suggestion = if client.is_authenticated() {
                ""
            } else {
                "; consider supplying a GitHub personal access token through the GITHUB_TOKEN environment variable"
            };
            match wait {
                Some(wait) => warn!(
                    "Rate limit exceeded: must wait for {}s before retrying{suggestion}",
                    wait.num_seconds()
                ),
                None => warn!("Rate limit exceeded{suggestion}"),
            }
            true
        }
        _ => false,
    }
}
