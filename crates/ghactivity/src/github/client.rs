use chrono::{DateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use secrecy::ExposeSecret;
use tracing::{debug, trace};

use super::models::{Branch, CommitDetail, CommitSummary, Page, RateLimitOverview, Repository};
use super::{Auth, ClientBuilder, Error, Result};

// -------------------------------------------------------------------------------------------------
// Client
// -------------------------------------------------------------------------------------------------
pub struct Client {
    pub(super) base_url: Url,
    pub(super) inner: reqwest::Client,
    pub(super) auth: Auth,
}

const MAX_PER_PAGE: (&str, &str) = ("per_page", "100");

impl Client {
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    pub fn is_authenticated(&self) -> bool {
        match self.auth {
            Auth::Unauthenticated => false,
            Auth::PersonalAccessToken(_) => true,
        }
    }

    pub async fn get_rate_limit(&self) -> Result<RateLimitOverview> {
        let response = self.get(&["rate_limit"]).await?;
        let body = response.json().await?;
        Ok(body)
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Page<Repository>> {
        self.get_paginated_with_params(&["users", username, "repos"], &[MAX_PER_PAGE])
            .await
    }

    pub async fn get_org_repos(&self, orgname: &str) -> Result<Page<Repository>> {
        self.get_paginated_with_params(&["orgs", orgname, "repos"], &[MAX_PER_PAGE])
            .await
    }

    pub async fn get_repo_branches(&self, owner: &str, repo: &str) -> Result<Page<Branch>> {
        self.get_paginated_with_params(&["repos", owner, repo, "branches"], &[MAX_PER_PAGE])
            .await
    }

    /// Get the first page of commits reachable from `branch` with an author date in
    /// `[since, until]`.
    pub async fn get_repo_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Page<CommitSummary>> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let until = until.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.get_paginated_with_params(
            &["repos", owner, repo, "commits"],
            &[("sha", branch), ("since", since.as_str()), ("until", until.as_str()), MAX_PER_PAGE],
        )
        .await
    }

    /// Get a single commit, including its change statistics.
    pub async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitDetail> {
        let response = self.get(&["repos", owner, repo, "commits", sha]).await?;
        let body = response.json().await?;
        Ok(body)
    }

    pub async fn next_page<T>(&self, page: Page<T>) -> Result<Option<Page<T>>>
    where
        T: serde::de::DeserializeOwned,
    {
        self.next_page_inner(page.links.next).await
    }

    async fn next_page_inner<T>(&self, next: Option<Url>) -> Result<Option<Page<T>>>
    where
        T: serde::de::DeserializeOwned,
    {
        match next {
            Some(next) => {
                let response = self.get_url(next).await?;
                Ok(Some(Page::from_response(response).await?))
            }
            None => Ok(None),
        }
    }

    pub async fn get_all<T>(&self, page: Page<T>) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut results = Vec::new();
        let mut next_page = Some(page);
        while let Some(page) = next_page {
            results.extend(page.items.into_iter());
            next_page = self.next_page_inner(page.links.next).await?;
        }
        Ok(results)
    }
}

/// Create a URL from the given base, path parts, and parameters.
///
/// The path parts should not contain slashes.
fn url_from_path_parts_and_params(
    base_url: Url,
    path_parts: &[&str],
    params: &[(&str, &str)],
) -> Result<Url> {
    if base_url.cannot_be_a_base() {
        return Err(Error::UrlBaseError(base_url));
    }

    let mut buf = base_url.path().to_string();
    if !buf.ends_with('/') {
        buf.push('/');
    }

    for (i, p) in path_parts.iter().enumerate() {
        if p.contains('/') {
            return Err(Error::UrlSlashError(p.to_string()));
        }
        if i > 0 {
            // no leading slash on the first part, or it would be joined as an absolute path
            buf.push('/');
        }
        buf.push_str(p);
    }
    let url = base_url.join(&buf)?;
    let url = if params.is_empty() {
        Url::parse(url.as_str())
    } else {
        Url::parse_with_params(url.as_str(), params)
    }?;
    Ok(url)
}

/// Determine whether a 403 response means the request was rate-limited, and if so, how long to
/// wait before retrying.
///
/// GitHub signals rate limiting with a 403 rather than a 429. Secondary rate limits carry a
/// `Retry-After` header with the number of seconds to wait. Primary rate limits have
/// `x-ratelimit-remaining: 0`, and `x-ratelimit-reset` holds the epoch second at which the window
/// resets.
///
/// Returns `None` if the headers do not indicate rate limiting, and `Some(None)` if they do but
/// the wait cannot be determined.
fn rate_limit_wait(headers: &HeaderMap) -> Option<Option<TimeDelta>> {
    if let Some(retry_after) = headers.get(header::RETRY_AFTER) {
        return Some(atoi::atoi::<i64>(retry_after.as_bytes()).and_then(TimeDelta::try_seconds));
    }

    let remaining = headers.get("x-ratelimit-remaining").map(HeaderValue::as_bytes);
    if remaining != Some(&b"0"[..]) {
        return None;
    }

    let wait = || -> Option<TimeDelta> {
        let date = header_str(headers, "date")?;
        let date = DateTime::parse_from_rfc2822(date).ok()?.with_timezone(&Utc);
        let reset = header_str(headers, "x-ratelimit-reset")?.parse::<i64>().ok()?;
        let reset = Utc.timestamp_opt(reset, 0).single()?;
        Some(reset - date)
    };
    Some(wait())
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name)?.to_str().ok()
}


// private implementation
impl Client {
    /// Construct a `Url` from the given path parts and query parameters.
    fn make_url(&self, path_parts: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        url_from_path_parts_and_params(self.base_url.clone(), path_parts, params)
    }

    async fn get(&self, path_parts: &[&str]) -> Result<reqwest::Response> {
        self.get_with_params(path_parts, &[]).await
    }

    async fn get_with_params(
        &self,
        path_parts: &[&str],
        params: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = self.make_url(path_parts, params)?;
        self.get_url(url).await
    }

    async fn get_paginated_with_params<T>(
        &self,
        path_parts: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Page<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.get_with_params(path_parts, params).await?;
        Page::from_response(response).await
    }

    async fn get_url(&self, url: Url) -> Result<reqwest::Response> {
        debug!("GET {url}");

        // build request, handling authentication if any
        let request_builder = self
            .inner
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        let request_builder = match &self.auth {
            Auth::PersonalAccessToken(token) => request_builder.bearer_auth(token.expose_secret()),
            Auth::Unauthenticated => request_builder,
        };

        // send request and wait for response
        let response = request_builder.send().await?;
        trace!("{} {}", response.status(), response.url());

        if response.status() == StatusCode::FORBIDDEN {
            if let Some(wait) = rate_limit_wait(response.headers()) {
                let client_error = response.json().await?;
                return Err(Error::RateLimited { client_error, wait });
            }
        }

        let response = response.error_for_status()?;
        Ok(response)
    }
}
