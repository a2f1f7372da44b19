use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

// -------------------------------------------------------------------------------------------------
// Repository
// -------------------------------------------------------------------------------------------------
/// A repository belonging to the analyzed target.
///
/// Repositories are created from provider data with an empty branch list; the repository
/// processor attaches the branches it fetched exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Short name, e.g., `Hello-World`
    pub name: String,

    /// Fully-qualified name, e.g., `octocat/Hello-World`
    pub full_name: String,

    /// Canonical web URL
    pub url: String,

    pub default_branch: String,

    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Repository {
    pub fn new<S: Into<String>>(name: S, full_name: S, url: S, default_branch: S) -> Self {
        Repository {
            name: name.into(),
            full_name: full_name.into(),
            url: url.into(),
            default_branch: default_branch.into(),
            branches: Vec::new(),
        }
    }

    /// Split the fully-qualified name into `(owner, name)`.
    ///
    /// The name must contain exactly one `/` separator with non-empty parts on both sides.
    pub fn owner_and_name(&self) -> Result<(&str, &str)> {
        let mut parts = self.full_name.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok((owner, name))
            }
            _ => Err(Error::MalformedIdentity(self.full_name.clone())),
        }
    }

    /// Iterate over every commit of every branch.
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.branches.iter().flat_map(|b| b.commits.iter())
    }
}

// -------------------------------------------------------------------------------------------------
// Branch
// -------------------------------------------------------------------------------------------------
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,

    /// Hash of the head commit
    pub sha: String,

    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl Branch {
    pub fn new<S: Into<String>>(name: S, sha: S) -> Self {
        Branch {
            name: name.into(),
            sha: sha.into(),
            commits: Vec::new(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Commit
// -------------------------------------------------------------------------------------------------
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author: Author,
    pub date: DateTime<Utc>,
    pub stats: CommitStats,
}

// -------------------------------------------------------------------------------------------------
// Author
// -------------------------------------------------------------------------------------------------
/// The author recorded on a commit.
///
/// Different commits by the same person may carry different combinations of these fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,

    /// Platform account name, if the commit is linked to one
    #[serde(default)]
    pub login: Option<String>,
}

impl Author {
    /// The identity under which this author's commits are counted.
    ///
    /// This is the login if non-empty, else the email if non-empty, else the display name.
    pub fn key(&self) -> &str {
        match self.login.as_deref() {
            Some(login) if !login.is_empty() => login,
            _ if !self.email.is_empty() => &self.email,
            _ => &self.name,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// CommitStats
// -------------------------------------------------------------------------------------------------
/// Line change counts for a single commit.
///
/// `total` always equals `additions + deletions`; the fields are private so that the only way to
/// build a value is through `CommitStats::new`, which computes it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CommitStats {
    additions: u64,
    deletions: u64,
    total: u64,
}

impl CommitStats {
    pub fn new(additions: u64, deletions: u64) -> Self {
        CommitStats {
            additions,
            deletions,
            total: additions + deletions,
        }
    }

    #[inline]
    pub fn additions(&self) -> u64 {
        self.additions
    }

    #[inline]
    pub fn deletions(&self) -> u64 {
        self.deletions
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Any serialized `total` is ignored and recomputed.
impl<'de> Deserialize<'de> for CommitStats {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            additions: u64,
            deletions: u64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(CommitStats::new(raw.additions, raw.deletions))
    }
}

// -------------------------------------------------------------------------------------------------
// RepositoryStats
// -------------------------------------------------------------------------------------------------
/// One contributor's activity within one repository.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl RepositoryStats {
    fn record(&mut self, stats: &CommitStats) {
        self.commits += 1;
        self.additions += stats.additions();
        self.deletions += stats.deletions();
    }

    /// Number of changed lines, used for ranking.
    pub fn changed_lines(&self) -> u64 {
        self.additions + self.deletions
    }
}

// -------------------------------------------------------------------------------------------------
// ContributorStats
// -------------------------------------------------------------------------------------------------
/// Running totals for one author identity, broken down by repository full name.
///
/// The totals always equal the sums over `repositories`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    pub name: String,
    pub email: String,
    pub login: Option<String>,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub repositories: BTreeMap<String, RepositoryStats>,
}

impl ContributorStats {
    /// Create an empty entry seeded with the given author's fields.
    pub fn new(author: &Author) -> Self {
        ContributorStats {
            name: author.name.clone(),
            email: author.email.clone(),
            login: author.login.clone(),
            total_commits: 0,
            total_additions: 0,
            total_deletions: 0,
            repositories: BTreeMap::new(),
        }
    }

    /// Count one commit made in the repository with the given full name.
    pub fn record(&mut self, repo_full_name: &str, stats: &CommitStats) {
        self.total_commits += 1;
        self.total_additions += stats.additions();
        self.total_deletions += stats.deletions();

        // avoid allocating a key for repositories that have already been seen
        match self.repositories.get_mut(repo_full_name) {
            Some(repo_stats) => repo_stats.record(stats),
            None => {
                let mut repo_stats = RepositoryStats::default();
                repo_stats.record(stats);
                self.repositories.insert(repo_full_name.to_owned(), repo_stats);
            }
        }
    }

    /// Number of changed lines, used for ranking.
    pub fn changed_lines(&self) -> u64 {
        self.total_additions + self.total_deletions
    }
}

// -------------------------------------------------------------------------------------------------
// Period
// -------------------------------------------------------------------------------------------------
/// The inclusive `[since, until]` window used to filter commits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl Period {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self> {
        if since > until {
            return Err(Error::InvalidPeriod { since, until });
        }
        Ok(Period { since, until })
    }
}

// -------------------------------------------------------------------------------------------------
// Report
// -------------------------------------------------------------------------------------------------
/// Summary of contributors, keyed by author identity.
pub type Summary = BTreeMap<String, ContributorStats>;

/// The finished result of a run, handed to output serializers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub target: String,
    pub period: Period,
    pub repositories: Vec<Repository>,
    pub summary: Summary,
}
