use crate::model::{Author, ContributorStats, Repository, Summary};

/// The identity under which an author's commits are counted.
///
/// See `Author::key`.
#[inline]
pub fn author_key(author: &Author) -> &str {
    author.key()
}

/// Fold every commit of every branch of every repository into per-contributor statistics.
///
/// Each commit is counted exactly once, for one contributor and one repository. The first
/// commit seen for a contributor seeds its name, email, and login. The result does not depend
/// on the order of the input except for which of a contributor's author records is used to seed
/// those fields.
pub fn aggregate<'r, I>(repositories: I) -> Summary
where
    I: IntoIterator<Item = &'r Repository>,
{
    let mut summary = Summary::new();
    for repo in repositories {
        for commit in repo.commits() {
            summary
                .entry(author_key(&commit.author).to_owned())
                .or_insert_with(|| ContributorStats::new(&commit.author))
                .record(&repo.full_name, &commit.stats);
        }
    }
    summary
}
