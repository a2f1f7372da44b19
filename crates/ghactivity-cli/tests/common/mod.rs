//! Integration Test Utilities and Common Code

#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use mockito::{Matcher, Mock, Server, ServerGuard};
pub use predicates::prelude::*;
pub use predicates::str::{is_empty, RegexPredicate};
pub use std::process::Command;

/// Build a `Command` for the `ghactivity` binary with variadic command-line arguments.
///
/// The arguments can be anything that is allowed by `Command::arg`.
/// Progress bars and colors are disabled, and no GitHub token is taken from the environment.
#[macro_export]
macro_rules! ghactivity {
    ( $( $arg:expr ),* ) => {
        {
            let mut cmd = ghactivity_cmd();
            cmd.args(["--progress=never", "--color=never"]);
            cmd.env_remove("GITHUB_TOKEN");
            cmd.env_remove("GHACTIVITY_LOG");
            $(
                cmd.arg($arg);
            )*
            cmd
        }
    }
}

/// Build an `assert_cmd::assert::Assert` by calling `ghactivity!(args).assert().success()`.
#[macro_export]
macro_rules! ghactivity_success {
    ( $( $arg:expr ),* ) => { ghactivity!($( $arg ),*).assert().success() }
}

/// Build an `assert_cmd::assert::Assert` by calling `ghactivity!(args).assert().failure()`.
#[macro_export]
macro_rules! ghactivity_failure {
    ( $( $arg:expr ),* ) => { ghactivity!($( $arg ),*).assert().failure() }
}

/// Get the command for the ghactivity binary under test.
///
/// By default, this is the binary defined in this crate.
/// However, if the `GHACTIVITY_TEST_PROGRAM` environment variable is set, its value is used
/// instead. Its value should be an absolute path to the desired `ghactivity` program to test.
pub fn ghactivity_cmd() -> Command {
    if let Ok(program) = std::env::var("GHACTIVITY_TEST_PROGRAM") {
        Command::new(program)
    } else {
        Command::cargo_bin("ghactivity").expect("ghactivity should be executable")
    }
}

/// Create a `RegexPredicate` from the given pattern.
pub fn is_match(pat: &str) -> RegexPredicate {
    predicates::str::is_match(pat).expect("pattern should compile")
}

fn repo_json(name: &str, archived: bool) -> String {
    format!(
        r#"{{"name": "{name}", "full_name": "acme/{name}", "html_url": "https://github.com/acme/{name}",
            "fork": false, "default_branch": "main", "archived": {archived}}}"#
    )
}

/// A local stand-in for the GitHub REST API.
///
/// The `acme` organization has two repositories:
///
/// - `acme/widgets`, with two January 2024 commits on `main`: one by `johndoe` (+10/-5) and one
///   by an author without a GitHub account (+3/-1)
/// - `acme/attic`, which is archived and so never analyzed
pub struct MockGitHub {
    pub server: ServerGuard,
    mocks: Vec<Mock>,
}

impl MockGitHub {
    pub fn new() -> Self {
        let mut server = Server::new();
        let json = |m: mockito::Mock| m.with_header("content-type", "application/json");

        let mocks = vec![
            json(server.mock("GET", "/rate_limit"))
                .with_body(r#"{"rate": {"limit": 60, "remaining": 59, "reset": 1700000000, "used": 1}}"#)
                .create(),
            json(server.mock("GET", "/orgs/acme/repos"))
                .match_query(Matcher::Any)
                .with_body(format!("[{}, {}]", repo_json("widgets", false), repo_json("attic", true)))
                .create(),
            json(server.mock("GET", "/repos/acme/widgets/branches"))
                .match_query(Matcher::Any)
                .with_body(
                    r#"[{"name": "main", "commit": {"sha": "aaa"}, "protected": true},
                        {"name": "feature/x", "commit": {"sha": "bbb"}, "protected": false}]"#,
                )
                .create(),
            json(server.mock("GET", "/repos/acme/widgets/commits"))
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("sha".into(), "main".into()),
                    Matcher::UrlEncoded("since".into(), "2024-01-01T00:00:00Z".into()),
                    Matcher::UrlEncoded("until".into(), "2024-01-31T23:59:59Z".into()),
                ]))
                .with_body(
                    r#"[{"sha": "c1", "commit": {"message": "m", "author": {"name": "John Doe", "email": "john@example.com", "date": "2024-01-15T12:00:00Z"}}, "author": {"login": "johndoe", "id": 1}},
                        {"sha": "c2", "commit": {"message": "m", "author": {"name": "Anon Ymous", "email": "anon@example.com", "date": "2024-01-16T12:00:00Z"}}, "author": null}]"#,
                )
                .create(),
            json(server.mock("GET", "/repos/acme/widgets/commits/c1"))
                .match_query(Matcher::Any)
                .with_body(
                    r#"{"sha": "c1",
                        "commit": {"message": "Fix the frobnicator",
                                   "author": {"name": "John Doe", "email": "john@example.com", "date": "2024-01-15T12:00:00Z"}},
                        "author": {"login": "johndoe", "id": 1},
                        "stats": {"additions": 10, "deletions": 5, "total": 15}}"#,
                )
                .create(),
            json(server.mock("GET", "/repos/acme/widgets/commits/c2"))
                .match_query(Matcher::Any)
                .with_body(
                    r#"{"sha": "c2",
                        "commit": {"message": "Update docs",
                                   "author": {"name": "Anon Ymous", "email": "anon@example.com", "date": "2024-01-16T12:00:00Z"}},
                        "author": null,
                        "stats": {"additions": 3, "deletions": 1, "total": 4}}"#,
                )
                .create(),
        ];

        Self { server, mocks }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Build a `ghactivity report` command for the `acme` organization over January 2024.
    pub fn report_cmd(&self) -> Command {
        let mut cmd = ghactivity!(
            "report",
            "--target=acme",
            "--since=2024-01-01",
            "--until=2024-01-31",
            format!("--github-api-url={}", self.url())
        );
        cmd.arg("--jobs=2");
        cmd
    }
}
