//! Tests for the `report` command

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn missing_target() {
    ghactivity_failure!("report")
        .code(2)
        .stderr(predicate::str::contains("--target"));
}

#[test]
fn unsupported_format() {
    ghactivity_failure!("report", "--target=acme", "--format=xml")
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn malformed_date() {
    ghactivity_failure!("report", "--target=acme", "--since=January")
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn conflicting_branch_options() {
    ghactivity_failure!("report", "--target=acme", "--all-branches", "--branch=main").code(2);
}

#[test]
fn inverted_time_window() {
    // rejected before any request is made
    ghactivity_failure!(
        "report",
        "--target=acme",
        "--since=2024-02-01",
        "--until=2024-01-01",
        "--github-api-url=http://127.0.0.1:9"
    )
    .code(2)
    .stdout(is_empty())
    .stderr(predicate::str::contains("Invalid time window"));
}

#[test]
fn text_report() {
    let github = MockGitHub::new();
    let mut cmd = github.report_cmd();
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "GitHub Activity Report for: acme\n\
             Period: 2024-01-01 to 2024-01-31\n\
             Repositories analyzed: 1\n",
        ))
        .stdout(predicate::str::contains(
            "John Doe (@johndoe)\n  \
               Email: john@example.com\n  \
               Total Commits: 1\n  \
               Total Additions: 10\n  \
               Total Deletions: 5\n  \
               Repositories: 1\n  \
               Top Repositories:\n    \
               - acme/widgets: 1 commit (+10/-5)\n",
        ))
        .stdout(predicate::str::contains("Anon Ymous\n  Email: anon@example.com\n"))
        .stdout(predicate::str::contains("attic").not());
}

#[test]
fn text_report_ranks_by_changed_lines() {
    let github = MockGitHub::new();
    let output = github.report_cmd().output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let john = stdout.find("John Doe").unwrap();
    let anon = stdout.find("Anon Ymous").unwrap();
    assert!(john < anon, "{stdout}");
}

#[test]
fn json_report() {
    let github = MockGitHub::new();
    let output = github.report_cmd().arg("--format=json").output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["target"], "acme");
    assert_eq!(report["period"]["since"], "2024-01-01T00:00:00Z");
    assert_eq!(report["period"]["until"], "2024-01-31T23:59:59Z");
    assert_eq!(report["repositories"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["repositories"][0]["full_name"], "acme/widgets");

    let john = &report["summary"]["johndoe"];
    assert_eq!(john["total_commits"], 1);
    assert_eq!(john["total_additions"], 10);
    assert_eq!(john["total_deletions"], 5);
    assert_eq!(john["repositories"]["acme/widgets"]["commits"], 1);

    // no GitHub account, so keyed by email
    assert_eq!(report["summary"]["anon@example.com"]["name"], "Anon Ymous");
}

#[test]
fn csv_report() {
    let github = MockGitHub::new();
    github
        .report_cmd()
        .arg("--format=csv")
        .assert()
        .success()
        .stdout(
            "Author,Login,Email,Repository,Commits,Additions,Deletions\n\
             John Doe,johndoe,john@example.com,acme/widgets,1,10,5\n\
             Anon Ymous,,anon@example.com,acme/widgets,1,3,1\n",
        );
}

#[test]
fn report_to_file() {
    let github = MockGitHub::new();
    let dir = std::env::temp_dir().join(format!("ghactivity-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("report.json");

    github
        .report_cmd()
        .args(["--format=json", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(is_empty());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report["target"], "acme");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unknown_target() {
    let mut server = Server::new();
    let _rate_limit = server
        .mock("GET", "/rate_limit")
        .with_header("content-type", "application/json")
        .with_body(r#"{"rate": {"limit": 60, "remaining": 59, "reset": 1700000000, "used": 1}}"#)
        .create();
    let _org = server
        .mock("GET", "/orgs/nobody/repos")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();
    let _user = server
        .mock("GET", "/users/nobody/repos")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    ghactivity_failure!(
        "report",
        "--target=nobody",
        format!("--github-api-url={}", server.url())
    )
    .code(2)
    .stdout(is_empty())
    .stderr(predicate::str::contains("Failed to generate report for nobody"));
}

#[test]
fn failed_run_keeps_existing_output() {
    let mut server = Server::new();
    let _rate_limit = server
        .mock("GET", "/rate_limit")
        .with_header("content-type", "application/json")
        .with_body(r#"{"rate": {"limit": 60, "remaining": 59, "reset": 1700000000, "used": 1}}"#)
        .create();
    let _listing = server
        .mock("GET", Matcher::Regex(r"^/(orgs|users)/nobody/repos".into()))
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    let dir = std::env::temp_dir().join(format!("ghactivity-test-keep-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("report.txt");
    std::fs::write(&path, "last week's report\n").unwrap();

    ghactivity!(
        "report",
        "--target=nobody",
        format!("--github-api-url={}", server.url())
    )
    .arg("--output")
    .arg(&path)
    .assert()
    .failure()
    .code(2);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "last week's report\n");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rate_limited_without_token() {
    let mut server = Server::new();
    let _rate_limit = server
        .mock("GET", "/rate_limit")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_header("x-ratelimit-remaining", "0")
        .with_header("x-ratelimit-reset", "1700000000")
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create();

    ghactivity_failure!(
        "report",
        "--target=acme",
        format!("--github-api-url={}", server.url())
    )
    .code(2)
    .stderr(predicate::str::contains("Failed to connect to the GitHub API"))
    .stderr(predicate::str::contains("GITHUB_TOKEN"));
}
