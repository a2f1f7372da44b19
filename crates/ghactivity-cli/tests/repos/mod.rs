//! Tests for the `repos` command

use super::*;

#[test]
fn repos_list_noargs() {
    ghactivity_failure!("repos", "list")
        .code(2)
        .stderr(predicate::str::contains("--target"));
}

#[test]
fn repos_list_jsonl_format() {
    let github = MockGitHub::new();
    ghactivity_success!(
        "repos",
        "list",
        "--target=acme",
        "--format=jsonl",
        format!("--github-api-url={}", github.url())
    )
    .stdout(concat!(
        r#"{"full_name":"acme/widgets","default_branch":"main","url":"https://github.com/acme/widgets"}"#,
        "\n"
    ))
    .stderr(is_empty());
}

#[test]
fn repos_list_human_format() {
    let github = MockGitHub::new();
    ghactivity_success!(
        "repos",
        "list",
        "--target=acme",
        format!("--github-api-url={}", github.url())
    )
    .stdout(predicate::str::contains("Default Branch"))
    .stdout(predicate::str::contains("https://github.com/acme/widgets"))
    .stdout(predicate::str::contains("attic").not());
}
