use super::*;

#[test]
fn help() {
    ghactivity_success!("--help")
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("repos"));
}

#[test]
fn report_help() {
    ghactivity_success!("report", "--help")
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("--all-branches"))
        .stdout(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn version() {
    ghactivity_success!("--version").stdout(predicate::str::starts_with("ghactivity"));
}

#[test]
fn no_args() {
    ghactivity_failure!().code(2).stdout(is_empty());
}
