//! Command-line smoke tests that never reach the network

use assert_cmd::Command;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("scholar-client").unwrap();
    cmd.env_remove("SEMANTIC_SCHOLAR_API_KEY")
        .env_remove("SEMANTIC_SCHOLAR_BASE_URL");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let output = cli().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in [
        "search-papers",
        "paper",
        "citations",
        "references",
        "batch",
        "search-authors",
        "author",
        "author-papers",
        "recommend",
    ] {
        assert!(stdout.contains(subcommand), "missing {subcommand}");
    }
    assert!(stdout.contains("--max-attempts"));
}

#[test]
fn test_recommend_requires_positive_ids() {
    cli().args(["recommend"]).assert().failure();
}

#[test]
fn test_max_attempts_is_bounded() {
    cli()
        .args(["paper", "abc", "--max-attempts", "21"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_base_url_fails_before_any_request() {
    let output = cli()
        .args(["paper", "abc", "--base-url", "not a url"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
