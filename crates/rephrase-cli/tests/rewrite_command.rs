mod common;

use common::rephrase;
use predicates::prelude::*;


#[test]
fn test_help_lists_commands() {
    rephrase()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("paraphrase"))
        .stdout(predicate::str::contains("humanize"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("chunk"))
        .stdout(predicate::str::contains("Generate shell completion"));
}

#[test]
fn test_paraphrase_help_shows_browser_options() {
    rephrase()
        .args(["paraphrase", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("CHROME_PATH"))
        .stdout(predicate::str::contains("--user-data-dir"))
        .stdout(predicate::str::contains("--word-limit"))
        .stdout(predicate::str::contains("--allow-empty"));
}

#[test]
fn test_paraphrase_blank_text_fails_before_launch() {
    rephrase()
        .args(["paraphrase", "  ", "--chrome-path", "/nonexistent/chrome"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text provided"))
        .stderr(predicate::str::contains("Failed to launch").not());
}

#[test]
fn test_humanize_without_input_fails() {
    rephrase()
        .arg("humanize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text provided"));
}

#[test]
fn test_humanize_rejects_unknown_mode() {
    rephrase()
        .args(["humanize", "--mode", "expert", "Some text."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'expert'"));
}

#[test]
fn test_text_and_input_file_conflict() {
    rephrase()
        .args(["paraphrase", "Some text.", "--input", "file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    rephrase()
        .args(["paraphrase", "Some text.", "--base-url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme 'ftp'"));
}

#[test]
fn test_missing_chrome_reports_launch_failure() {
    rephrase()
        .args([
            "--format",
            "json",
            "paraphrase",
            "Some text to rewrite.",
            "--chrome-path",
            "/nonexistent/chrome",
            "--no-profile",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""success": false"#))
        .stdout(predicate::str::contains("Failed to launch browser"))
        .stderr(predicate::str::contains("paraphrase failed"));
}
