// wordwarden/tests/cli_integration_tests.rs
//! Command-line integration tests for the `wordwarden` executable.
//!
//! These tests invoke the real binary with `assert_cmd`, feed it input over
//! stdin or arguments, and assert on its stdout/stderr and on the rule files
//! it writes. `tempfile` keeps every test's configuration directory
//! isolated, so tests can run in parallel and leave no artifacts behind.

use anyhow::Result;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

use assert_cmd::Command;

/// Helper to run the `wordwarden` binary with the given stdin input and
/// arguments, returning the assertion handle.
fn run_wordwarden(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("wordwarden").unwrap();
    cmd.env("RUST_LOG", "debug");
    cmd.env_remove("WORDWARDEN_CONFIG_DIR");
    cmd.args(args);
    cmd.write_stdin(input);
    cmd.assert()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

#[test]
fn test_filter_with_rules_file() -> Result<()> {
    let mut rules_file = NamedTempFile::new()?;
    rules_file.write_all(br#"{"heck": ["hell"], "friend": ["foe"]}"#)?;
    let rules_path = rules_file.path().to_str().unwrap();

    let assert = run_wordwarden(
        "What the hell! That foe again.",
        &["filter", "--rules", rules_path],
    )
    .success();
    assert_eq!(stdout_of(&assert), "What the heck! That friend again.\n");
    Ok(())
}

#[test]
fn test_filter_catches_evasions() -> Result<()> {
    let mut rules_file = NamedTempFile::new()?;
    rules_file.write_all(br#"{"sneaker": ["shoe"]}"#)?;
    let rules_path = rules_file.path().to_str().unwrap();

    let assert =
        run_wordwarden("sh0es everywhere", &["filter", "--rules", rules_path]).success();
    assert_eq!(stdout_of(&assert), "sneakers everywhere\n");

    let assert = run_wordwarden("a s h o e appeared", &["filter", "--rules", rules_path]).success();
    assert_eq!(stdout_of(&assert), "a sneaker appeared\n");
    Ok(())
}

#[test]
fn test_filter_emits_match_diagnostics() -> Result<()> {
    let mut rules_file = NamedTempFile::new()?;
    rules_file.write_all(br#"{"heck": ["hell"]}"#)?;
    let rules_path = rules_file.path().to_str().unwrap();

    let assert = run_wordwarden("", &["filter", "hell", "--rules", rules_path, "--matches"])
        .success();
    let stdout = stdout_of(&assert);
    assert!(stdout.starts_with("heck\n"), "unexpected stdout:\n{stdout}");
    assert!(stdout.contains("\"term\": \"hell\""));
    assert!(stdout.contains("\"kind\": \"exact\""));
    assert!(stdout.contains("\"replacement\": \"heck\""));
    Ok(())
}

#[test]
fn test_filter_uses_community_rule_file() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("7.json"), r#"{"heck": ["hell"]}"#)?;

    let assert = run_wordwarden(
        "",
        &[
            "filter",
            "hell yes",
            "--community",
            "7",
            "--config-dir",
            dir.path().to_str().unwrap(),
        ],
    )
    .success();
    assert_eq!(stdout_of(&assert), "heck yes\n");
    Ok(())
}

#[test]
fn test_filter_without_rules_passes_text_through() -> Result<()> {
    let dir = tempdir()?;
    let assert = run_wordwarden(
        "",
        &["filter", "hello world", "--config-dir", dir.path().to_str().unwrap()],
    )
    .success();
    assert_eq!(stdout_of(&assert), "hello world\n");
    Ok(())
}

#[test]
fn test_rules_add_list_filter_cycle() -> Result<()> {
    let dir = tempdir()?;
    let dir_arg = dir.path().to_str().unwrap();

    run_wordwarden("", &["rules", "add", "friend", "foe", "enemy", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("Banned 2 word(s) under replacement 'friend'."));

    // The file is written in the canonical detailed shape.
    let saved = fs::read_to_string(dir.path().join("0.json"))?;
    assert!(saved.contains("\"words\""), "saved file:\n{saved}");
    assert!(saved.contains("\"whitelist\""), "saved file:\n{saved}");

    run_wordwarden("", &["rules", "list", "--config-dir", dir_arg])
        .success()
        .stdout(
            predicate::str::contains("Replacement")
                .and(predicate::str::contains("friend"))
                .and(predicate::str::contains("foe, enemy")),
        );

    let assert = run_wordwarden("", &["filter", "my foe", "--config-dir", dir_arg]).success();
    assert_eq!(stdout_of(&assert), "my friend\n");
    Ok(())
}

#[test]
fn test_rules_add_is_idempotent_per_word() -> Result<()> {
    let dir = tempdir()?;
    let dir_arg = dir.path().to_str().unwrap();

    run_wordwarden("", &["rules", "add", "heck", "hell", "--config-dir", dir_arg]).success();
    run_wordwarden("", &["rules", "add", "heck", "hell", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("Nothing to add"));
    Ok(())
}

#[test]
fn test_rules_list_with_no_rules() -> Result<()> {
    let dir = tempdir()?;
    run_wordwarden("", &["rules", "list", "--config-dir", dir.path().to_str().unwrap()])
        .success()
        .stdout(predicate::str::contains("No rules configured for community 0."));
    Ok(())
}

#[test]
fn test_rules_remove_word() -> Result<()> {
    let dir = tempdir()?;
    let dir_arg = dir.path().to_str().unwrap();

    run_wordwarden("", &["rules", "add", "heck", "hell", "--config-dir", dir_arg]).success();
    run_wordwarden("", &["rules", "remove", "hell", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("Unbanned 'hell'."));

    // The rule lost its last word, so the whole rule is gone.
    run_wordwarden("", &["rules", "list", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("No rules configured"));

    // Removing it again is an error.
    run_wordwarden("", &["rules", "remove", "hell", "--config-dir", dir_arg])
        .failure()
        .stderr(predicate::str::contains("not a banned word"));
    Ok(())
}

#[test]
fn test_rules_remove_whole_rule() -> Result<()> {
    let dir = tempdir()?;
    let dir_arg = dir.path().to_str().unwrap();

    run_wordwarden("", &["rules", "add", "friend", "foe", "enemy", "--config-dir", dir_arg])
        .success();
    run_wordwarden("", &["rules", "remove", "--rule", "friend", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("Removed the rule for replacement 'friend'."));
    run_wordwarden("", &["rules", "remove", "--rule", "friend", "--config-dir", dir_arg])
        .failure()
        .stderr(predicate::str::contains("No rule uses replacement 'friend'"));
    Ok(())
}

#[test]
fn test_exemptions_round_trip_through_the_store() -> Result<()> {
    let dir = tempdir()?;
    let dir_arg = dir.path().to_str().unwrap();

    run_wordwarden("", &["rules", "add", "bar", "ham", "--config-dir", dir_arg]).success();
    run_wordwarden("", &["rules", "exempt", "bar", "Hamlet", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("Added exemption 'Hamlet' to 'bar'."));

    let assert = run_wordwarden("", &["filter", "I love Hamlet", "--config-dir", dir_arg]).success();
    assert_eq!(stdout_of(&assert), "I love Hamlet\n");

    let assert = run_wordwarden("", &["filter", "ham sandwich", "--config-dir", dir_arg]).success();
    assert_eq!(stdout_of(&assert), "bar sandwich\n");

    run_wordwarden("", &["rules", "exempt", "bar", "Hamlet", "--remove", "--config-dir", dir_arg])
        .success()
        .stdout(predicate::str::contains("Removed exemption 'Hamlet' from 'bar'."));
    Ok(())
}

#[test]
fn test_exempt_requires_an_existing_rule() -> Result<()> {
    let dir = tempdir()?;
    run_wordwarden(
        "",
        &["rules", "exempt", "nope", "phrase", "--config-dir", dir.path().to_str().unwrap()],
    )
    .failure()
    .stderr(predicate::str::contains("No rule uses replacement 'nope'"));
    Ok(())
}

#[test]
fn test_malformed_rule_file_is_reported() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("0.json"), "{ this is not json")?;

    run_wordwarden(
        "",
        &["rules", "list", "--config-dir", dir.path().to_str().unwrap()],
    )
    .failure()
    .stderr(predicate::str::contains("Failed to parse rule file"));
    Ok(())
}
