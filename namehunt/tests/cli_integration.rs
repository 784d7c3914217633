// namehunt/tests/cli_integration.rs
//
// End-to-end tests of the binary's argument handling and configuration
// plumbing. These never reach the network: they exercise validation errors,
// help output, and the empty-input path.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn namehunt() -> Command {
    let mut cmd = Command::cargo_bin("namehunt").unwrap();
    // Keep host configuration out of the tests.
    cmd.env_remove("NH_BATCH_SIZE")
        .env_remove("NH_CONCURRENCY")
        .env_remove("NH_TIMEOUT")
        .env_remove("NH_BACKEND")
        .env_remove("NH_DOH_URL")
        .env_remove("NH_REGISTRAR_URL")
        .env_remove("NH_REGISTRAR_KEY")
        .env_remove("NH_LLM_URL")
        .env_remove("NH_LLM_MODEL")
        .env_remove("NH_LLM_KEY")
        .env_remove("NH_CATEGORIZE")
        .env("HOME", "/nonexistent-namehunt-home");
    cmd
}

#[test]
fn help_shows_all_flag_groups() {
    namehunt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--keywords"))
        .stdout(predicate::str::contains("--batch-size"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--csv"))
        .stdout(predicate::str::contains("--backend"))
        .stdout(predicate::str::contains("Domain Selection"))
        .stdout(predicate::str::contains("Domain Generation"))
        .stdout(predicate::str::contains("Output Format"));
}

#[test]
fn version_flag_prints_version() {
    namehunt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_input_sources_is_an_error() {
    namehunt()
        .assert()
        .failure()
        .stderr(predicate::str::contains("domain names"));
}

#[test]
fn conflicting_output_formats_rejected() {
    namehunt()
        .args(["example.com", "--json", "--csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple output formats"));
}

#[test]
fn out_of_range_batch_size_rejected() {
    namehunt()
        .args(["example.com", "--batch-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 100"));

    namehunt()
        .args(["example.com", "-b", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 100"));
}

#[test]
fn blank_keywords_rejected() {
    namehunt()
        .args(["--keywords", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--keywords"));
}

#[test]
fn unknown_backend_rejected() {
    namehunt()
        .args(["example.com", "--backend", "whois"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown backend"));
}

#[test]
fn registrar_backend_without_credentials_rejected() {
    // Selecting the registrar backend without an endpoint or key fails at
    // configuration time, before any probe.
    namehunt()
        .args(["example.com", "--backend", "registrar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("registrar"));
}

#[test]
fn unreadable_input_file_is_an_error() {
    namehunt()
        .args(["--file", "/nonexistent/domains.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    namehunt()
        .args(["example.com", "--config", "/nonexistent/namehunt.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn file_without_domains_checks_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "meeting notes, no names here").unwrap();

    namehunt()
        .current_dir(dir.path())
        .args(["--file", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to check."));
}

#[test]
fn invalid_timeout_string_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "nothing domain-shaped").unwrap();

    namehunt()
        .current_dir(dir.path())
        .args(["--file", path.to_str().unwrap(), "--timeout", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn unparseable_env_var_warns_when_verbose() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "nothing domain-shaped").unwrap();

    namehunt()
        .current_dir(dir.path())
        .env("NH_BATCH_SIZE", "lots")
        .args(["--file", path.to_str().unwrap(), "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring unparseable NH_BATCH_SIZE"));
}

#[test]
fn malformed_explicit_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.toml");
    fs::write(&config_path, "defaults = \"not a table\"").unwrap();

    namehunt()
        .args(["example.com", "--config", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse configuration"));
}
