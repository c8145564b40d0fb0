//! Black-box tests for the termsai binary. None of these reach the network.

use assert_cmd::Command;
use predicates::prelude::*;

fn termsai() -> Command {
    let mut cmd = Command::cargo_bin("termsai").unwrap();
    for var in [
        "GROQ_API_KEY",
        "LANGSMITH_TRACING",
        "LANGSMITH_API_KEY",
        "LANGSMITH_PROJECT",
        "LANGSMITH_ENDPOINT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    // Keep a .env or termsai.yaml in the source tree out of the picture
    cmd.current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_blank_topic_is_rejected_before_any_call() {
    termsai()
        .args(["generate", "   "])
        .env("GROQ_API_KEY", "gsk_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter a query before searching.",
        ));
}

#[test]
fn test_blank_plan_topic_is_rejected() {
    termsai()
        .args(["plan", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a query"));
}

#[test]
fn test_missing_api_key_fails() {
    termsai()
        .args(["generate", "API rate limiting"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("termsai.yaml");
    std::fs::write(&config, "pipeline:\n  max_concurrency: 0\n").unwrap();

    termsai()
        .args(["generate", "API rate limiting", "--config"])
        .arg(&config)
        .env("GROQ_API_KEY", "gsk_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_concurrency"));
}

#[test]
fn test_config_schema() {
    termsai()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"provider\""))
        .stdout(predicate::str::contains("max_concurrency"));
}

#[test]
fn test_plan_schema() {
    let output = termsai()
        .args(["schema", "--plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let schema: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["sections"]["type"], "array");
    assert!(schema.get("$schema").is_none());
}

#[test]
fn test_help_lists_commands() {
    termsai()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_blank_model_override_fails() {
    termsai()
        .args(["generate", "API rate limiting", "--model", " "])
        .env("GROQ_API_KEY", "gsk_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider.model is empty"));
}
