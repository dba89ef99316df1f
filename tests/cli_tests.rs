//! End-to-end tests of the command-line binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn optimizer(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("resume-optimizer").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(config_dir.join("config.toml"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    optimizer(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn test_templates_command() {
    let dir = tempfile::tempdir().unwrap();
    optimizer(dir.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Modern ATS (ats_modern)"))
        .stdout(predicate::str::contains("tech_focused"))
        .stdout(predicate::str::contains("classic_professional"));
}

#[test]
fn test_facts_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = optimizer(dir.path())
        .args(["facts", "--input", "tests/fixtures/sample_resume.txt", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let facts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let skills = facts["technical_skills"].as_array().unwrap();
    assert!(skills.iter().any(|s| s == "python"));
    assert_eq!(facts["experience_years"], 5);
    assert!(facts["job_profile"].is_null());
}

#[test]
fn test_facts_for_job_description() {
    let dir = tempfile::tempdir().unwrap();
    optimizer(dir.path())
        .args(["facts", "--input", "tests/fixtures/sample_job.txt", "--kind", "job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job Profile"))
        .stdout(predicate::str::contains("kubernetes"));
}

#[test]
fn test_too_short_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    optimizer(dir.path())
        .args(["facts", "--input", "tests/fixtures/short.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too short"))
        .stderr(predicate::str::contains("50"));
}

#[test]
fn test_analyze_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = optimizer(dir.path())
        .args([
            "analyze",
            "--resume",
            "tests/fixtures/sample_resume.txt",
            "--job",
            "tests/fixtures/sample_job.txt",
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["match_result"]["overall_score"].as_f64().unwrap() > 0.0);
    assert!(report["suggestions"].as_array().unwrap().len() <= 10);
}

#[test]
fn test_config_set_and_path() {
    let dir = tempfile::tempdir().unwrap();
    optimizer(dir.path())
        .args(["config", "set", "output.template", "tech_focused"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("template = \"tech_focused\""));

    optimizer(dir.path())
        .args(["config", "set", "output.template", "fancy"])
        .assert()
        .failure();

    optimizer(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
