//! End-to-end pipeline tests against the real binary.
//!
//! The introspector and analyzer are stub shell scripts, so these tests
//! exercise the full process boundary without touching any registry.
#![cfg(unix)]
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

struct Fixture {
    temp: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn catalog(&self, entry: &str, content: &str) {
        fs::write(self.temp.path().join(format!("{}.yaml", entry)), content).unwrap();
    }

    fn script(&self, name: &str, body: &str) -> String {
        let path = self.temp.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn command(&self, introspector: &str) -> Command {
        let mut cmd = Command::new(cargo_bin("mcpdiff"));
        cmd.args(["node", "pkg", "1.0.0", "1.1.0", "pkg"]);
        cmd.arg("--catalog-dir").arg(self.temp.path());
        cmd.args(["--introspector", introspector]);
        cmd.arg("--quiet");
        cmd.env_remove("GITHUB_OUTPUT");
        cmd.env_remove("MCPDIFF_ANALYZER");
        cmd.env_remove("MCPDIFF_INTROSPECTOR");
        cmd.env_remove("MCPDIFF_CATALOG_DIR");
        cmd
    }
}

/// Introspector that answers differently per version, like a real registry.
const VERSIONED_LISTING: &str = r#"case "$*" in
  *1.0.0*) echo '{"tools": [{"name": "a"}, {"name": "b"}]}' ;;
  *) echo '{"tools": [{"name": "b"}, {"name": "c"}]}' ;;
esac"#;

const STABLE_LISTING: &str = r#"echo '{"tools": [{"name": "a"}, {"name": "b"}]}'"#;

#[test]
fn full_run_produces_fallback_comparison() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", VERSIONED_LISTING);

    fixture
        .command(&introspector)
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP Tools Comparison: 1.0.0 → 1.1.0"))
        .stdout(predicate::str::contains("- `c`"))
        .stdout(predicate::str::contains("- `a`"))
        .stdout(predicate::str::contains("net change: 0"))
        .stdout(predicate::str::contains("Structured analysis was unavailable"));
}

#[test]
fn identical_versions_report_no_changes() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", STABLE_LISTING);

    fixture
        .command(&introspector)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tool changes detected."));
}

#[test]
fn missing_credentials_skip_validation_with_exit_zero() {
    let fixture = Fixture::new();
    fixture.catalog(
        "pkg",
        "env:\n  - key: MCPDIFF_TEST_TOKEN_8Q1\n    required: true\n",
    );
    let introspector = fixture.script("introspector", STABLE_LISTING);

    fixture
        .command(&introspector)
        .env_remove("MCPDIFF_TEST_TOKEN_8Q1")
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP Tool Validation Skipped"))
        .stdout(predicate::str::contains("`MCPDIFF_TEST_TOKEN_8Q1`"));
}

#[test]
fn introspection_failure_reports_without_tool_data() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", "echo 'boom' >&2; exit 1");

    fixture
        .command(&introspector)
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP Tool Validation Failed"))
        .stdout(predicate::str::contains("no comparison was performed"))
        .stdout(predicate::str::contains("tools in").not());
}

#[test]
fn analyzer_output_is_emitted_verbatim() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", VERSIONED_LISTING);
    let analyzer = fixture.script("analyzer", "echo '## Deep Analysis'; echo 'All good.'");

    fixture
        .command(&introspector)
        .args(["--analyzer", &analyzer])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Deep Analysis"))
        .stdout(predicate::str::contains("All good."))
        .stdout(predicate::str::contains("Structured analysis was unavailable").not());
}

#[test]
fn failing_analyzer_falls_back_to_diff() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", VERSIONED_LISTING);
    let analyzer = fixture.script("analyzer", "exit 3");

    fixture
        .command(&introspector)
        .args(["--analyzer", &analyzer])
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP Tools Comparison"))
        .stdout(predicate::str::contains("Structured analysis was unavailable"));
}

#[test]
fn report_is_appended_to_the_output_channel() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", STABLE_LISTING);
    let output_path = fixture.temp.path().join("github_output");

    fixture
        .command(&introspector)
        .env("GITHUB_OUTPUT", &output_path)
        .assert()
        .success();

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.starts_with("report<<"));
    assert!(content.contains("No tool changes detected."));
    assert!(content.ends_with("success=true\n"));
}

#[test]
fn hung_introspector_is_killed_and_reported() {
    let fixture = Fixture::new();
    let introspector = fixture.script("introspector", "sleep 30");

    fixture
        .command(&introspector)
        .args(["--timeout", "1"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP Tool Validation Failed"))
        .stdout(predicate::str::contains("timed out after 1s"));
}
