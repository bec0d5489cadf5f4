use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HELPER: &str = "<?php\n\nfunction helper($value)\n{\n    return $value;\n}\n";

struct TestEnv {
    tmp: TempDir,
    report: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        fs::write(tmp.path().join("helpers.php"), HELPER).expect("write php file");

        let report = tmp.path().join("phpstan.json");
        let json = serde_json::json!({
            "files": {
                "helpers.php": {
                    "messages": [
                        { "message": "Function helper() has no return type specified.", "line": 3 },
                        { "message": "Function helper() has parameter $value with no type specified.", "line": 3 }
                    ]
                }
            }
        });
        fs::write(&report, json.to_string()).expect("write report");

        Self { tmp, report }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("stanfix");
        cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
        cmd
    }

    fn fix_json(&self, extra: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("fix")
            .arg(&self.report)
            .arg("--root")
            .arg(self.root())
            .arg("--json")
            .args(extra)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    fn php(&self) -> String {
        fs::read_to_string(self.root().join("helpers.php")).expect("read php file")
    }
}

#[test]
fn test_fix_writes_annotations() {
    let env = TestEnv::new();
    let output = env.fix_json(&[]);

    assert_eq!(output["statistics"]["fixed"], 2);
    assert_eq!(output["statistics"]["failed"], 0);
    assert_eq!(output["dry_run"], false);
    assert_eq!(
        env.php(),
        "<?php\n\n/**\n * @return mixed\n * @param mixed $value\n */\nfunction helper($value)\n{\n    return $value;\n}\n"
    );
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let env = TestEnv::new();
    let output = env.fix_json(&["--dry-run"]);

    assert_eq!(output["statistics"]["fixed"], 2);
    assert_eq!(output["statistics"]["files_with_changes"], 1);
    assert_eq!(env.php(), HELPER);
}

#[test]
fn test_disable_flag_turns_off_a_fixer() {
    let env = TestEnv::new();
    let output = env.fix_json(&["--disable", "missing_param_type"]);

    assert_eq!(output["statistics"]["fixed"], 1);
    assert_eq!(output["statistics"]["failed"], 1);
    assert!(!env.php().contains("@param"));
}

#[test]
fn test_policy_config_reports_instead_of_fixing() {
    let env = TestEnv::new();
    fs::write(
        env.root().join("stanfix.yaml"),
        "policy:\n  default: report\n",
    )
    .unwrap();

    let output = env.fix_json(&[]);
    assert_eq!(output["statistics"]["reported"], 2);
    assert_eq!(output["statistics"]["fixed"], 0);
    assert_eq!(env.php(), HELPER);
}

#[test]
fn test_clean_report_prints_no_diagnostics() {
    let env = TestEnv::new();
    let clean = env.root().join("clean.json");
    fs::write(
        &clean,
        r#"{"totals":{"errors":0,"file_errors":0},"files":[],"errors":[]}"#,
    )
    .unwrap();

    env.cmd()
        .arg("fix")
        .arg(&clean)
        .arg("--root")
        .arg(env.root())
        .assert()
        .success()
        .stdout(contains("No diagnostics to fix"));
    assert_eq!(env.php(), HELPER);
}

#[test]
fn test_human_summary() {
    let env = TestEnv::new();
    env.cmd()
        .arg("fix")
        .arg(&env.report)
        .arg("--root")
        .arg(env.root())
        .assert()
        .success()
        .stdout(contains("helpers.php"))
        .stdout(contains("Added @return mixed to helper"))
        .stdout(contains("Summary"));
}

#[test]
fn test_invalid_policy_action_fails() {
    let env = TestEnv::new();
    fs::write(
        env.root().join("stanfix.toml"),
        "[policy]\ndefault = \"maybe\"\n",
    )
    .unwrap();

    env.cmd()
        .arg("fix")
        .arg(&env.report)
        .arg("--root")
        .arg(env.root())
        .assert()
        .failure()
        .stderr(contains("Invalid stanfix configuration"));
    assert_eq!(env.php(), HELPER);
}

#[test]
fn test_unknown_custom_fixer_fails() {
    let env = TestEnv::new();
    fs::write(
        env.root().join("stanfix.toml"),
        "[fixers]\ncustom = [\"my_fixer\"]\n",
    )
    .unwrap();

    env.cmd()
        .arg("fix")
        .arg(&env.report)
        .arg("--root")
        .arg(env.root())
        .assert()
        .failure()
        .stderr(contains("Unknown custom fixer: 'my_fixer'"));
}

#[test]
fn test_fixers_lists_dispatch_order() {
    let env = TestEnv::new();
    fs::write(
        env.root().join("stanfix.toml"),
        "[fixers]\ndisabled = [\"missing_throws\"]\n\n[fixers.priorities]\nmissing_property_type = 50\n",
    )
    .unwrap();

    let out = env
        .cmd()
        .args(["fixers", "--json", "--root"])
        .arg(env.root())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let fixers: Value = serde_json::from_slice(&out).unwrap();
    let fixers = fixers.as_array().unwrap();

    assert_eq!(fixers.len(), 4);
    assert_eq!(fixers[0]["name"], "missing_property_type");
    assert_eq!(fixers[0]["priority"], 50);
    assert_eq!(fixers[3]["name"], "missing_throws");
    assert_eq!(fixers[3]["enabled"], false);
}

#[test]
fn test_completions_generate() {
    let env = TestEnv::new();
    env.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("stanfix"));
}
