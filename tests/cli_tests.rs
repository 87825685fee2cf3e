use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// A `convert` command with the fixture settings and their variables set.
///
/// 使用样例设置及其环境变量的 `convert` 命令。
fn convert_command() -> Command {
    let mut cmd = Command::cargo_bin("tm4j-converter").unwrap();
    cmd.env("TM4J_FIXTURE_VERSION", "5.0")
        .env("TM4J_FIXTURE_ENVIRONMENT", "QA")
        .env("TM4J_FIXTURE_OWNER", "carol")
        .env_remove("RUST_LOG")
        .arg("--lang")
        .arg("en")
        .arg("convert")
        .arg("--config")
        .arg("tests/fixtures/Tm4j.toml");
    cmd
}

/// This test converts the NUnit 3 fixture to stdout. It asserts that the
/// command succeeds, that stdout carries only the JSON document, and that
/// the summary goes to stderr.
///
/// 这个测试将 NUnit 3 样例转换到 stdout。它断言命令成功，stdout 只包含 JSON 文档，
/// 并且摘要输出到 stderr。
#[test]
fn test_convert_to_stdout() {
    let output = convert_command()
        .arg("tests/fixtures/nunit3_mixed.xml")
        .output()
        .unwrap();

    assert!(output.status.success());
    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document.as_array().unwrap().len(), 3);
    assert_eq!(document[0]["testCaseKey"], "CALC-T1");
    assert_eq!(document[0]["environment"], "QA");
    assert_eq!(document[0]["customFields"]["Owner"], "carol");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--- TM4J Conversion Summary ---"));
    assert!(stderr.contains("Calc.Tests.CalculatorTests.Untracked"));
    assert!(stderr.contains("TM4J report written to stdout"));
}

/// This test writes the document to a file in a directory that does not
/// exist yet.
///
/// 这个测试将文档写入一个尚不存在的目录中的文件。
#[test]
fn test_convert_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").join("tm4j.json");

    convert_command()
        .arg("tests/fixtures/nunit3_mixed.xml")
        .arg("--output")
        .arg(&output_path)
        .arg("--format")
        .arg("tm4j")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("TM4J report written to"));

    let content = fs::read_to_string(&output_path).unwrap();
    let document: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(document["version"], 1.0);
    assert_eq!(document["executions"].as_array().unwrap().len(), 5);
}

/// This test checks that command-line values override the settings file.
///
/// 这个测试检查命令行值是否覆盖设置文件。
#[test]
fn test_command_line_overrides_settings() {
    let output = convert_command()
        .arg("tests/fixtures/nunit3_mixed.xml")
        .arg("--no-aggregate")
        .arg("--environment")
        .arg("Production")
        .arg("--key-pattern")
        .arg(r"^CALC-T1$")
        .arg("--quiet")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = document.as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r["testCaseKey"] == "CALC-T1"));
    assert!(results.iter().all(|r| r["environment"] == "Production"));
}

/// This test converts an NUnit 2 report selected with `--dialect`.
///
/// 这个测试转换通过 `--dialect` 选择的 NUnit 2 报告。
#[test]
fn test_convert_nunit2_dialect() {
    convert_command()
        .arg("tests/fixtures/nunit2_results.xml")
        .arg("--dialect")
        .arg("nunit2")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CALC-T4\""));
}

/// This test checks that the summary follows `--lang`.
///
/// 这个测试检查摘要是否遵循 `--lang`。
#[test]
fn test_summary_is_localized() {
    let mut cmd = Command::cargo_bin("tm4j-converter").unwrap();
    cmd.arg("--lang")
        .arg("zh-CN")
        .arg("convert")
        .arg("--key-pattern")
        .arg(r"^CALC-T\d+$")
        .arg("tests/fixtures/nunit3_mixed.xml");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("--- TM4J 转换摘要 ---"));
}

/// This test checks that a missing settings file at the default location
/// means defaults.
///
/// 这个测试检查默认位置缺少设置文件时是否使用默认值。
#[test]
fn test_missing_default_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let report = fs::canonicalize("tests/fixtures/nunit3_mixed.xml").unwrap();

    let mut cmd = Command::cargo_bin("tm4j-converter").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--lang")
        .arg("en")
        .arg("convert")
        .arg(&report);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"CALC-T3\""));
}

/// This test runs `init --non-interactive` twice: the first run writes the
/// default settings, the second refuses to overwrite them without `--force`.
///
/// 这个测试运行两次 `init --non-interactive`：第一次写入默认设置，
/// 第二次在没有 `--force` 的情况下拒绝覆盖。
#[test]
fn test_init_non_interactive() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("Tm4j.toml");

    let init = || {
        let mut cmd = Command::cargo_bin("tm4j-converter").unwrap();
        cmd.arg("--lang")
            .arg("en")
            .arg("init")
            .arg("--non-interactive")
            .arg("--path")
            .arg(&config_path);
        cmd
    };

    init()
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("format = \"tm4jtestcycle\""));

    fs::write(&config_path, "aggregate = true\n").unwrap();
    init()
        .assert()
        .success()
        .stderr(predicate::str::contains("Settings file already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "aggregate = true\n");

    init().arg("--force").assert().success();
    assert_eq!(fs::read_to_string(&config_path).unwrap(), content);
}

/// This test checks that `--aggregate` and `--no-aggregate` conflict.
///
/// 这个测试检查 `--aggregate` 和 `--no-aggregate` 是否冲突。
#[test]
fn test_aggregate_flags_conflict() {
    convert_command()
        .arg("tests/fixtures/nunit3_mixed.xml")
        .arg("--aggregate")
        .arg("--no-aggregate")
        .assert()
        .failure();
}
