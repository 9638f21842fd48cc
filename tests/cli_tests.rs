// ABOUTME: Integration tests for the CLI application
// ABOUTME: Runs the crashplate binary against template and report files

use std::process::Command;
use tokio::fs;

mod common;
use common::{TestEnvironment, TestReportBuilder};

fn crashplate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_crashplate"))
}

#[tokio::test]
async fn test_cli_help_command() {
    let output = crashplate()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crashplate"));
    assert!(stdout.contains("render"));
}

#[tokio::test]
async fn test_cli_render_to_stdout() {
    let env = TestEnvironment::new();

    let builder = TestReportBuilder::new("Widget")
        .with_user_description("crashed on save")
        .with_exception("widget::SaveError", "disk full");
    let report = env.create_report_file("report", &builder).await;
    let template = env
        .write_file(
            "template.txt",
            "{app.name} {app.version}: {exception.type} {exception.message} #{bugid} {unknown}",
        )
        .await;

    let output = crashplate()
        .args(["render", template.to_str().unwrap(), "--report"])
        .arg(&report)
        .args(["--token", "bugid=5001"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Widget 1.4.2: widget::SaveError disk full #5001 {unknown}"
    );
}

#[tokio::test]
async fn test_cli_render_to_file() {
    let env = TestEnvironment::new();

    let report = env
        .write_file(
            "report.json",
            r#"{"general_info": {"host_application": "Widget", "user_description": "hello"}}"#,
        )
        .await;
    let template = env
        .write_file("template.txt", "{app.name} says {bug.submission.usercomment}")
        .await;
    let output_file = env.path().join("rendered.txt");

    let output = crashplate()
        .arg("render")
        .arg(&template)
        .arg("--report")
        .arg(&report)
        .arg("--output")
        .arg(&output_file)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let content = fs::read_to_string(&output_file).await.unwrap();
    assert_eq!(content, "Widget says hello");
}

#[tokio::test]
async fn test_cli_token_overrides_config_token() {
    let env = TestEnvironment::new();

    let config = env
        .write_file("crashplate.yaml", "tokens:\n  bugid: config\n  owner: qa\n")
        .await;
    let template = env.write_file("template.txt", "{bugid} {owner}").await;

    for _ in 0..10 {
        let output = crashplate()
            .arg("--config")
            .arg(&config)
            .arg("render")
            .arg(&template)
            .args(["--token", "{bugid}=cli"])
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "cli qa");
    }
}

#[tokio::test]
async fn test_cli_render_unquoted_version() {
    let env = TestEnvironment::new();

    let report = env
        .write_file(
            "report.yaml",
            "general_info:\n  host_application: Widget\n  host_application_version: 1.4\n",
        )
        .await;
    let template = env.write_file("template.txt", "{app.name} {app.version}").await;

    let output = crashplate()
        .arg("render")
        .arg(&template)
        .arg("--report")
        .arg(&report)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Widget 1.4");
}

#[tokio::test]
async fn test_cli_render_missing_template_fails() {
    let env = TestEnvironment::new();

    let output = crashplate()
        .arg("render")
        .arg(env.path().join("missing.txt"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[tokio::test]
async fn test_cli_info_json() {
    let output = crashplate()
        .args(["info", "--format", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["application"]["product"], "crashplate");
    assert!(json["machine"]["runtime_version"].is_string());
}

#[tokio::test]
async fn test_cli_tokens_lists_builtins() {
    let output = crashplate()
        .arg("tokens")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 20);
    assert!(stdout.contains("{exception.extendedinformation}"));
}
