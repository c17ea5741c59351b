// ABOUTME: Integration tests for the CLI application
// ABOUTME: Tests command-line functionality end to end via cargo run

use std::process::Command;

mod common;
use common::TestEnvironment;

fn run_milepost(env: &TestEnvironment, args: &[&str]) -> std::process::Output {
    let mut full_args = vec![
        "run".to_string(),
        "--quiet".to_string(),
        "--".to_string(),
        "--config".to_string(),
        env.config_arg(),
    ];
    full_args.extend(args.iter().map(|a| a.to_string()));

    Command::new("cargo")
        .args(&full_args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_help_command() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("milepost"));
    assert!(stdout.contains("set-stage"));
}

#[test]
fn test_cli_create_and_show() {
    let env = TestEnvironment::new();

    let output = run_milepost(&env, &["create", "t1", "--assignee", "u1"]);
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = run_milepost(&env, &["show", "t1"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not_started"));
    assert!(stdout.contains("u1"));
}

#[test]
fn test_cli_stage_flow_and_history() {
    let env = TestEnvironment::new();

    let output = run_milepost(&env, &["create", "t1", "--assignee", "u1"]);
    assert!(output.status.success());

    // Assignee advances (identity comes from the config file)
    let output = run_milepost(&env, &["set-stage", "t1", "started"]);
    assert!(
        output.status.success(),
        "set-stage failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("started"));

    // Supervisor override without a reason is refused
    let output = run_milepost(
        &env,
        &["set-stage", "t1", "completed", "--actor", "m1", "--role", "manager"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reason"));

    // With a reason it lands
    let output = run_milepost(
        &env,
        &[
            "set-stage",
            "t1",
            "completed",
            "--actor",
            "m1",
            "--role",
            "manager",
            "--reason",
            "descoped",
        ],
    );
    assert!(
        output.status.success(),
        "override failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // History shows both recorded transitions
    let output = run_milepost(&env, &["history", "t1"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not_started -> started"));
    assert!(stdout.contains("started -> completed"));
    assert!(stdout.contains("descoped"));
}

#[test]
fn test_cli_rejects_unknown_stage() {
    let env = TestEnvironment::new();

    let output = run_milepost(&env, &["create", "t1", "--assignee", "u1"]);
    assert!(output.status.success());

    let output = run_milepost(&env, &["set-stage", "t1", "shipped"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown stage"));
}

#[test]
fn test_cli_list_json_output() {
    let env = TestEnvironment::new();

    run_milepost(&env, &["create", "t1", "--assignee", "u1"]);
    run_milepost(&env, &["create", "t2", "--assignee", "u2"]);
    run_milepost(&env, &["set-stage", "t1", "started"]);

    let output = run_milepost(&env, &["list", "--format", "json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list output is JSON");
    let tasks = parsed.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["execution_stage"], "started");
    assert_eq!(tasks[0]["projection"]["percent"], 25.0);
    assert_eq!(tasks[1]["execution_stage"], "not_started");
}
