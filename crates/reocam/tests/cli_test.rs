//! Integration tests for the `reocam` CLI binary.
//!
//! Argument parsing, completions, and error exit codes run without a
//! camera; the session tests point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const API: &str = "/cgi-bin/api.cgi";
const TOKEN: &str = "0d5b2c7e41a9f3b";

/// Build a [`Command`] for the `reocam` binary with env isolation.
///
/// Clears all `REOCAM_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn reocam_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("reocam");
    cmd.env("HOME", "/tmp/reocam-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/reocam-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("REOCAM_PROFILE")
        .env_remove("REOCAM_HOST")
        .env_remove("REOCAM_PORT")
        .env_remove("REOCAM_USERNAME")
        .env_remove("REOCAM_PASSWORD")
        .env_remove("REOCAM_OUTPUT")
        .env_remove("REOCAM_INSECURE")
        .env_remove("REOCAM_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn reply(cmd: &str, value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([{ "cmd": cmd, "code": 0, "value": value }]))
}

async fn mount(server: &MockServer, cmd: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(API))
        .and(query_param("cmd", cmd))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Run the binary against `server` on a blocking thread.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let port = server.address().port().to_string();
    let mut full: Vec<String> = [
        "--host",
        "127.0.0.1",
        "--port",
        port.as_str(),
        "--user",
        "admin",
        "--password",
        "hunter2",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect();
    full.extend(args.iter().map(|s| (*s).to_owned()));

    tokio::task::spawn_blocking(move || reocam_cmd().args(&full).output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = reocam_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    reocam_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Reolink")
            .and(predicate::str::contains("email"))
            .and(predicate::str::contains("infrared"))
            .and(predicate::str::contains("query")),
    );
}

#[test]
fn test_version_flag() {
    reocam_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reocam"));
}

#[test]
fn test_invalid_subcommand() {
    reocam_cmd()
        .arg("reboot")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_toggle_rejects_unknown_state() {
    reocam_cmd()
        .args(["infrared", "maybe"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    reocam_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reocam"));
}

#[test]
fn test_completions_zsh() {
    reocam_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef reocam"));
}

#[test]
fn test_completions_fish() {
    reocam_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    reocam_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Connection errors ───────────────────────────────────────────────

#[test]
fn test_no_host_reports_missing_config() {
    let output = reocam_cmd().args(["ftp", "get"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("No camera configured"), "got:\n{text}");
}

#[test]
fn test_hostname_is_rejected() {
    let output = reocam_cmd()
        .args(["--host", "camera.local", "--user", "admin", "--password", "x", "login"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("not an IP address"), "got:\n{text}");
}

#[test]
fn test_missing_user_reports_credentials() {
    let output = reocam_cmd()
        .args(["--host", "192.168.1.20", "login"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No credentials"), "got:\n{text}");
}

#[test]
fn test_unknown_profile_lists_available() {
    let output = reocam_cmd()
        .args(["--profile", "attic", "ftp", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("Profile 'attic' not found"), "got:\n{text}");
}

// ── Camera sessions ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_ftp_get_logs_in_prints_and_logs_out() {
    let server = MockServer::start().await;
    mount(&server, "Login", reply("Login", json!({ "Token": { "leaseTime": 3600, "name": TOKEN } })), 1).await;
    mount(
        &server,
        "GetFtp",
        reply("GetFtp", json!({ "Ftp": { "server": "ftp.example.com", "schedule": { "enable": 1 } } })),
        1,
    )
    .await;
    mount(&server, "Logout", reply("Logout", json!({ "rspCode": 200 })), 1).await;

    let output = run_against(&server, &["--output", "json-compact", "ftp", "get"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!({ "server": "ftp.example.com", "schedule": { "enable": 1 } })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    mount(
        &server,
        "Login",
        ResponseTemplate::new(200).set_body_json(json!([{
            "cmd": "Login",
            "code": 1,
            "error": { "detail": "login failed", "rspCode": -7 }
        }])),
        1,
    )
    .await;
    mount(&server, "Logout", reply("Logout", json!({ "rspCode": 200 })), 0).await;

    let output = run_against(&server, &["login"]).await;
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("login failed"), "got:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_rejects_parameter_before_sending() {
    let server = MockServer::start().await;
    mount(&server, "Login", reply("Login", json!({ "Token": { "leaseTime": 3600, "name": TOKEN } })), 1).await;
    mount(&server, "SetIrLights", reply("SetIrLights", json!({ "rspCode": 200 })), 0).await;
    mount(&server, "Logout", reply("Logout", json!({ "rspCode": 200 })), 1).await;

    let output = run_against(&server, &["query", "IrLights", "-P", "brightness=5"]).await;
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("brightness"), "got:\n{text}");
}
