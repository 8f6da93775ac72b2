//! Integration tests for the `eosctl` CLI binary.
//!
//! The first half checks argument parsing and local commands without a
//! device. The second half drives the binary against a wiremock eAPI
//! endpoint and checks exit codes and the writes the device received.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request as MockRequest, Respond, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `eosctl` binary with env isolation.
///
/// Clears all `EOSCTL_*` env vars and points the config file at a
/// nonexistent path so tests never touch the user's real configuration.
fn eosctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("eosctl");
    cmd.env("HOME", "/tmp/eosctl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/eosctl-cli-test-nonexistent")
        .env("EOSCTL_CONFIG", "/tmp/eosctl-cli-test-nonexistent/config.toml")
        .env("NO_COLOR", "1")
        .env_remove("EOSCTL_DEVICE")
        .env_remove("EOSCTL_HOST")
        .env_remove("EOSCTL_TRANSPORT")
        .env_remove("EOSCTL_PORT")
        .env_remove("EOSCTL_USERNAME")
        .env_remove("EOSCTL_PASSWORD")
        .env_remove("EOSCTL_ENABLE_PASSWORD")
        .env_remove("EOSCTL_OUTPUT")
        .env_remove("EOSCTL_INSECURE")
        .env_remove("EOSCTL_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn with_config(path: &Path) -> assert_cmd::Command {
    let mut cmd = eosctl_cmd();
    cmd.env("EOSCTL_CONFIG", path);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = eosctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    eosctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("EOS")
            .and(predicate::str::contains("reconcile"))
            .and(predicate::str::contains("snapshot"))
            .and(predicate::str::contains("address")),
    );
}

#[test]
fn test_version_flag() {
    eosctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eosctl"));
}

#[test]
fn test_completions_bash() {
    eosctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format_is_usage_error() {
    eosctl_cmd()
        .args(["-o", "xml", "snapshot"])
        .assert()
        .code(2);
}

#[test]
fn test_no_device_selected() {
    let output = eosctl_cmd().arg("snapshot").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No device selected"),
        "Expected device hint in output:\n{text}"
    );
}

#[test]
fn test_host_without_password_is_auth_error() {
    eosctl_cmd()
        .args(["--host", "192.0.2.1", "snapshot"])
        .assert()
        .code(3);
}

#[test]
fn test_malformed_desired_address_is_usage_error() {
    // Validation happens before any request is sent
    eosctl_cmd()
        .args([
            "--host",
            "127.0.0.1",
            "--port",
            "9",
            "--transport",
            "http",
            "--password",
            "pw",
            "reconcile",
            "Management1",
            "10.1.2.300/24",
            "--no-snapshot",
        ])
        .assert()
        .code(2);
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_honours_override() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("eosctl.toml");
    with_config(&file)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eosctl.toml"));
}

#[test]
fn test_add_device_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");

    with_config(&file)
        .args([
            "config",
            "add-device",
            "leaf1",
            "--address",
            "10.1.2.1",
            "--user",
            "ops",
            "--password-env",
            "LEAF1_PW",
        ])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&file).unwrap();
    assert!(saved.contains("leaf1"));
    assert!(saved.contains("default_device"));

    with_config(&file)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("10.1.2.1")
                .and(predicate::str::contains("LEAF1_PW"))
                .and(predicate::str::contains("ops")),
        );
}

#[test]
fn test_config_show_redacts_passwords() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(
        &file,
        "[devices.leaf1]\nhost = \"10.1.2.1\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    with_config(&file)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_unknown_device_lists_available() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "[devices.leaf1]\nhost = \"10.1.2.1\"\n").unwrap();

    let output = with_config(&file)
        .args(["--device", "spine9", "snapshot"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("leaf1"));
}

// ── Against a simulated device ──────────────────────────────────────

/// Answers `runCmds` the way EOS does for one routed interface.
struct Device {
    address: &'static str,
    mask_len: u8,
    reject: Option<&'static str>,
}

impl Device {
    fn at(address: &'static str, mask_len: u8) -> Self {
        Self {
            address,
            mask_len,
            reject: None,
        }
    }

    fn rejecting(mut self, error: &'static str) -> Self {
        self.reject = Some(error);
        self
    }

    fn answer(&self, cmd: &str) -> Value {
        match cmd {
            "show version" => json!({
                "modelName": "vEOS-lab",
                "version": "4.31.2F",
                "serialNumber": "SN-TEST",
                "systemMacAddress": "50:00:00:d7:ee:0b",
                "uptime": 3600.5,
                "memTotal": 2014256,
                "memFree": 1100000,
                "hostname": "leaf1"
            }),
            "show ip interface" => json!({
                "interfaces": {
                    "Management1": {
                        "name": "Management1",
                        "interfaceStatus": "connected",
                        "lineProtocolStatus": "up",
                        "interfaceAddress": {
                            "primaryIp": { "address": self.address, "maskLen": self.mask_len }
                        }
                    }
                }
            }),
            "show interfaces" => json!({
                "interfaces": {
                    "Management1": {
                        "name": "Management1",
                        "interfaceStatus": "connected",
                        "lineProtocolStatus": "up",
                        "hardware": "ethernet",
                        "mtu": 1500,
                        "bandwidth": 1_000_000_000_u64,
                        "interfaceAddress": []
                    }
                }
            }),
            _ => json!({}),
        }
    }
}

fn cmds(body: &Value) -> Vec<String> {
    body["params"]["cmds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| match c {
            Value::String(s) => s.clone(),
            other => other["cmd"].as_str().unwrap().to_owned(),
        })
        .collect()
}

impl Respond for Device {
    fn respond(&self, request: &MockRequest) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let cmds = cmds(&body);

        if let Some(error) = self.reject {
            if let Some(pos) = cmds.iter().position(|c| c.starts_with("ip address")) {
                let mut data: Vec<Value> = vec![json!({}); pos];
                data.push(json!({ "errors": [error] }));
                return ResponseTemplate::new(200).set_body_json(json!({
                    "jsonrpc": "2.0",
                    "id": body["id"],
                    "error": {
                        "code": 1002,
                        "message": format!("CLI command {} of {} '{}' failed: invalid command",
                            pos + 1, cmds.len(), cmds[pos]),
                        "data": data,
                    }
                }));
            }
        }

        let result: Vec<Value> = cmds.iter().map(|c| self.answer(c)).collect();
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": body["id"],
            "result": result,
        }))
    }
}

async fn device_server(device: Device) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/command-api"))
        .respond_with(device)
        .mount(&server)
        .await;
    server
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let port = server.address().port().to_string();
    let mut argv: Vec<String> = [
        "--host",
        "127.0.0.1",
        "--port",
        &port,
        "--transport",
        "http",
        "--password",
        "pw",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    argv.extend(args.iter().map(ToString::to_string));

    tokio::task::spawn_blocking(move || eosctl_cmd().args(argv).output().unwrap())
        .await
        .unwrap()
}

async fn configure_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            cmds(&body).iter().any(|c| c == "configure")
        })
        .count()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reconcile_already_satisfied_sends_no_configuration() {
    let server = device_server(Device::at("10.1.2.90", 24)).await;

    let output = run_against(
        &server,
        &["-o", "json", "reconcile", "Management1", "10.1.2.90/24"],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["result"]["outcome"], "already_satisfied");
    assert_eq!(report["result"]["current"], "10.1.2.90/24");
    assert!(report["interfaces"].is_array());
    assert_eq!(configure_requests(&server).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reconcile_change_sends_one_configuration() {
    let server = device_server(Device::at("10.1.2.50", 24)).await;

    let output = run_against(
        &server,
        &[
            "-o",
            "json",
            "reconcile",
            "Management1",
            "10.1.2.90/24",
            "--no-snapshot",
        ],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["result"]["outcome"], "changed");
    assert_eq!(report["result"]["previous"], "10.1.2.50/24");
    assert!(report.get("interfaces").is_none());
    assert_eq!(configure_requests(&server).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reconcile_dry_run_sends_no_configuration() {
    let server = device_server(Device::at("10.1.2.50", 24)).await;

    let output = run_against(
        &server,
        &["reconcile", "Management1", "10.1.2.90/24", "--dry-run", "--no-snapshot"],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("dry run"));
    assert_eq!(configure_requests(&server).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_configuration_exits_with_rejected_code() {
    let server = device_server(
        Device::at("10.1.2.50", 24).rejecting("Address overlaps with Ethernet1"),
    )
    .await;

    let output = run_against(
        &server,
        &["reconcile", "Management1", "10.1.2.90/24", "--no-snapshot"],
    )
    .await;

    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("overlaps"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_interface_exits_with_not_found_code() {
    let server = device_server(Device::at("10.1.2.90", 24)).await;

    let output = run_against(&server, &["address", "get", "Ethernet9"]).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_address_get_plain_prints_cidr() {
    let server = device_server(Device::at("10.1.2.90", 24)).await;

    let output = run_against(&server, &["-o", "plain", "address", "get", "Management1"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "10.1.2.90/24");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_snapshot_is_one_round_trip() {
    let server = device_server(Device::at("10.1.2.90", 24)).await;

    let output = run_against(&server, &["-o", "json", "snapshot"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/command-api"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["snapshot"]).await;

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
