//! Integration tests for the kubetopo binary
//!
//! These tests run the built binary with a controlled environment.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const ENV_VARS: &[&str] = &[
    "KUBECONFIG",
    "RUST_LOG",
    "KUBETOPO_KUBE_CONFIG",
    "KUBETOPO_LOADBALANCER",
    "KUBETOPO_CONTROL_PLANE_TOPOLOGY",
    "KUBETOPO_NETWORK_TOPOLOGY",
    "KUBETOPO_CONFIG_TOPOLOGY",
];

/// Command for the binary with every variable it reads cleared
fn kubetopo() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kubetopo"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn create_env_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn json_stdout(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "kubetopo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_env_file_supplies_topology_flags() {
    let env_file = create_env_file(
        "KUBETOPO_KUBE_CONFIG=/a,/b\n\
         KUBETOPO_CONTROL_PLANE_TOPOLOGY=0:0,1:0\n\
         KUBETOPO_NETWORK_TOPOLOGY=0:east,1:west\n",
    );

    let output = kubetopo()
        .env("KUBECONFIG", "/x")
        .arg("--env-file")
        .arg(env_file.path())
        .args(["resolve", "-o", "json"])
        .output()
        .unwrap();

    let value = json_stdout(&output);
    assert_eq!(value["kube_config"], serde_json::json!(["/a", "/b"]));
    assert_eq!(value["control_plane_topology"]["1"], 0);
    assert_eq!(value["network_topology"]["0"], "east");
    assert_eq!(value["network_topology"]["1"], "west");
}

#[test]
fn test_command_line_wins_over_env_file() {
    let env_file = create_env_file("KUBETOPO_KUBE_CONFIG=/a,/b\n");

    let output = kubetopo()
        .arg("--env-file")
        .arg(env_file.path())
        .args(["--kube-config", "/c", "resolve", "-o", "json"])
        .output()
        .unwrap();

    let value = json_stdout(&output);
    assert_eq!(value["kube_config"], serde_json::json!(["/c"]));
}

#[test]
fn test_explicit_kube_config_ignores_kubeconfig_env() {
    // KUBECONFIG alone would fail to expand
    let output = kubetopo()
        .env("KUBECONFIG", "~nobody/config")
        .args(["--kube-config", "/a,/b", "resolve", "-o", "json"])
        .output()
        .unwrap();

    let value = json_stdout(&output);
    assert_eq!(value["kube_config"], serde_json::json!(["/a", "/b"]));
}

#[test]
fn test_failed_check_is_logged() {
    let output = kubetopo()
        .args([
            "--kube-config",
            "/a,/b",
            "--config-topology",
            "5:0",
            "check",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("topology is invalid"));
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("cluster index 5 exceeds number of available clusters 2"));
}
