//! Integration tests for the `merakimock` CLI binary.
//!
//! Every test points `--config` at a throwaway directory so the user's
//! real configuration is never read or written.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `merakimock` binary with env isolation.
fn merakimock_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("merakimock");
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("MERAKIMOCK_CONFIG")
        .env_remove("MERAKIMOCK_OUTPUT")
        .env_remove("MERAKIMOCK_DEFAULT_TOPOLOGY")
        .env_remove("MERAKIMOCK_GENERATION__SEED")
        .arg("--config")
        .arg(config_file(dir));
    cmd
}

fn config_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("merakimock").join("config.toml")
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cargo_bin_cmd!("merakimock").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    merakimock_cmd(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("Meraki")
            .and(predicate::str::contains("generate"))
            .and(predicate::str::contains("validate"))
            .and(predicate::str::contains("query")),
    );
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    merakimock_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("merakimock"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    merakimock_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Topologies ──────────────────────────────────────────────────────

#[test]
fn test_topologies_plain() {
    let dir = TempDir::new().unwrap();
    merakimock_cmd(&dir)
        .args(["topologies", "-o", "plain"])
        .assert()
        .success()
        .stdout("hub_spoke\nmesh\nmulti_org\n");
}

#[test]
fn test_topologies_json_marks_default() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["ls", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let list = stdout_json(&output);
    assert_eq!(list[0]["name"], "hub_spoke");
    assert_eq!(list[0]["default"], true);
    assert_eq!(list[1]["seed"], 43);
}

// ── Generate ────────────────────────────────────────────────────────

#[test]
fn test_generate_hub_spoke_json() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["generate", "hub_spoke", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let topology = stdout_json(&output);
    assert_eq!(topology["topology_name"], "hub_spoke");
    assert_eq!(topology["stats"]["organizations"], 1);
    assert_eq!(topology["stats"]["networks"], 21);
    assert_eq!(
        topology["networks"].as_array().unwrap().len(),
        21,
        "stats and entity lists agree"
    );
}

#[test]
fn test_generate_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let run = |seed: &str| {
        merakimock_cmd(&dir)
            .args(["generate", "mesh", "-o", "json-compact", "--seed", seed])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run("7"), run("7"));
    assert_ne!(run("7"), run("8"));
}

#[test]
fn test_generate_default_topology_summary() {
    let dir = TempDir::new().unwrap();
    merakimock_cmd(&dir)
        .args(["generate", "-o", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hub_spoke").and(predicate::str::contains("Networks")));
}

#[test]
fn test_generate_unknown_topology() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["generate", "ring"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Unknown topology 'ring'"), "{text}");
    assert!(text.contains("multi_org"), "{text}");
}

#[test]
fn test_generate_writes_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("fleet.yaml");
    merakimock_cmd(&dir)
        .args(["generate", "multi_org", "-o", "plain", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout("multi_org\n");

    let body = std::fs::read_to_string(&out).unwrap();
    assert!(body.contains("topology_name: multi_org"));
}

#[test]
fn test_generate_from_file() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("campus.toml");
    write(
        &doc,
        r#"
name = "campus"
seed = 5

[[organizations]]
id = "700001"
name = "Campus Org"

[[organizations.networks]]
name = "Campus-Main"
kind = "headquarters"
vpn = "hub"

[[organizations.networks]]
name = "Campus-Annex"
kind = "office"
vpn = "spoke"
"#,
    );

    let output = merakimock_cmd(&dir)
        .args(["generate", "-o", "json", "--from-file"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let topology = stdout_json(&output);
    assert_eq!(topology["topology_name"], "campus");
    assert_eq!(topology["stats"]["networks"], 2);
    assert_eq!(topology["stats"]["vpn_configs"], 2);
}

#[test]
fn test_generate_from_file_with_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("campus.ini");
    write(&doc, "name = campus");
    let output = merakimock_cmd(&dir)
        .args(["generate", "--from-file"])
        .arg(&doc)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_generate_from_invalid_document() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("broken.json");
    write(&doc, r#"{"name": "broken", "organizations": []}"#);
    let output = merakimock_cmd(&dir)
        .args(["generate", "--from-file"])
        .arg(&doc)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5), "{}", combined_output(&output));
}

// ── Validate & stats ────────────────────────────────────────────────

#[test]
fn test_validate_builtin_topologies() {
    let dir = TempDir::new().unwrap();
    merakimock_cmd(&dir)
        .args(["validate", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hub_spoke\tok")
                .and(predicate::str::contains("mesh\tok"))
                .and(predicate::str::contains("multi_org\tok")),
        );
}

#[test]
fn test_validate_report_json() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["validate", "-o", "json", "--seed", "99"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let report = stdout_json(&output);
    let topologies = report["topologies"].as_array().unwrap();
    assert_eq!(topologies.len(), 3);
    assert!(topologies.iter().all(|t| t["issues"].as_array().unwrap().is_empty()));
}

#[test]
fn test_stats_json() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["stats", "hub-spoke", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let entries = stdout_json(&output);
    assert_eq!(entries[0]["topology"], "hub_spoke");
    assert_eq!(entries[0]["seed"], 42);
    assert_eq!(entries[0]["stats"]["networks"], 21);
}

// ── Query ───────────────────────────────────────────────────────────

#[test]
fn test_query_single_network() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["query", "hub_spoke", "network", "--id", "N_HQ001", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let network = stdout_json(&output);
    assert_eq!(network["id"], "N_HQ001");
}

#[test]
fn test_query_by_parent() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["query", "hub_spoke", "vlan", "--parent", "network:N_HQ001", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let vlans = stdout_json(&output);
    let vlans = vlans.as_array().unwrap();
    assert!(!vlans.is_empty());
    assert!(vlans.iter().all(|v| v["networkId"] == "N_HQ001"));
}

#[test]
fn test_query_missing_entity() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["query", "hub_spoke", "device", "--id", "Q2XX-NOPE-0000"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("not found"));
}

#[test]
fn test_query_unknown_entity_kind() {
    let dir = TempDir::new().unwrap();
    let output = merakimock_cmd(&dir)
        .args(["query", "hub_spoke", "router"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("network_client"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_show_path() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir);

    merakimock_cmd(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    merakimock_cmd(&dir).args(["config", "init"]).assert().success();
    assert!(path.exists());

    let output = merakimock_cmd(&dir)
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    merakimock_cmd(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    merakimock_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_topology = \"hub_spoke\""));
}

#[test]
fn test_config_seeds_apply() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    write(&path, "default_topology = \"mesh\"\n\n[seeds]\nmesh = 7\n");

    let from_config = merakimock_cmd(&dir)
        .args(["generate", "-o", "json-compact"])
        .output()
        .unwrap();
    let from_flag = merakimock_cmd(&dir)
        .args(["generate", "mesh", "-o", "json-compact", "--seed", "7"])
        .output()
        .unwrap();
    assert!(from_config.status.success(), "{}", combined_output(&from_config));
    assert_eq!(from_config.stdout, from_flag.stdout);
}

#[test]
fn test_invalid_config_value() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    write(&path, "[defaults]\noutput = \"xml\"\n");

    let output = merakimock_cmd(&dir).args(["topologies"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("defaults.output"));
}
