//! Integration tests for the `omadactl` binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without a controller; the end-to-end cases drive a wiremock controller.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command with env isolation: no `OMADA_*` leakage and a
/// private, empty config directory.
fn omadactl(home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("omadactl");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    for var in [
        "OMADA_PROFILE",
        "OMADA_CONTROLLER",
        "OMADA_CONTROLLER_ID",
        "OMADA_SITE",
        "OMADA_USERNAME",
        "OMADA_PASSWORD",
        "OMADA_OUTPUT",
        "OMADA_INSECURE",
        "OMADA_TIMEOUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = home();
    let output = omadactl(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = home();
    omadactl(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("Omada")
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("clients"))
            .and(predicate::str::contains("events"))
            .and(predicate::str::contains("settings")),
    );
}

#[test]
fn test_version_flag() {
    let home = home();
    omadactl(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("omadactl"));
}

#[test]
fn test_completions_zsh() {
    let home = home();
    omadactl(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_settings_subcommands_exist() {
    let home = home();
    omadactl(&home)
        .args(["settings", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("get")
                .and(predicate::str::contains("set"))
                .and(predicate::str::contains("wlans")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_level_is_usage_error() {
    let home = home();
    let output = omadactl(&home)
        .args(["events", "--level", "catastrophic"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("catastrophic"));
}

#[test]
fn test_no_config_is_usage_error() {
    let home = home();
    omadactl(&home)
        .arg("sites")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_missing_username_is_auth_error() {
    let home = home();
    omadactl(&home)
        .args([
            "--controller",
            "https://127.0.0.1:8043",
            "--controller-id",
            "cid",
            "sites",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("username"));
}

#[test]
fn test_config_show_without_file() {
    let home = home();
    omadactl(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path() {
    let home = home();
    omadactl(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── End to end against a mock controller ────────────────────────────

fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "errorCode": 0,
        "msg": "Success.",
        "result": result,
    }))
}

async fn mock_controller() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cid/api/v2/login"))
        .respond_with(ok(json!({"omadacId": "cid", "roleType": 0, "token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cid/api/v2/logout"))
        .and(query_param("token", "tok"))
        .respond_with(ok(Value::Null))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sites_plain_from_flags() {
    let server = mock_controller().await;
    Mock::given(method("GET"))
        .and(path("/cid/api/v2/sites"))
        .and(query_param("currentPage", "1"))
        .respond_with(ok(json!({
            "totalRows": 2,
            "currentPage": 1,
            "currentSize": 10,
            "data": [{"id": "k1", "name": "Default"}, {"id": "k2", "name": "Branch"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    let mut cmd = omadactl(&home);
    cmd.env("OMADA_PASSWORD", "pw").args([
        "--controller",
        &server.uri(),
        "--controller-id",
        "cid",
        "-u",
        "admin",
        "-o",
        "plain",
        "sites",
    ]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "k1\nk2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_site_from_profile_exits_not_found() {
    let server = mock_controller().await;
    Mock::given(method("GET"))
        .and(path("/cid/api/v2/users/current"))
        .respond_with(ok(json!({
            "name": "admin",
            "email": "admin@example.com",
            "privilege": {"all": false, "sites": [{"name": "Default", "category": "site", "key": "k1"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    let config_path = {
        let out = omadactl(&home).args(["config", "path"]).output().unwrap();
        String::from_utf8(out.stdout).unwrap().trim().to_owned()
    };
    let config_path = std::path::Path::new(&config_path);
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(
        config_path,
        format!(
            "default_profile = \"lab\"\n\n\
             [profiles.lab]\n\
             controller = \"{}\"\n\
             controller_id = \"cid\"\n\
             site = \"Lab\"\n\
             username = \"admin\"\n\
             password_env = \"LAB_OMADA_PW\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let mut cmd = omadactl(&home);
    cmd.env("LAB_OMADA_PW", "pw").arg("clients");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("does not have privilege to site \"Lab\""));
}
