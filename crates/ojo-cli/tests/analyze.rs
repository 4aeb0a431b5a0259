//! End-to-end tests for `ojo analyze` against a mock backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn scenario_body() -> serde_json::Value {
    json!({
        "followers_count": 10,
        "following_count": 12,
        "not_following_back": ["bob"],
        "fans": ["carol", "dave"]
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_analyze_prints_json_result() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({
            "username": "alice",
            "password": "p1",
            "two_factor_code": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_body()))
        .expect(1)
        .mount(&server)
        .await;

    let output = cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env("OJO_PASSWORD", "p1")
        .args(["--endpoint", &format!("{}/analyze", server.uri())])
        .args(["analyze", "--username", "alice", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, scenario_body());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_analyze_reads_password_from_stdin_and_prints_report() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({
            "username": "alice",
            "password": "s3cret",
            "two_factor_code": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_body()))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env_remove("OJO_PASSWORD")
        .env("OJO_ENDPOINT", format!("{}/analyze", server.uri()))
        .args(["analyze", "--username", "alice", "--password-stdin"])
        .write_stdin("s3cret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seguidores"))
        .stdout(predicate::str::contains("No te siguen (1):\n  bob"))
        .stdout(predicate::str::contains("No los sigues (2):\n  carol\n  dave"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_analyze_sends_preset_code_after_two_factor_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({
            "username": "alice",
            "password": "p1",
            "two_factor_code": null
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Please enter the verification code"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({
            "username": "alice",
            "password": "p1",
            "two_factor_code": "000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_body()))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env("OJO_PASSWORD", "p1")
        .args(["--endpoint", &format!("{}/analyze", server.uri())])
        .args(["analyze", "--username", "alice", "--two-factor-code", "000000", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"followers_count\": 10"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_analyze_without_code_fails_with_prompt_when_not_a_terminal() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Two factor authentication required"))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env("OJO_PASSWORD", "p1")
        .args(["--endpoint", &format!("{}/analyze", server.uri())])
        .args(["analyze", "--username", "alice"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Por favor ingresa el código 2FA que recibiste.",
        ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_analyze_server_error_is_reported() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "scraper down"})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env("OJO_PASSWORD", "p1")
        .args(["--endpoint", &format!("{}/analyze", server.uri())])
        .args(["analyze", "--username", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: HTTP 500: scraper down"));
}

#[test]
fn test_analyze_without_endpoint_names_all_sources() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env_remove("OJO_ENDPOINT")
        .env("OJO_PASSWORD", "p1")
        .args(["analyze", "--username", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--endpoint"))
        .stderr(predicate::str::contains("OJO_ENDPOINT"))
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_analyze_without_password_fails() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("ojo")
        .env("OJO_HOME", home.path())
        .env_remove("OJO_PASSWORD")
        .args(["--endpoint", "http://127.0.0.1:9/analyze"])
        .args(["analyze", "--username", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OJO_PASSWORD"));
}
