use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn edunexia(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("edunexia"));
    cmd.env("HOME", home)
        .env_remove("EDUNEXIA_API_URL")
        .env_remove("EDUNEXIA_ORIGIN")
        .env_remove("EDUNEXIA_STORAGE");
    cmd
}

#[test]
fn cli_help_includes_usage() {
    let home_dir = tempdir().expect("tempdir");

    edunexia(home_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("callback"));
}

#[test]
fn google_sign_in_session_lifecycle() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    let profile = server
        .mock("GET", "/api/v1/auth/student/me")
        .match_header("authorization", "Bearer oauth-token")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "data": {"id": 4, "username": "hoa", "full_name": "Vu Hoa"}
            })
            .to_string(),
        )
        .expect(1)
        .create();
    let api_url = format!("{}/api/v1", server.url());

    edunexia(home_dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session: none"));

    edunexia(home_dir.path())
        .args([
            "--api-url",
            &api_url,
            "callback",
            "--no-wait",
            "/auth/callback?token=oauth-token",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Vu Hoa"));

    edunexia(home_dir.path())
        .args(["--api-url", &api_url, "open", "/dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/dashboard (signed in as Vu Hoa)"));

    edunexia(home_dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session: active"))
        .stdout(predicate::str::contains("user: Vu Hoa (4)"));

    edunexia(home_dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    edunexia(home_dir.path())
        .args(["open", "/results/1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> /login"));

    profile.assert();
}

#[test]
fn expired_session_is_dropped_on_first_request() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", "/api/v1/auth/student/me")
        .with_status(401)
        .with_body(json!({"detail": "Token expired"}).to_string())
        .create();
    let api_url = format!("{}/api/v1", server.url());
    let storage_dir = home_dir.path().join(".edunexia");
    std::fs::create_dir_all(&storage_dir).expect("storage dir");
    std::fs::write(
        storage_dir.join("storage.json"),
        json!({"edunexia_token": "stale"}).to_string(),
    )
    .expect("seed storage");

    edunexia(home_dir.path())
        .args(["--api-url", &api_url, "open", "/dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=> /login?error=unauthorized&details=Token%20expired",
        ));

    edunexia(home_dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session: none"));
}
