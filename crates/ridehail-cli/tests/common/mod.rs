#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "ops@example.com";
pub const PASSWORD: &str = "secret123";

/// A temporary directory holding a credentials file.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("credentials.yml"),
            format!("username: {}\npassword: {}\n", USERNAME, PASSWORD),
        )
        .expect("Failed to write credentials");
        Self { dir }
    }

    pub fn credentials(&self) -> PathBuf {
        self.dir.path().join("credentials.yml")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}", server.address().port())
}

/// Run the CLI binary against `server` with the workspace credentials.
pub async fn run_cli(server: &MockServer, workspace: &Workspace, args: &[&str]) -> Output {
    run_cli_with_credentials(server, &workspace.credentials(), workspace.path(), args).await
}

pub async fn run_cli_with_credentials(
    server: &MockServer,
    credentials: &Path,
    home: &Path,
    args: &[&str],
) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ridehail"))
        .args(args)
        .arg("--api-url")
        .arg(api_url(server))
        .arg("--credentials")
        .arg(credentials)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("RIDEHAIL_API_URL")
        .env_remove("RIDEHAIL_CREDENTIALS")
        .env_remove("RIDEHAIL_WEBHOOK_SECRET")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Parse stdout as JSON, panicking with stderr if the command failed.
pub fn stdout_json(output: &Output) -> Value {
    if !output.status.success() {
        panic!(
            "CLI command failed\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Mount the token endpoint, expecting the workspace credentials.
pub async fn mount_login(server: &MockServer, expires_in: u32) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .and(body_json(json!({"username": USERNAME, "password": PASSWORD})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "a1",
            "expires_in": expires_in,
            "refresh_token": "r1"
        })))
        .mount(server)
        .await;
}
