#![allow(dead_code)]

use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use tickkk::ApiClient;
use url::Url;
use wiremock::MockServer;

/// Runs tickkk commands against a mock API with an isolated config root.
pub struct TickkkTest {
    pub temp_dir: TempDir,
    pub server: MockServer,
    binary_path: String,
}

impl TickkkTest {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let server = MockServer::start().await;
        TickkkTest {
            temp_dir,
            server,
            binary_path: env!("CARGO_BIN_EXE_tickkk").to_string(),
        }
    }

    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("TICKKK_ROOT", self.temp_dir.path())
            .env("TICKKK_API_BASE_URL", self.api_base_url())
            .env_remove("TICKKK_LOG")
            .output()
            .expect("Failed to execute tickkk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let stdout = self.run_success(args);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("Invalid JSON from {:?}: {e}\n{stdout}", args))
    }

    pub fn session_file_exists(&self) -> bool {
        self.temp_dir.path().join("session.json").exists()
    }
}

/// Anonymous client pointed at `server`'s `/api` prefix.
pub fn client_for(server: &MockServer) -> ApiClient {
    let url = Url::parse(&format!("{}/api", server.uri())).expect("mock server URI");
    ApiClient::new(url).expect("client")
}

pub fn ticket_json(id: u64, subject: &str, status: &str, category: &str) -> Value {
    json!({
        "id": id,
        "subject": subject,
        "description": "Descripción detallada del problema reportado",
        "client_name": format!("Cliente {id}"),
        "client_email": format!("cliente{id}@example.com"),
        "status": status,
        "priority": "media",
        "category": category,
        "comments": [],
        "created_at": "2024-03-01T10:00:00",
    })
}

pub fn user_json(id: u64, username: &str, role: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "full_name": format!("Usuario {username}"),
        "role": role,
        "is_active": is_active,
    })
}

pub fn comment_json(id: u64, ticket_id: u64, text: &str) -> Value {
    json!({
        "id": id,
        "ticket_id": ticket_id,
        "author_name": "Ana",
        "author_email": "ana@example.com",
        "comment_text": text,
        "is_internal": false,
        "created_at": "2024-03-02T09:30:00",
    })
}
