#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();
static USER_COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

/// Database used by the spawned server. Integration tests are skipped without one.
fn database_url() -> Option<String> {
    let _ = dotenvy::dotenv();
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_merch-store"));
        cmd.env("APP_ENV", "development")
            .env("MERCH_API_PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("SECURITY_BCRYPT_COST", "4")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Spawned server, or `None` when no database is configured
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let server = SERVER.get_or_init(|| {
        database_url().map(|url| TestServer::spawn(&url).expect("failed to spawn server binary"))
    });

    match server {
        Some(server) => {
            server.wait_ready(Duration::from_secs(15)).await?;
            Ok(Some(server))
        }
        None => {
            eprintln!("DATABASE_URL not set, skipping integration test");
            Ok(None)
        }
    }
}

/// Username that does not collide across tests or runs
pub fn unique_user(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let n = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}_{}_{}_{}", prefix, std::process::id(), nanos, n)
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(server: &TestServer) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: server.base_url.clone(),
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/api/register", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn auth(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/api/auth", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Register and authenticate, returning the bearer token
    pub async fn signup(&self, username: &str) -> Result<String> {
        let res = self.register(username, "pw").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

        let res = self.auth(username, "pw").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "auth failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("auth response has no token")
    }

    pub async fn info(&self, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}/api/info", self.base_url))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn info_json(&self, token: &str) -> Result<Value> {
        let res = self.info(token).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "info failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn send_coin(&self, token: &str, to_user: &str, amount: i64) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/api/sendCoin", self.base_url))
            .bearer_auth(token)
            .json(&json!({ "toUser": to_user, "amount": amount }))
            .send()
            .await?)
    }

    pub async fn buy(&self, token: &str, item: &str, amount: i64) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/api/buy/{}", self.base_url, item))
            .bearer_auth(token)
            .json(&json!({ "amount": amount }))
            .send()
            .await?)
    }
}
