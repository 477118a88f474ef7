#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use academic_connector::config::AppConfig;
use academic_connector::testing::FixtureExecutor;
use academic_connector::{app, AppState};

pub const API_KEY: &str = "test-key";

/// Router served on a free local port, backed by canned query results.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub executor: Arc<FixtureExecutor>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(executor: FixtureExecutor) -> Result<Self> {
        Self::spawn_with(config(&[]), executor).await
    }

    pub async fn spawn_with(config: AppConfig, executor: FixtureExecutor) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let executor = Arc::new(executor);
        let state = AppState::new(config, executor.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            executor,
            handle,
        })
    }

    /// GET with a valid api key and optional extra headers.
    pub async fn get(&self, path: &str, headers: &[(&str, &str)]) -> Result<(reqwest::StatusCode, Value)> {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", API_KEY));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status();
        Ok((status, response.json::<Value>().await?))
    }

    pub async fn get_anonymous(&self, path: &str) -> Result<(reqwest::StatusCode, Value)> {
        let response = self.client.get(format!("{}{}", self.base_url, path)).send().await?;
        let status = response.status();
        Ok((status, response.json::<Value>().await?))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Development preset plus the given variables.
pub fn config(vars: &[(&str, &str)]) -> AppConfig {
    let vars: Vec<(String, String)> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(move |key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
        .expect("test config")
}

/// Fixture that accepts any api key as active.
pub fn fixture() -> FixtureExecutor {
    FixtureExecutor::new().on(&["FROM api_key_list"], vec![json!({"id": 1, "name": "test", "active": 1})])
}
