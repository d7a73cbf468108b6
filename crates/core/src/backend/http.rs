use crate::backend::error::{BackendError, Operation};
use crate::backend::AnalysisBackend;
use crate::config::Settings;
use crate::domain::analysis::AnalysisResult;
use crate::domain::request::SearchRequest;
use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_ANALYZE_PATH: &str = "/analyze";
const DEFAULT_FORWARD_PATH: &str = "/send-telegram";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
    analyze_path: String,
    forward_path: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HealthResponse {
    message: String,
}

impl HttpBackend {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let analyze_path = env_path("NEWSDESK_ANALYZE_PATH", DEFAULT_ANALYZE_PATH);
        let forward_path = env_path("NEWSDESK_FORWARD_PATH", DEFAULT_FORWARD_PATH);

        // No timeout unless configured; a hung analyze call keeps the session loading.
        let timeout = std::env::var("NEWSDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build backend http client")?;

        Ok(Self {
            http,
            base_url: settings.backend_url()?,
            analyze_path,
            forward_path,
        })
    }

    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid backend url: {base_url}"))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            forward_path: DEFAULT_FORWARD_PATH.to_string(),
        })
    }

    /// Origin that relative chart paths are resolved against.
    pub fn origin(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        path: &str,
        body: &T,
    ) -> Result<String> {
        let res = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError {
                operation,
                stage: "request",
                detail: e.to_string(),
                status: None,
                raw_body: None,
            })?;

        read_success_body(operation, res).await
    }

    pub async fn health(&self) -> Result<String> {
        let res = self
            .http
            .get(self.url("/"))
            .send()
            .await
            .context("backend health request failed")?;
        let text = read_success_body(Operation::Health, res).await?;
        let parsed = serde_json::from_str::<HealthResponse>(&text)
            .with_context(|| format!("health response is not the expected JSON: {text}"))?;
        Ok(parsed.message)
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, request: &SearchRequest) -> Result<AnalysisResult> {
        let text = self
            .post_json(Operation::Analyze, &self.analyze_path, request)
            .await?;

        let result = match serde_json::from_str::<AnalysisResult>(&text) {
            Ok(result) => result,
            Err(e) => return Err(rejected_body("parse", e.to_string(), text)),
        };
        if let Err(e) = result.validate() {
            return Err(rejected_body("validate", format!("{e:#}"), text));
        }
        Ok(result)
    }

    async fn forward(&self, result: &AnalysisResult) -> Result<()> {
        self.post_json(Operation::Forward, &self.forward_path, result)
            .await?;
        Ok(())
    }
}

async fn read_success_body(operation: Operation, res: reqwest::Response) -> Result<String> {
    let status = res.status();
    let text = res.text().await.map_err(|e| BackendError {
        operation,
        stage: "read",
        detail: e.to_string(),
        status: Some(status.as_u16()),
        raw_body: None,
    })?;

    if !status.is_success() {
        return Err(BackendError {
            operation,
            stage: "http",
            detail: format!("status={status}"),
            status: Some(status.as_u16()),
            raw_body: Some(text),
        }
        .into());
    }

    Ok(text)
}

/// A 2xx analyze body that could not be turned into a result.
fn rejected_body(stage: &'static str, detail: String, text: String) -> anyhow::Error {
    BackendError {
        operation: Operation::Analyze,
        stage,
        detail,
        status: Some(StatusCode::OK.as_u16()),
        raw_body: Some(text),
    }
    .into()
}

fn env_path(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
