//! HTTP client for a running Docket server

use anyhow::{bail, Context, Result};
use docket_models::LegalCase;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub results: Vec<LegalCase>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

/// Outcome of posting one case.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(LegalCase),
    /// A case with the same number already exists.
    Conflict,
    Rejected { status: StatusCode, detail: String },
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `status` field of `GET /health`.
    pub async fn health(&self) -> Result<String> {
        let body: Value = self.get_json("/health").await?;
        Ok(body["status"].as_str().unwrap_or("unknown").to_string())
    }

    pub async fn create_case(&self, case: &Value) -> Result<CreateOutcome> {
        let response = self
            .client
            .post(format!("{}/cases", self.base_url))
            .json(case)
            .send()
            .await
            .context("POST /cases")?;

        match response.status() {
            StatusCode::CREATED => Ok(CreateOutcome::Created(response.json().await?)),
            StatusCode::CONFLICT => Ok(CreateOutcome::Conflict),
            status => Ok(CreateOutcome::Rejected {
                status,
                detail: error_detail(response).await,
            }),
        }
    }

    pub async fn get_case(&self, id: &str) -> Result<LegalCase> {
        self.get_json(&format!("/cases/{}", urlencoding::encode(id)))
            .await
    }

    /// `GET /search` with the given `(name, value)` parameters.
    pub async fn search(&self, params: &[(&str, String)]) -> Result<SearchPage> {
        let query = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let path = if query.is_empty() {
            "/search".to_string()
        } else {
            format!("/search?{query}")
        };
        self.get_json(&path).await
    }

    pub async fn suggest(&self, field: &str) -> Result<Vec<String>> {
        self.get_json(&format!("/search/suggest/{}", urlencoding::encode(field)))
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("GET {} failed ({}): {}", path, status, error_detail(response).await);
        }
        response
            .json()
            .await
            .with_context(|| format!("decode response of GET {path}"))
    }
}

/// `detail` of an API error body, or the raw body when it is not one.
async fn error_detail(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body["detail"].as_str().map(str::to_string))
        .unwrap_or(text)
}
