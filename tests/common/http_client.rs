//! HTTP client helpers for tests.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SynonymResponse {
    pub synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankResponse {
    pub synonyms: Vec<String>,
    pub scores: Vec<f32>,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn expect_ok(resp: reqwest::Response) -> Result<reqwest::Response, TestClientError> {
        let status = resp.status().as_u16();
        if status == 200 {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Ok(Self::expect_ok(resp).await?.json().await?)
    }

    pub async fn get_synonym(
        &self,
        word: &str,
        synonyms: &[&str],
    ) -> Result<SynonymResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/synonym/getSynonym"))
            .json(&json!({ "word": word, "synonyms": synonyms }))
            .send()
            .await?;
        Ok(Self::expect_ok(resp).await?.json().await?)
    }

    pub async fn rank(
        &self,
        candidates: &[&str],
        context: &[&str],
    ) -> Result<RankResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/synonym/rank"))
            .json(&json!({ "candidates": candidates, "context": context }))
            .send()
            .await?;
        Ok(Self::expect_ok(resp).await?.json().await?)
    }

    pub async fn post_raw(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, TestClientError> {
        Ok(self.client.post(self.url(path)).json(&body).send().await?)
    }
}
