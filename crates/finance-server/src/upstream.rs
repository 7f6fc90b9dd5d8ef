//! Client for the spreadsheet script endpoint

use anyhow::{Context, Result};
use finance_core::{Dataset, Schema};
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::SourceConfig;

/// The single upstream the proxy and the report read from
pub struct Upstream {
    client: reqwest::Client,
    url: String,
}

impl Upstream {
    /// No retries; the timeout applies only when configured
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = source.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, &source.url))
    }

    pub fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and decode its JSON body as-is
    pub async fn fetch_json(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("Upstream request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Upstream returned HTTP {}", status);
        }

        response.json().await.context("Upstream body is not valid JSON")
    }

    /// Fetch and normalize; a body that is not an array is an error
    pub async fn fetch_dataset(&self, schema: Schema) -> Result<Dataset> {
        let body = self.fetch_json().await?;
        let dataset = Dataset::from_value(body, schema)?;

        let report = dataset.report();
        tracing::debug!(total = report.total, kept = report.kept, "Normalized upstream rows");
        if report.dropped > 0 {
            tracing::warn!(
                dropped = report.dropped,
                total = report.total,
                "Ignored rows without a usable year"
            );
        }

        Ok(dataset)
    }
}
