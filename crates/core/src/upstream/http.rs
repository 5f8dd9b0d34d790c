use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::PortfolioDataSource;
use crate::errors::CoreError;
use crate::models::price::PerformancePoint;
use crate::models::snapshot::{PortfolioMetrics, PortfolioSnapshot, TickerData};

/// HTTP client for the portfolio data service.
///
/// Consumes the two JSON endpoints as already-validated payloads; the
/// only checks made here are the `success` envelope flag and the
/// presence of the snapshot's core fields. Both endpoints wrap errors
/// in the same envelope, so the body is parsed regardless of status.
pub struct HttpDataService {
    base_url: String,
    client: Client,
}

impl HttpDataService {
    /// `base_url` is the service root, e.g. `"http://localhost:5000"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { base_url, client }
    }

    async fn get_body(&self, endpoint: &str) -> Result<String, CoreError> {
        let url = format!("{}{endpoint}", self.base_url);
        log::debug!("fetching {url}");
        Ok(self.client.get(&url).send().await?.text().await?)
    }
}

// ── Data service response envelopes ─────────────────────────────────

#[derive(Deserialize)]
struct SnapshotEnvelope {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    error: Option<String>,

    data: Option<HashMap<String, TickerData>>,
    metrics: Option<PortfolioMetrics>,

    #[serde(default)]
    tickers: Vec<String>,
}

#[derive(Deserialize)]
struct PerformanceEnvelope {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    performance: Vec<PerformancePoint>,
}

fn upstream_failure(endpoint: &str, error: Option<String>) -> CoreError {
    let message = error.unwrap_or_else(|| "data service reported failure".to_string());
    log::warn!("{endpoint} failed upstream: {message}");
    CoreError::Upstream(message)
}

#[async_trait]
impl PortfolioDataSource for HttpDataService {
    fn name(&self) -> &str {
        "HttpDataService"
    }

    async fn fetch_snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        const ENDPOINT: &str = "/api/portfolio-data";

        let body = self.get_body(ENDPOINT).await?;
        let envelope: SnapshotEnvelope = serde_json::from_str(&body)?;

        if !envelope.success {
            return Err(upstream_failure(ENDPOINT, envelope.error));
        }

        let (data, metrics) = match (envelope.data, envelope.metrics) {
            (Some(data), Some(metrics)) => (data, metrics),
            _ => {
                return Err(CoreError::Api {
                    endpoint: ENDPOINT.to_string(),
                    message: "successful response is missing data or metrics".to_string(),
                })
            }
        };

        log::debug!(
            "snapshot fetched: {} tickers, {} histories",
            envelope.tickers.len(),
            data.len()
        );

        Ok(PortfolioSnapshot {
            data,
            metrics,
            tickers: envelope.tickers,
        })
    }

    async fn fetch_performance(&self) -> Result<Vec<PerformancePoint>, CoreError> {
        const ENDPOINT: &str = "/api/portfolio-performance";

        let body = self.get_body(ENDPOINT).await?;
        let envelope: PerformanceEnvelope = serde_json::from_str(&body)?;

        if !envelope.success {
            return Err(upstream_failure(ENDPOINT, envelope.error));
        }

        log::debug!("performance fetched: {} points", envelope.performance.len());
        Ok(envelope.performance)
    }
}
