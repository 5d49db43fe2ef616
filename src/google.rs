//! Google Programmable Search client.
//!
//! The JSON API reports `searchInformation.totalResults` as a decimal string.

use crate::config::GoogleCredentials;
use crate::error::{PresenceError, Result};
use crate::lookup::{read_json, CountLookup};
use crate::metric::Service;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request timeout, applied per call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Web search result-estimate client
pub struct GoogleSearchClient {
    client: reqwest::Client,
    endpoint: Url,
    credentials: GoogleCredentials,
    delay: Duration,
}

impl GoogleSearchClient {
    pub fn new(credentials: GoogleCredentials, endpoint: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PresenceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            credentials,
            delay: Duration::ZERO,
        })
    }

    /// Pause for `delay` after every successful request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl CountLookup for GoogleSearchClient {
    fn service(&self) -> Service {
        Service::Google
    }

    async fn fetch_count(&self, query: &str) -> Result<u64> {
        debug!(query = query, "Querying Google search");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("cx", self.credentials.cx.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let data: SearchResponse = read_json(Service::Google, response).await?;
        let count = extract_total(data)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(count)
    }
}

// === Custom Search API Response Types ===

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "searchInformation", default)]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(rename = "totalResults", default)]
    total_results: Option<serde_json::Value>,
}

fn extract_total(data: SearchResponse) -> Result<u64> {
    let value = data
        .search_information
        .and_then(|info| info.total_results)
        .ok_or_else(|| {
            PresenceError::Parse(
                "Google response has no searchInformation.totalResults".to_string(),
            )
        })?;

    let count = match &value {
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    };

    count.ok_or_else(|| PresenceError::Parse(format!("invalid totalResults value: {}", value)))
}
