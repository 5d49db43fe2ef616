//! NASA ADS search API client.
//!
//! Only the hit count is requested (`rows=0`), so a lookup costs one query
//! against the token's daily allowance regardless of how many papers match.

use crate::error::{OptionExt, PresenceError, Result};
use crate::lookup::{read_json, CountLookup};
use crate::metric::Service;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request timeout, applied per call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// ADS bibliographic count client
pub struct AdsClient {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    delay: Duration,
}

impl AdsClient {
    /// Create a client for `endpoint` authenticating with `token`.
    pub fn new(token: String, endpoint: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PresenceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            token,
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
impl CountLookup for AdsClient {
    fn service(&self) -> Service {
        Service::Ads
    }

    async fn fetch_count(&self, query: &str) -> Result<u64> {
        debug!(query = query, "Querying ADS");

        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(&self.token)
            .query(&[("q", query), ("rows", "0"), ("fl", "id")])
            .send()
            .await?;

        let data: AdsResponse = read_json(Service::Ads, response).await?;
        let count = extract_count(data)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(count)
    }
}

// === ADS API Response Types ===

#[derive(Debug, Deserialize)]
struct AdsResponse {
    #[serde(default)]
    response: Option<AdsResponseBody>,
}

#[derive(Debug, Deserialize)]
struct AdsResponseBody {
    #[serde(rename = "numFound", default)]
    num_found: Option<u64>,
}

fn extract_count(data: AdsResponse) -> Result<u64> {
    data.response
        .and_then(|r| r.num_found)
        .ok_or_parse("ADS response has no response.numFound")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<u64> {
        extract_count(serde_json::from_str(body)?)
    }

    #[test]
    fn test_extract_num_found() -> Result<()> {
        let body = r#"{"responseHeader":{"status":0},"response":{"numFound":180,"start":0,"docs":[]}}"#;
        assert_eq!(parse(body)?, 180);
        Ok(())
    }

    #[test]
    fn test_missing_num_found() {
        assert!(matches!(
            parse(r#"{"response":{"docs":[]}}"#),
            Err(PresenceError::Parse(_))
        ));
        assert!(matches!(parse(r#"{}"#), Err(PresenceError::Parse(_))));
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(parse(r#"{"response":{"numFound":-1}}"#).is_err());
    }
}
