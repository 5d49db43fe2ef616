//! The "count lookup for a query" capability shared by both services.

use crate::error::{PresenceError, Result};
use crate::metric::{MetricResult, Service};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// A remote service that estimates how many records match a query.
#[async_trait]
pub trait CountLookup: Send + Sync {
    /// Service tag used on failures
    fn service(&self) -> Service;

    /// Issue one request and extract the count.
    async fn fetch_count(&self, query: &str) -> Result<u64>;
}

/// Run one lookup, folding any error into a failed `MetricResult`.
///
/// Single attempt, no retry.
pub async fn lookup_count(source: &dyn CountLookup, query: &str) -> MetricResult {
    let service = source.service();
    match source.fetch_count(query).await {
        Ok(count) => {
            debug!(service = %service, query = query, count = count, "Lookup succeeded");
            MetricResult::Count(count)
        }
        Err(e) => {
            warn!(service = %service, query = query, error = %e, "Lookup failed");
            MetricResult::failed(service, e.into())
        }
    }
}

/// Map the response status onto the error taxonomy, then decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: Service,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(PresenceError::Unauthorized(status.as_u16()));
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let detail = response.text().await.unwrap_or_default();
        return Err(PresenceError::RateLimited(format!(
            "{} returned 429 {}",
            service,
            truncate(&detail, 200)
        )));
    }

    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(PresenceError::Api {
            code: status.as_u16(),
            message: format!("{} API error: {}", service, truncate(&detail, 200)),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        PresenceError::Parse(format!("failed to parse {} response: {}", service, e))
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::FailureReason;

    struct Fixed(std::result::Result<u64, String>);

    #[async_trait]
    impl CountLookup for Fixed {
        fn service(&self) -> Service {
            Service::Google
        }

        async fn fetch_count(&self, _query: &str) -> Result<u64> {
            self.0.clone().map_err(PresenceError::Parse)
        }
    }

    #[tokio::test]
    async fn test_success_passes_count_through() {
        let result = lookup_count(&Fixed(Ok(20900)), "Vera Rubin astronomy").await;
        assert_eq!(result, MetricResult::Count(20900));
    }

    #[tokio::test]
    async fn test_error_becomes_tagged_failure() {
        let result = lookup_count(&Fixed(Err("bad body".to_string())), "q").await;
        assert_eq!(
            result,
            MetricResult::failed(
                Service::Google,
                FailureReason::MalformedResponse("bad body".to_string())
            )
        );
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("ééééé", 2), "éé");
    }
}
