//! Per-researcher aggregation of the two counts.
//!
//! Rows come out in input order, one per name, whether or not the lookups
//! succeeded.

use crate::lookup::{lookup_count, CountLookup};
use crate::metric::{FailureReason, MetricResult, Service};
use crate::query::{build_queries, QueryFilters};
use tracing::{info, warn};

/// Both counts for one researcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub name: String,
    /// Bibliographic record count
    pub ads_count: MetricResult,
    /// Web search result estimate
    pub web_count: MetricResult,
}

impl ResultRow {
    /// Both counts, if both lookups succeeded
    pub fn counts(&self) -> Option<(u64, u64)> {
        Some((self.ads_count.count()?, self.web_count.count()?))
    }
}

/// Join the two lookup outcomes for `name` into a row.
pub fn aggregate(name: String, ads_count: MetricResult, web_count: MetricResult) -> ResultRow {
    ResultRow {
        name,
        ads_count,
        web_count,
    }
}

/// Look up every researcher, one at a time, in input order.
///
/// `search` is None when web search credentials are not configured; the
/// web column is then a `NotConfigured` failure for every row.
pub async fn survey(
    names: &[String],
    filters: &QueryFilters,
    ads: &dyn CountLookup,
    search: Option<&dyn CountLookup>,
) -> Vec<ResultRow> {
    if search.is_none() {
        warn!("Web search credentials not configured, search counts will be left empty");
    }

    let mut rows = Vec::with_capacity(names.len());

    for (idx, name) in names.iter().enumerate() {
        info!(
            researcher = %name,
            index = idx + 1,
            total = names.len(),
            "Processing researcher"
        );

        let queries = build_queries(name, filters);
        let ads_count = lookup_count(ads, &queries.metrics).await;
        let web_count = match search {
            Some(source) => lookup_count(source, &queries.search).await,
            None => MetricResult::failed(Service::Google, FailureReason::NotConfigured),
        };

        rows.push(aggregate(name.clone(), ads_count, web_count));
    }

    let ads_failures = rows.iter().filter(|r| r.ads_count.is_failed()).count();
    let web_failures = rows.iter().filter(|r| r.web_count.is_failed()).count();
    info!(
        rows = rows.len(),
        ads_failures = ads_failures,
        web_failures = web_failures,
        "Survey complete"
    );

    rows
}
