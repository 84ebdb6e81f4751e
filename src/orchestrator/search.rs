//! Concurrent multi-platform fan-out with bulkhead isolation.
//!
//! One task per configured platform, launched together and joined with
//! [`futures::future::join_all`]. Each task owns its retry loop and
//! per-attempt timeout; a slow or failing platform degrades only its own
//! slot to an empty evidence list. The run completes once every platform
//! reaches a terminal state, so total latency is bounded by the slowest
//! platform's retry budget, never the sum over platforms.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::cache::{self, CacheKey};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::fetch::{FetcherRegistry, SourceFetcher};
use crate::types::{EvidenceItem, Platform, PlatformQueries, SearchOutcome, SearchRun};

/// Error string recorded when the final attempt timed out.
const TIMEOUT_CAUSE: &str = "Timeout";

/// Query every configured platform concurrently and collect evidence
/// plus per-platform outcome metrics.
///
/// The returned maps are keyed by the full configured platform set
/// regardless of which platforms failed. Outcomes are observability
/// only; they never influence evidence content.
///
/// # Errors
///
/// Returns an error only for invalid configuration or an unregistered
/// platform. Per-platform fetch failures never fail the run — an
/// all-empty evidence map is a valid outcome.
pub async fn run_all(
    registry: &FetcherRegistry,
    queries: &PlatformQueries,
    config: &SearchConfig,
) -> Result<SearchRun> {
    config.validate()?;
    let fetchers = registry.resolve(&config.platforms)?;

    // Fan out: one task per platform, all launched here, all joined below.
    let tasks: Vec<_> = fetchers
        .into_iter()
        .map(|(platform, fetcher)| {
            let query = queries.get(platform).to_string();
            async move {
                let (items, outcome) = query_platform(platform, fetcher, &query, config).await;
                (platform, items, outcome)
            }
        })
        .collect();

    let results = futures::future::join_all(tasks).await;

    let mut evidence: HashMap<Platform, Vec<EvidenceItem>> = HashMap::new();
    let mut outcomes: HashMap<Platform, SearchOutcome> = HashMap::new();
    for (platform, items, outcome) in results {
        tracing::debug!(
            %platform,
            count = items.len(),
            success = outcome.success,
            "platform task finished"
        );
        evidence.insert(platform, items);
        outcomes.insert(platform, outcome);
    }

    Ok(SearchRun {
        evidence,
        outcomes,
        platform_order: config.platforms.clone(),
    })
}

/// Run one platform's fetch under the retry/timeout policy.
///
/// Up to `max_retries + 1` attempts. A success returns immediately; a
/// failed or timed-out attempt retries at once with no backoff. When the
/// budget is exhausted the platform degrades to an empty list with a
/// failure outcome — never an error.
async fn query_platform(
    platform: Platform,
    fetcher: Arc<dyn SourceFetcher>,
    query: &str,
    config: &SearchConfig,
) -> (Vec<EvidenceItem>, SearchOutcome) {
    let limit = config.limit_for(platform);
    let started = Instant::now();

    let cache_key = CacheKey::new(platform, query, limit);
    if config.cache_ttl_seconds > 0 {
        if let Some(items) = cache::get(&cache_key, config.cache_ttl_seconds).await {
            tracing::debug!(%platform, count = items.len(), "evidence cache hit");
            let outcome = SearchOutcome::success(started.elapsed(), items.len());
            return (items, outcome);
        }
    }

    let attempts = config.max_retries + 1;
    let mut cause = String::new();

    for attempt in 1..=attempts {
        let cancel = CancellationToken::new();
        let fetch = fetcher.fetch(query, limit, cancel.clone());

        match tokio::time::timeout(config.attempt_timeout, fetch).await {
            Ok(Ok(items)) => {
                let elapsed = started.elapsed();
                tracing::debug!(%platform, count = items.len(), ?elapsed, "fetch succeeded");
                if config.cache_ttl_seconds > 0 {
                    cache::insert(cache_key, items.clone(), config.cache_ttl_seconds).await;
                }
                let outcome = SearchOutcome::success(elapsed, items.len());
                return (items, outcome);
            }
            Ok(Err(err)) => {
                tracing::warn!(%platform, error = %err, attempt, attempts, "fetch attempt failed");
                cause = err.to_string();
            }
            Err(_) => {
                // Tell the abandoned attempt to stop instead of merely
                // ceasing to await it.
                cancel.cancel();
                tracing::warn!(%platform, attempt, attempts, "fetch attempt timed out");
                cause = TIMEOUT_CAUSE.to_string();
            }
        }
    }

    let elapsed = started.elapsed();
    tracing::warn!(%platform, error = %cause, ?elapsed, "platform degraded to empty evidence");
    (Vec::new(), SearchOutcome::failure(elapsed, cause))
}
