//! Integration tests for the search orchestrator pipeline.
//!
//! These tests exercise the fan-out → retry/timeout → fan-in → normalize
//! pipeline with mock fetchers (no network calls). Fetcher wire formats
//! are covered separately in `fetcher_wire.rs`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crosscheck::orchestrator::search::run_all;
use crosscheck::{
    EvidenceItem, FetcherRegistry, Platform, PlatformQueries, Result, SearchConfig, SearchError,
    SourceFetcher,
};

fn make_item(title: &str, platform: Platform) -> EvidenceItem {
    EvidenceItem {
        title: title.into(),
        link: format!("https://example.com/{title}"),
        snippet: format!("Snippet for {title}"),
        media: vec![],
        published_at: None,
        platform,
    }
}

fn make_items(platform: Platform, count: usize) -> Vec<EvidenceItem> {
    (0..count)
        .map(|i| make_item(&format!("{platform}-{i}"), platform))
        .collect()
}

fn test_config(platforms: Vec<Platform>) -> SearchConfig {
    SearchConfig {
        platforms,
        max_retries: 2,
        attempt_timeout: Duration::from_millis(80),
        cache_ttl_seconds: 0,
        ..Default::default()
    }
}

/// Returns a fixed item list after an optional delay.
struct StaticFetcher {
    platform: Platform,
    items: Vec<EvidenceItem>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticFetcher {
    fn new(platform: Platform, items: Vec<EvidenceItem>) -> Self {
        Self {
            platform,
            items,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    fn slow(platform: Platform, items: Vec<EvidenceItem>, delay: Duration) -> Self {
        Self {
            platform,
            items,
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SourceFetcher for StaticFetcher {
    async fn fetch(
        &self,
        _query: &str,
        _limit: usize,
        _cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.items.clone())
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// Always fails with an HTTP error.
struct FailingFetcher {
    platform: Platform,
    calls: AtomicUsize,
}

impl FailingFetcher {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SourceFetcher for FailingFetcher {
    async fn fetch(
        &self,
        _query: &str,
        _limit: usize,
        _cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SearchError::Http("boom".into()))
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// Never resolves; records every cancellation token it is handed.
struct HangingFetcher {
    platform: Platform,
    calls: AtomicUsize,
    tokens: Mutex<Vec<CancellationToken>>,
}

impl HangingFetcher {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SourceFetcher for HangingFetcher {
    async fn fetch(
        &self,
        _query: &str,
        _limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().expect("lock").push(cancel);
        std::future::pending().await
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

fn registry_of(fetchers: Vec<Arc<dyn SourceFetcher>>) -> FetcherRegistry {
    let mut registry = FetcherRegistry::new();
    for fetcher in fetchers {
        registry.register(fetcher);
    }
    registry
}

#[tokio::test]
async fn timeout_platform_makes_exactly_three_attempts() {
    let hanging = Arc::new(HangingFetcher::new(Platform::Web));
    let registry = registry_of(vec![hanging.clone()]);
    let config = test_config(vec![Platform::Web]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");

    // max_retries = 2 → exactly 3 attempts.
    assert_eq!(hanging.calls.load(Ordering::SeqCst), 3);
    assert!(run.evidence[&Platform::Web].is_empty());

    let outcome = &run.outcomes[&Platform::Web];
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Timeout"));
    assert_eq!(outcome.result_count, 0);
}

#[tokio::test]
async fn abandoned_attempts_are_cancelled() {
    let hanging = Arc::new(HangingFetcher::new(Platform::News));
    let registry = registry_of(vec![hanging.clone()]);
    let config = test_config(vec![Platform::News]);

    run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");

    let tokens = hanging.tokens.lock().expect("lock");
    assert_eq!(tokens.len(), 3);
    for token in tokens.iter() {
        assert!(token.is_cancelled(), "abandoned attempt left uncancelled");
    }
}

#[tokio::test]
async fn evidence_keys_cover_configured_set_despite_failures() {
    let registry = registry_of(vec![
        Arc::new(StaticFetcher::new(Platform::Web, make_items(Platform::Web, 3))),
        Arc::new(FailingFetcher::new(Platform::News)),
        Arc::new(HangingFetcher::new(Platform::Reddit)),
    ]);
    let config = test_config(vec![Platform::Web, Platform::News, Platform::Reddit]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");

    for platform in [Platform::Web, Platform::News, Platform::Reddit] {
        assert!(run.evidence.contains_key(&platform), "{platform} missing");
        assert!(run.outcomes.contains_key(&platform), "{platform} missing");
    }
    assert_eq!(run.evidence[&Platform::Web].len(), 3);
    assert!(run.evidence[&Platform::News].is_empty());
    assert!(run.evidence[&Platform::Reddit].is_empty());
}

#[tokio::test]
async fn all_platforms_failing_is_still_a_valid_run() {
    let registry = registry_of(vec![
        Arc::new(FailingFetcher::new(Platform::Web)),
        Arc::new(FailingFetcher::new(Platform::News)),
    ]);
    let config = test_config(vec![Platform::Web, Platform::News]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("an all-empty evidence map is a valid outcome");

    assert!(run.evidence.values().all(|items| items.is_empty()));
    assert!(run.outcomes.values().all(|outcome| !outcome.success));
    assert!(run.references(10).is_empty());
}

#[tokio::test]
async fn slow_platform_does_not_block_fast_one() {
    let fast = Arc::new(StaticFetcher::new(
        Platform::Web,
        make_items(Platform::Web, 2),
    ));
    let slow = Arc::new(StaticFetcher::slow(
        Platform::News,
        make_items(Platform::News, 1),
        Duration::from_millis(40),
    ));
    let registry = registry_of(vec![fast, slow]);
    let config = test_config(vec![Platform::Web, Platform::News]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");

    // Both contributed; the slow platform only delayed its own slot.
    assert_eq!(run.evidence[&Platform::Web].len(), 2);
    assert_eq!(run.evidence[&Platform::News].len(), 1);
    assert!(run.outcomes[&Platform::Web].elapsed < run.outcomes[&Platform::News].elapsed);
}

#[tokio::test]
async fn failure_outcome_records_error_cause() {
    let failing = Arc::new(FailingFetcher::new(Platform::Academic));
    let registry = registry_of(vec![failing.clone()]);
    let config = test_config(vec![Platform::Academic]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");

    assert_eq!(failing.calls.load(Ordering::SeqCst), 3);
    let outcome = &run.outcomes[&Platform::Academic];
    assert_eq!(outcome.error.as_deref(), Some("HTTP error: boom"));
}

#[tokio::test]
async fn successful_platform_is_queried_once() {
    let fetcher = Arc::new(StaticFetcher::new(
        Platform::Social,
        make_items(Platform::Social, 4),
    ));
    let registry = registry_of(vec![fetcher.clone()]);
    let config = test_config(vec![Platform::Social]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(run.outcomes[&Platform::Social].result_count, 4);
}

#[tokio::test]
async fn platform_overrides_reach_the_right_fetcher() {
    struct QueryCapture {
        platform: Platform,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SourceFetcher for QueryCapture {
        async fn fetch(
            &self,
            query: &str,
            _limit: usize,
            _cancel: CancellationToken,
        ) -> Result<Vec<EvidenceItem>> {
            self.seen.lock().expect("lock").push(query.to_string());
            Ok(vec![])
        }

        fn platform(&self) -> Platform {
            self.platform
        }
    }

    let academic = Arc::new(QueryCapture {
        platform: Platform::Academic,
        seen: Mutex::new(Vec::new()),
    });
    let web = Arc::new(QueryCapture {
        platform: Platform::Web,
        seen: Mutex::new(Vec::new()),
    });
    let registry = registry_of(vec![academic.clone(), web.clone()]);
    let config = test_config(vec![Platform::Web, Platform::Academic]);

    let queries = PlatformQueries::uniform("rust memory safety")
        .with_override(Platform::Academic, "memory safety formal methods");
    run_all(&registry, &queries, &config)
        .await
        .expect("run should not fail");

    assert_eq!(
        academic.seen.lock().expect("lock").as_slice(),
        ["memory safety formal methods"]
    );
    assert_eq!(
        web.seen.lock().expect("lock").as_slice(),
        ["rust memory safety"]
    );
}

#[tokio::test]
async fn reference_numbering_matches_platform_order_and_cap() {
    let registry = registry_of(vec![
        Arc::new(StaticFetcher::new(
            Platform::Web,
            make_items(Platform::Web, 12),
        )),
        Arc::new(StaticFetcher::new(
            Platform::News,
            make_items(Platform::News, 7),
        )),
    ]);
    let config = test_config(vec![Platform::Web, Platform::News]);

    let run = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail");
    let references = run.references(10);

    // Web capped at 10 → numbers 1–10; News keeps 7 → numbers 11–17.
    assert_eq!(references.len(), 17);
    for (i, reference) in references.iter().enumerate() {
        assert_eq!(reference.number, i + 1);
    }
    assert!(references[..10]
        .iter()
        .all(|r| r.item.platform == Platform::Web));
    assert!(references[10..]
        .iter()
        .all(|r| r.item.platform == Platform::News));
}

#[tokio::test]
async fn identical_runs_produce_identical_references() {
    let registry = registry_of(vec![
        Arc::new(StaticFetcher::new(
            Platform::Reddit,
            make_items(Platform::Reddit, 5),
        )),
        Arc::new(StaticFetcher::new(
            Platform::Academic,
            make_items(Platform::Academic, 5),
        )),
    ]);
    let config = test_config(vec![Platform::Academic, Platform::Reddit]);

    let first = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail")
        .references(10);
    let second = run_all(&registry, &PlatformQueries::uniform("q"), &config)
        .await
        .expect("run should not fail")
        .references(10);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.number, b.number);
        assert_eq!(a.item.title, b.item.title);
    }
}

#[tokio::test]
async fn cached_evidence_skips_the_fetcher() {
    let fetcher = Arc::new(StaticFetcher::new(
        Platform::Web,
        make_items(Platform::Web, 2),
    ));
    let registry = registry_of(vec![fetcher.clone()]);
    let config = SearchConfig {
        cache_ttl_seconds: 600,
        ..test_config(vec![Platform::Web])
    };
    // Query unique to this test so no other cache entry collides.
    let queries = PlatformQueries::uniform("orchestrator_cache_test_query");

    let first = run_all(&registry, &queries, &config)
        .await
        .expect("run should not fail");
    let second = run_all(&registry, &queries, &config)
        .await
        .expect("run should not fail");

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        first.evidence[&Platform::Web].len(),
        second.evidence[&Platform::Web].len()
    );
    assert!(second.outcomes[&Platform::Web].success);
}
