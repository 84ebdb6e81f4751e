//! In-memory TTL cache for per-platform evidence.
//!
//! Caches each platform's raw evidence list keyed by the
//! (platform, lowercased query, limit) triple. Uses [`moka`] for
//! async-friendly caching with automatic eviction. A cache hit bypasses
//! the fetch and its retry loop; the evidence itself is still copied into
//! fresh per-run state, so concurrent runs never share mutable data.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::types::{EvidenceItem, Platform};

/// Maximum number of cached evidence lists.
const MAX_CACHE_ENTRIES: u64 = 200;

/// Global process-wide evidence cache.
///
/// Lazily initialised on first access. TTL is set when first created
/// and cannot be changed after initialisation.
static CACHE: OnceLock<Cache<CacheKey, Vec<EvidenceItem>>> = OnceLock::new();

/// Composite cache key: platform + normalised query + result limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    platform: Platform,
    /// Lowercased, trimmed query string.
    query: String,
    limit: usize,
}

impl CacheKey {
    /// Build a deterministic cache key. The query is lowercased and
    /// trimmed so that cosmetic differences share an entry.
    pub fn new(platform: Platform, query: &str, limit: usize) -> Self {
        Self {
            platform,
            query: query.trim().to_lowercase(),
            limit,
        }
    }
}

/// Get or initialise the global cache with the given TTL.
///
/// The TTL is only used on the **first** call; subsequent calls reuse
/// the existing cache regardless of the TTL argument.
fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<CacheKey, Vec<EvidenceItem>> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up cached evidence for the given key.
///
/// Returns `Some(items)` on cache hit, `None` on miss.
pub async fn get(key: &CacheKey, ttl_seconds: u64) -> Option<Vec<EvidenceItem>> {
    let cache = get_or_init_cache(ttl_seconds);
    cache.get(key).await
}

/// Insert an evidence list into the cache.
pub async fn insert(key: CacheKey, items: Vec<EvidenceItem>, ttl_seconds: u64) {
    let cache = get_or_init_cache(ttl_seconds);
    cache.insert(key, items).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(title: &str) -> EvidenceItem {
        EvidenceItem {
            title: title.into(),
            link: format!("https://example.com/{title}"),
            snippet: "cached snippet".into(),
            media: vec![],
            published_at: None,
            platform: Platform::Web,
        }
    }

    #[test]
    fn cache_key_deterministic_for_same_inputs() {
        let key1 = CacheKey::new(Platform::Web, "rust programming", 10);
        let key2 = CacheKey::new(Platform::Web, "rust programming", 10);
        assert_eq!(key1, key2);
    }

    #[test]
    fn cache_key_differs_when_platform_differs() {
        let key1 = CacheKey::new(Platform::Web, "rust", 10);
        let key2 = CacheKey::new(Platform::News, "rust", 10);
        assert_ne!(key1, key2);
    }

    #[test]
    fn cache_key_differs_when_limit_differs() {
        let key1 = CacheKey::new(Platform::Web, "rust", 10);
        let key2 = CacheKey::new(Platform::Web, "rust", 12);
        assert_ne!(key1, key2);
    }

    #[test]
    fn cache_key_normalises_query_case_and_whitespace() {
        let key1 = CacheKey::new(Platform::Web, "  RUST Programming ", 10);
        let key2 = CacheKey::new(Platform::Web, "rust programming", 10);
        assert_eq!(key1, key2);
    }

    #[tokio::test]
    async fn cache_miss_returns_none() {
        let key = CacheKey::new(Platform::Academic, "nonexistent_query_xyz123", 10);
        assert!(get(&key, 600).await.is_none());
    }

    #[tokio::test]
    async fn cache_insert_and_retrieve() {
        let key = CacheKey::new(Platform::Web, "cache_test_insert_retrieve", 10);
        insert(key.clone(), vec![make_item("cached")], 600).await;

        let cached = get(&key, 600).await.expect("should be cached");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].title, "cached");
    }

    #[tokio::test]
    async fn overwrite_same_key_updates_value() {
        let key = CacheKey::new(Platform::Reddit, "cache_test_overwrite", 10);
        insert(key.clone(), vec![make_item("old")], 600).await;
        insert(key.clone(), vec![make_item("new")], 600).await;

        let cached = get(&key, 600).await.expect("should be cached");
        assert_eq!(cached[0].title, "new");
    }

    #[tokio::test]
    async fn queries_cached_independently() {
        let key_a = CacheKey::new(Platform::News, "cache_test_independent_a", 7);
        let key_b = CacheKey::new(Platform::News, "cache_test_independent_b", 7);
        insert(key_a.clone(), vec![make_item("a")], 600).await;
        insert(key_b.clone(), vec![make_item("b")], 600).await;

        assert_eq!(get(&key_a, 600).await.expect("a cached")[0].title, "a");
        assert_eq!(get(&key_b, 600).await.expect("b cached")[0].title, "b");
    }
}
