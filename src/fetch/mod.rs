//! Pluggable per-platform evidence fetchers.
//!
//! Each platform backend implements [`SourceFetcher`] to provide a uniform
//! interface for querying and parsing evidence. A [`FetcherRegistry`] maps
//! platforms to their fetchers; the orchestrator resolves the configured
//! platform set against it before launching any task.

pub mod academic;
pub mod news;
pub mod reddit;
pub(crate) mod snippet;
pub mod social;
pub mod web;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{EvidenceItem, Platform};

pub use academic::AcademicFetcher;
pub use news::NewsFetcher;
pub use reddit::RedditFetcher;
pub use social::SocialFetcher;
pub use web::WebFetcher;

/// A pluggable platform evidence backend.
///
/// Implementors query a specific platform and extract structured
/// [`EvidenceItem`] values. Each fetcher handles its own:
///
/// - Request URL construction with query encoding
/// - HTTP request with appropriate headers/credentials
/// - Response parsing into evidence items
///
/// Fetchers must not hold orchestrator-internal state, and must be
/// `Send + Sync` for concurrent platform queries. The cancellation token
/// is cancelled when the orchestrator stops waiting on an attempt; a
/// well-behaved fetcher stops work promptly when it fires.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Query the platform and return parsed evidence items.
    ///
    /// `limit` is a result-count hint; fetchers may return fewer items.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the response cannot
    /// be parsed, a required credential is missing, or `cancel` fires.
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>>;

    /// Which [`Platform`] this fetcher serves.
    fn platform(&self) -> Platform;
}

/// Race a fetch body against its cancellation token.
///
/// Resolves to the body's result, or [`SearchError::Timeout`] as soon as
/// the token is cancelled. The body future is dropped on cancellation, so
/// an in-flight request is actually torn down rather than left running.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        res = fut => res,
        () = cancel.cancelled() => Err(SearchError::Timeout("fetch cancelled".into())),
    }
}

/// Maps platforms to their evidence fetchers.
///
/// Built from config for the five concrete backends, or assembled by hand
/// when callers bring their own [`SourceFetcher`] implementations.
#[derive(Default)]
pub struct FetcherRegistry {
    fetchers: HashMap<Platform, Arc<dyn SourceFetcher>>,
}

impl FetcherRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fetcher under its own platform, replacing any previous one.
    pub fn register(&mut self, fetcher: Arc<dyn SourceFetcher>) {
        self.fetchers.insert(fetcher.platform(), fetcher);
    }

    /// Look up the fetcher for `platform`.
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn SourceFetcher>> {
        self.fetchers.get(&platform).cloned()
    }

    /// Build a registry covering `config.platforms` with the concrete
    /// backends, sharing one HTTP client across all of them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the shared client cannot be built.
    /// Missing credentials are *not* an error here — the affected fetcher
    /// fails at fetch time and the orchestrator degrades that platform.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let client = http::build_client(config)?;
        let mut registry = Self::new();
        for &platform in &config.platforms {
            let fetcher: Arc<dyn SourceFetcher> = match platform {
                Platform::Web => Arc::new(WebFetcher::new(
                    client.clone(),
                    config.credentials.serp_api_key.clone(),
                )),
                Platform::News => Arc::new(NewsFetcher::new(
                    client.clone(),
                    config.credentials.news_api_key.clone(),
                )),
                Platform::Social => Arc::new(SocialFetcher::new(
                    client.clone(),
                    config.credentials.twitter_bearer_token.clone(),
                )),
                Platform::Academic => Arc::new(AcademicFetcher::new(client.clone())),
                Platform::Reddit => Arc::new(RedditFetcher::new(client.clone())),
            };
            registry.register(fetcher);
        }
        Ok(registry)
    }

    /// Resolve every platform in `platforms` to its fetcher, rejecting the
    /// whole run if any is missing. Keeps "fetcher not registered" a config
    /// error rather than a per-platform runtime failure.
    pub(crate) fn resolve(
        &self,
        platforms: &[Platform],
    ) -> Result<Vec<(Platform, Arc<dyn SourceFetcher>)>> {
        platforms
            .iter()
            .map(|&platform| {
                self.get(platform)
                    .map(|fetcher| (platform, fetcher))
                    .ok_or_else(|| {
                        SearchError::Config(format!("no fetcher registered for {platform}"))
                    })
            })
            .collect()
    }
}
