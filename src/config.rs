//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which platforms are queried, the retry budget,
//! per-attempt timeout, reference capping, and caching. How credential
//! strings are obtained (environment, keychain, config file) is the
//! caller's concern; the config merely carries them.

use std::time::Duration;

use crate::error::SearchError;
use crate::types::Platform;

/// Optional API credentials for the platforms that need them.
///
/// Academic and Reddit fetchers use public endpoints and need none.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// SerpAPI key for the Web platform.
    pub serp_api_key: Option<String>,
    /// NewsAPI key for the News platform.
    pub news_api_key: Option<String>,
    /// Bearer token for the Social (X/Twitter) platform.
    pub twitter_bearer_token: Option<String>,
}

/// Configuration for an orchestration run.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Which platforms to query, in the order references are numbered.
    pub platforms: Vec<Platform>,
    /// Result-count hint passed to every fetcher. `None` uses each
    /// platform's own default ([`Platform::default_limit`]).
    pub result_limit: Option<usize>,
    /// Maximum references taken per platform during normalisation.
    pub per_platform_cap: usize,
    /// Extra attempts after a failed fetch. Total attempts per platform
    /// per run are `max_retries + 1`.
    pub max_retries: u32,
    /// Timeout applied to each individual fetch attempt.
    pub attempt_timeout: Duration,
    /// How long to cache per-platform evidence in seconds. Set to 0 to
    /// disable caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Platform API credentials.
    pub credentials: Credentials,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            platforms: Platform::all().to_vec(),
            result_limit: None,
            per_platform_cap: 10,
            max_retries: 2,
            attempt_timeout: Duration::from_secs(25),
            cache_ttl_seconds: 600,
            user_agent: None,
            credentials: Credentials::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `platforms` must not be empty and must not repeat a platform
    /// - `attempt_timeout` must be non-zero
    /// - `per_platform_cap` must be greater than 0
    /// - `result_limit`, when set, must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.platforms.is_empty() {
            return Err(SearchError::Config(
                "at least one platform must be enabled".into(),
            ));
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            if self.platforms[..i].contains(platform) {
                return Err(SearchError::Config(format!(
                    "platform {platform} listed more than once"
                )));
            }
        }
        if self.attempt_timeout.is_zero() {
            return Err(SearchError::Config(
                "attempt_timeout must be greater than zero".into(),
            ));
        }
        if self.per_platform_cap == 0 {
            return Err(SearchError::Config(
                "per_platform_cap must be greater than 0".into(),
            ));
        }
        if self.result_limit == Some(0) {
            return Err(SearchError::Config(
                "result_limit must be greater than 0 when set".into(),
            ));
        }
        Ok(())
    }

    /// The result-count hint to pass to `platform`'s fetcher.
    pub fn limit_for(&self, platform: Platform) -> usize {
        self.result_limit.unwrap_or(platform.default_limit())
    }
}
