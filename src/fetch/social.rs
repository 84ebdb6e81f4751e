//! Social platform fetcher backed by the X/Twitter v2 recent-search API.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SearchError};
use crate::fetch::{cancellable, snippet, SourceFetcher};
use crate::types::{EvidenceItem, Platform};

use serde::Deserialize;

const RECENT_SEARCH_ENDPOINT: &str = "https://api.twitter.com/2/tweets/search/recent";

/// The v2 recent-search API only accepts `max_results` in 10..=100.
const API_MIN_RESULTS: usize = 10;
const API_MAX_RESULTS: usize = 100;

/// X/Twitter recent-post search backend.
pub struct SocialFetcher {
    client: reqwest::Client,
    bearer_token: Option<String>,
    base_url: String,
}

impl SocialFetcher {
    pub fn new(client: reqwest::Client, bearer_token: Option<String>) -> Self {
        Self {
            client,
            bearer_token,
            base_url: RECENT_SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint, primarily for tests against a local
    /// mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SourceFetcher for SocialFetcher {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        let token = self.bearer_token.as_deref().ok_or_else(|| {
            SearchError::Credentials("Twitter bearer token is not configured".into())
        })?;
        tracing::trace!(query, limit, "social search");

        let max_results = limit.clamp(API_MIN_RESULTS, API_MAX_RESULTS).to_string();
        let request = async {
            let response = self
                .client
                .get(&self.base_url)
                .bearer_auth(token)
                .query(&[
                    ("query", query),
                    ("max_results", max_results.as_str()),
                    ("tweet.fields", "created_at,author_id"),
                    ("expansions", "author_id"),
                    ("user.fields", "username"),
                ])
                .send()
                .await
                .map_err(|e| SearchError::Http(format!("Twitter request failed: {e}")))?
                .error_for_status()
                .map_err(|e| SearchError::Http(format!("Twitter HTTP error: {e}")))?;

            response
                .json::<TweetResponse>()
                .await
                .map_err(|e| SearchError::Parse(format!("Twitter response decode failed: {e}")))
        };

        let body = cancellable(&cancel, request).await?;
        let mut items = evidence_from_tweets(body);
        // The API minimum may exceed the caller's hint.
        items.truncate(limit);
        Ok(items)
    }

    fn platform(&self) -> Platform {
        Platform::Social
    }
}

#[derive(Debug, Deserialize)]
struct TweetResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    includes: Option<TweetIncludes>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    #[serde(default)]
    text: String,
    author_id: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TweetIncludes {
    #[serde(default)]
    users: Vec<TweetUser>,
}

#[derive(Debug, Deserialize)]
struct TweetUser {
    id: String,
    username: String,
}

/// Convert a decoded recent-search response into evidence items.
fn evidence_from_tweets(body: TweetResponse) -> Vec<EvidenceItem> {
    let users: HashMap<String, String> = body
        .includes
        .into_iter()
        .flat_map(|includes| includes.users)
        .map(|user| (user.id, user.username))
        .collect();

    let items: Vec<EvidenceItem> = body
        .data
        .into_iter()
        .map(|tweet| {
            let username = tweet
                .author_id
                .as_ref()
                .and_then(|id| users.get(id))
                .map(String::as_str);
            let title = match username {
                Some(name) => format!("Tweet by @{name}"),
                None => "Twitter Post".to_string(),
            };
            let link = format!(
                "https://twitter.com/{}/status/{}",
                username.unwrap_or("user"),
                tweet.id
            );

            EvidenceItem {
                title,
                link,
                snippet: snippet::scrub_images(&tweet.text),
                media: vec![],
                published_at: tweet.created_at,
                platform: Platform::Social,
            }
        })
        .collect();

    tracing::debug!(count = items.len(), "social results parsed");
    items
}
