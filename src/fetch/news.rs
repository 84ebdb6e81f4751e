//! News platform fetcher backed by NewsAPI.
//!
//! Queries `/v2/everything` over a 30-day look-back window, falling back to
//! `/v2/top-headlines` when the primary endpoint rejects the request (free
//! NewsAPI tiers gate `/everything` behind paid plans for some queries).

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SearchError};
use crate::fetch::{cancellable, snippet, SourceFetcher};
use crate::types::{EvidenceItem, Platform};

use serde::Deserialize;

const NEWS_ENDPOINT: &str = "https://newsapi.org/v2";

/// How many days back the `/everything` search reaches.
const LOOKBACK_DAYS: i64 = 30;

/// Descriptions shorter than this fall back to the article body excerpt.
const MIN_DESCRIPTION_CHARS: usize = 30;

/// NewsAPI article search backend.
pub struct NewsFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsFetcher {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: NEWS_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint, primarily for tests against a local
    /// mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request_articles(
        &self,
        api_key: &str,
        query: &str,
        limit: usize,
    ) -> Result<NewsResponse> {
        let from_date = (Utc::now() - chrono::Duration::days(LOOKBACK_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = limit.to_string();

        let response = self
            .client
            .get(format!("{}/everything", self.base_url))
            .query(&[
                ("apiKey", api_key),
                ("q", query),
                ("from", from_date.as_str()),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("NewsAPI request failed: {e}")))?;

        // Fall back to headlines when /everything is refused.
        let response = if response.status().is_success() {
            response
        } else {
            tracing::warn!(
                status = %response.status(),
                "NewsAPI everything endpoint refused, trying top headlines"
            );
            self.client
                .get(format!("{}/top-headlines", self.base_url))
                .query(&[
                    ("apiKey", api_key),
                    ("q", query),
                    ("language", "en"),
                    ("pageSize", page_size.as_str()),
                ])
                .send()
                .await
                .map_err(|e| SearchError::Http(format!("NewsAPI fallback failed: {e}")))?
                .error_for_status()
                .map_err(|e| SearchError::Http(format!("NewsAPI HTTP error: {e}")))?
        };

        response
            .json::<NewsResponse>()
            .await
            .map_err(|e| SearchError::Parse(format!("NewsAPI response decode failed: {e}")))
    }
}

#[async_trait]
impl SourceFetcher for NewsFetcher {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::Credentials("NewsAPI key is not configured".into()))?;
        tracing::trace!(query, limit, "news search");

        let body = cancellable(&cancel, self.request_articles(api_key, query, limit)).await?;
        evidence_from_news(body)
    }

    fn platform(&self) -> Platform {
        Platform::News
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    description: Option<String>,
    content: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

/// Convert a decoded NewsAPI response into evidence items.
fn evidence_from_news(body: NewsResponse) -> Result<Vec<EvidenceItem>> {
    if body.status != "ok" {
        return Err(SearchError::Http(format!(
            "NewsAPI error: {}",
            body.message.unwrap_or_else(|| "unknown error".into())
        )));
    }

    let items: Vec<EvidenceItem> = body
        .articles
        .into_iter()
        .map(|article| {
            let description = article.description.unwrap_or_default();
            let content = article.content.unwrap_or_default();
            // Short descriptions are usually truncated teasers; prefer the
            // body excerpt in that case.
            let raw_snippet =
                if description.chars().count() < MIN_DESCRIPTION_CHARS && !content.is_empty() {
                    snippet::truncate_chars(&content, 150).to_string()
                } else {
                    description
                };

            EvidenceItem {
                title: article.title,
                link: article.url,
                snippet: snippet::scrub_images(&raw_snippet),
                media: vec![],
                published_at: article.published_at,
                platform: Platform::News,
            }
        })
        .collect();

    tracing::debug!(count = items.len(), "news results parsed");
    Ok(items)
}
