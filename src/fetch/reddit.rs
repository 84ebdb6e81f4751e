//! Reddit platform fetcher backed by the public `search.json` endpoint.
//!
//! No credentials required. Post self-text becomes the snippet; preview
//! media URLs are carried on the evidence item.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::DateTime;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SearchError};
use crate::fetch::{cancellable, snippet, SourceFetcher};
use crate::types::{EvidenceItem, Platform};

use serde::Deserialize;

const REDDIT_ENDPOINT: &str = "https://www.reddit.com/search.json";

/// Snippets are cut at this many characters of self-text.
const SNIPPET_CHARS: usize = 500;

/// At most this many media URLs are kept per post.
const MAX_MEDIA: usize = 3;

/// Reddit post search backend.
pub struct RedditFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl RedditFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: REDDIT_ENDPOINT.to_string(),
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
impl SourceFetcher for RedditFetcher {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        tracing::trace!(query, limit, "reddit search");

        let limit_param = limit.to_string();
        let request = async {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("q", query),
                    ("limit", limit_param.as_str()),
                    ("sort", "relevance"),
                    ("raw_json", "1"),
                ])
                .send()
                .await
                .map_err(|e| SearchError::Http(format!("Reddit request failed: {e}")))?
                .error_for_status()
                .map_err(|e| SearchError::Http(format!("Reddit HTTP error: {e}")))?;

            response
                .json::<RedditResponse>()
                .await
                .map_err(|e| SearchError::Parse(format!("Reddit response decode failed: {e}")))
        };

        let body = cancellable(&cancel, request).await?;
        Ok(evidence_from_posts(body))
    }

    fn platform(&self) -> Platform {
        Platform::Reddit
    }
}

#[derive(Debug, Deserialize)]
struct RedditResponse {
    data: RedditListing,
}

#[derive(Debug, Deserialize, Default)]
struct RedditListing {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    selftext: String,
    created_utc: Option<f64>,
    /// Keyed by media id; a BTreeMap keeps the extracted URL order stable.
    media_metadata: Option<BTreeMap<String, RedditMediaEntry>>,
}

#[derive(Debug, Deserialize)]
struct RedditMediaEntry {
    s: Option<RedditMediaSource>,
}

#[derive(Debug, Deserialize)]
struct RedditMediaSource {
    u: Option<String>,
}

/// Convert a decoded Reddit listing into evidence items.
fn evidence_from_posts(body: RedditResponse) -> Vec<EvidenceItem> {
    let items: Vec<EvidenceItem> = body
        .data
        .children
        .into_iter()
        .map(|child| {
            let post = child.data;

            let media: Vec<String> = post
                .media_metadata
                .into_iter()
                .flatten()
                .filter_map(|(_, entry)| entry.s.and_then(|source| source.u))
                .take(MAX_MEDIA)
                .collect();

            let truncated = snippet::truncate_chars(&post.selftext, SNIPPET_CHARS);
            let snippet = if post.selftext.chars().count() > SNIPPET_CHARS {
                format!("{truncated}...")
            } else {
                truncated.to_string()
            };

            let published_at = post
                .created_utc
                .and_then(|utc| DateTime::from_timestamp(utc as i64, 0))
                .map(|dt| dt.to_rfc3339());

            EvidenceItem {
                title: post.title,
                link: format!("https://reddit.com{}", post.permalink),
                snippet,
                media,
                published_at,
                platform: Platform::Reddit,
            }
        })
        .collect();

    tracing::debug!(count = items.len(), "reddit results parsed");
    items
}
