//! Web platform fetcher backed by the SerpAPI JSON endpoint.
//!
//! Maps organic results to evidence items and appends the knowledge-graph
//! panel as an extra item when the response carries one.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SearchError};
use crate::fetch::{cancellable, snippet, SourceFetcher};
use crate::types::{EvidenceItem, Platform};

use serde::Deserialize;

const SERP_ENDPOINT: &str = "https://serpapi.com/search.json";

/// SerpAPI web search backend.
pub struct WebFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl WebFetcher {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: SERP_ENDPOINT.to_string(),
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
impl SourceFetcher for WebFetcher {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SearchError::Credentials("SerpAPI key is not configured".into())
        })?;
        tracing::trace!(query, limit, "web search");

        let num = limit.to_string();
        let request = async {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("api_key", api_key),
                    ("q", query),
                    ("num", num.as_str()),
                    ("gl", "us"),
                    ("hl", "en"),
                ])
                .send()
                .await
                .map_err(|e| SearchError::Http(format!("SerpAPI request failed: {e}")))?
                .error_for_status()
                .map_err(|e| SearchError::Http(format!("SerpAPI HTTP error: {e}")))?;

            response
                .json::<SerpResponse>()
                .await
                .map_err(|e| SearchError::Parse(format!("SerpAPI response decode failed: {e}")))
        };

        let body = cancellable(&cancel, request).await?;
        evidence_from_serp(body)
    }

    fn platform(&self) -> Platform {
        Platform::Web
    }
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpOrganic>,
    knowledge_graph: Option<SerpKnowledgeGraph>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpOrganic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpKnowledgeGraph {
    title: Option<String>,
    website: Option<String>,
    #[serde(default)]
    description: String,
}

/// Convert a decoded SerpAPI response into evidence items.
///
/// Extracted as a separate function for testability with fixture JSON.
fn evidence_from_serp(body: SerpResponse) -> Result<Vec<EvidenceItem>> {
    if let Some(error) = body.error {
        return Err(SearchError::Http(format!("SerpAPI error: {error}")));
    }

    let mut items: Vec<EvidenceItem> = body
        .organic_results
        .into_iter()
        .map(|result| EvidenceItem {
            title: result.title,
            link: result.link,
            snippet: snippet::scrub_images(&result.snippet),
            media: vec![],
            published_at: result.date,
            platform: Platform::Web,
        })
        .collect();

    if let Some(kg) = body.knowledge_graph {
        items.push(EvidenceItem {
            title: kg.title.unwrap_or_else(|| "Knowledge Panel".into()),
            link: kg.website.unwrap_or_default(),
            snippet: snippet::scrub_images(&kg.description),
            media: vec![],
            published_at: None,
            platform: Platform::Web,
        });
    }

    tracing::debug!(count = items.len(), "web results parsed");
    Ok(items)
}
