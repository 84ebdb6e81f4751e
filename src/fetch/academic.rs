//! Academic platform fetcher backed by the arXiv export API.
//!
//! arXiv answers with an Atom feed. The feed is parsed leniently with CSS
//! selectors — the tag names (`entry`, `title`, `summary`, `id`,
//! `published`) survive HTML tree construction unchanged, so the same
//! selector machinery used for HTML scraping works here.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SearchError};
use crate::fetch::{cancellable, snippet, SourceFetcher};
use crate::types::{EvidenceItem, Platform};

const ARXIV_ENDPOINT: &str = "https://export.arxiv.org/api/query";

/// arXiv preprint search backend. No credentials required.
pub struct AcademicFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl AcademicFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: ARXIV_ENDPOINT.to_string(),
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
impl SourceFetcher for AcademicFetcher {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<EvidenceItem>> {
        tracing::trace!(query, limit, "academic search");

        let search_query = format!("all:{query}");
        let max_results = limit.to_string();
        let request = async {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("search_query", search_query.as_str()),
                    ("start", "0"),
                    ("max_results", max_results.as_str()),
                ])
                .send()
                .await
                .map_err(|e| SearchError::Http(format!("arXiv request failed: {e}")))?
                .error_for_status()
                .map_err(|e| SearchError::Http(format!("arXiv HTTP error: {e}")))?;

            response
                .text()
                .await
                .map_err(|e| SearchError::Http(format!("arXiv response read failed: {e}")))
        };

        let feed = cancellable(&cancel, request).await?;
        parse_arxiv_feed(&feed, limit)
    }

    fn platform(&self) -> Platform {
        Platform::Academic
    }
}

/// Parse an arXiv Atom feed into evidence items.
///
/// Extracted as a separate function for testability with fixture feeds.
pub(crate) fn parse_arxiv_feed(feed: &str, limit: usize) -> Result<Vec<EvidenceItem>> {
    let document = Html::parse_document(feed);

    let entry_sel = Selector::parse("entry")
        .map_err(|e| SearchError::Parse(format!("invalid entry selector: {e:?}")))?;
    let title_sel = Selector::parse("title")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let summary_sel = Selector::parse("summary")
        .map_err(|e| SearchError::Parse(format!("invalid summary selector: {e:?}")))?;
    let id_sel = Selector::parse("id")
        .map_err(|e| SearchError::Parse(format!("invalid id selector: {e:?}")))?;
    let published_sel = Selector::parse("published")
        .map_err(|e| SearchError::Parse(format!("invalid published selector: {e:?}")))?;

    let mut items = Vec::new();

    for entry in document.select(&entry_sel) {
        let title = match entry.select(&title_sel).next() {
            Some(el) => collapse_whitespace(&el.text().collect::<String>()),
            None => continue,
        };
        if title.is_empty() {
            continue;
        }

        let link = entry
            .select(&id_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let summary = entry
            .select(&summary_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();

        let published = entry
            .select(&published_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|date| !date.is_empty());

        items.push(EvidenceItem {
            title,
            link,
            snippet: format!("{}...", snippet::truncate_chars(&summary, 150)),
            media: vec![],
            published_at: published,
            platform: Platform::Academic,
        });

        if items.len() >= limit {
            break;
        }
    }

    tracing::debug!(count = items.len(), "academic results parsed");
    Ok(items)
}

/// Collapse runs of whitespace (arXiv wraps titles and abstracts hard).
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
