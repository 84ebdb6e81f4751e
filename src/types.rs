//! Core types for evidence retrieval: platforms, evidence items, per-platform
//! outcomes, and numbered reference records.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information platforms that crosscheck can pull evidence from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// General web search (SerpAPI).
    Web,
    /// News articles (NewsAPI).
    News,
    /// Social posts (X/Twitter recent search).
    Social,
    /// Academic preprints (arXiv).
    Academic,
    /// Reddit posts (public search endpoint).
    Reddit,
}

impl Platform {
    /// Returns the human-readable name of this platform.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::News => "News",
            Self::Social => "Social",
            Self::Academic => "Academic",
            Self::Reddit => "Reddit",
        }
    }

    /// Default result-count hint passed to this platform's fetcher.
    ///
    /// News indexes return long articles so fewer are requested; social
    /// posts are short so more are needed for the same evidence weight.
    pub fn default_limit(&self) -> usize {
        match self {
            Self::Web => 12,
            Self::News => 7,
            Self::Social => 15,
            Self::Academic => 10,
            Self::Reddit => 10,
        }
    }

    /// Returns all available platform variants.
    pub fn all() -> &'static [Platform] {
        &[
            Self::Web,
            Self::News,
            Self::Social,
            Self::Academic,
            Self::Reddit,
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-platform query strings for one orchestration run.
///
/// Upstream query rewriting (turning one user question into platform-shaped
/// queries) is out of scope here; callers that skip it simply use
/// [`PlatformQueries::uniform`], which sends the raw query everywhere.
#[derive(Debug, Clone)]
pub struct PlatformQueries {
    base: String,
    overrides: HashMap<Platform, String>,
}

impl PlatformQueries {
    /// Use the same query string for every platform.
    pub fn uniform(query: impl Into<String>) -> Self {
        Self {
            base: query.into(),
            overrides: HashMap::new(),
        }
    }

    /// Replace the query for one platform, keeping the base for the rest.
    #[must_use]
    pub fn with_override(mut self, platform: Platform, query: impl Into<String>) -> Self {
        self.overrides.insert(platform, query.into());
        self
    }

    /// The query string to send to `platform`.
    pub fn get(&self, platform: Platform) -> &str {
        self.overrides
            .get(&platform)
            .map_or(self.base.as_str(), String::as_str)
    }
}

/// A single piece of evidence returned by a platform fetcher.
///
/// Immutable once produced by a fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Title of the evidence (page title, article headline, post title).
    pub title: String,
    /// URL of the evidence.
    pub link: String,
    /// Text excerpt summarising the evidence content.
    pub snippet: String,
    /// Attached media URLs, if the platform exposes any.
    pub media: Vec<String>,
    /// Publication date as the platform reported it, if available.
    /// ISO-8601 where the platform provides it; unparsable values are
    /// skipped by temporal verification rather than rejected here.
    pub published_at: Option<String>,
    /// Which platform produced this item.
    pub platform: Platform,
}

/// Timing and result metrics for one platform's search in one run.
///
/// Written once when the platform's task reaches a terminal state. Used for
/// observability only — never consulted when assembling evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Wall-clock time from the first attempt to the terminal state.
    pub elapsed: Duration,
    /// Whether any attempt returned results.
    pub success: bool,
    /// Number of evidence items returned (0 on failure).
    pub result_count: usize,
    /// Cause of failure (`"Timeout"` for a timed-out final attempt).
    pub error: Option<String>,
    /// When the platform's task completed.
    pub completed_at: DateTime<Utc>,
}

impl SearchOutcome {
    /// Record a successful fetch.
    pub fn success(elapsed: Duration, result_count: usize) -> Self {
        Self {
            elapsed,
            success: true,
            result_count,
            error: None,
            completed_at: Utc::now(),
        }
    }

    /// Record an exhausted retry budget.
    pub fn failure(elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            elapsed,
            success: false,
            result_count: 0,
            error: Some(error.into()),
            completed_at: Utc::now(),
        }
    }
}

/// A normalized, sequentially numbered piece of evidence.
///
/// Reference numbers are 1-based, contiguous, and a pure function of
/// platform order and per-platform arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// 1-based reference number, unique within a run.
    pub number: usize,
    /// The underlying evidence.
    pub item: EvidenceItem,
}

/// The complete output of one orchestration run.
///
/// Owns exactly one evidence map and one outcomes map. Constructed fresh
/// per query — concurrent runs never share state.
#[derive(Debug, Clone)]
pub struct SearchRun {
    /// Evidence per platform, keyed by the full configured platform set.
    pub evidence: HashMap<Platform, Vec<EvidenceItem>>,
    /// Timing/outcome metrics per platform, same key set as `evidence`.
    pub outcomes: HashMap<Platform, SearchOutcome>,
    /// The platform order the run was configured with, used for
    /// deterministic reference numbering.
    pub platform_order: Vec<Platform>,
}
