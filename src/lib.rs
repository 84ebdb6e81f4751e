//! # crosscheck
//!
//! Concurrent multi-platform evidence retrieval with deterministic answer
//! credibility scoring.
//!
//! Given a query, crosscheck fans out to several independent information
//! platforms at once (web search, news, social, academic, Reddit), applies
//! a bounded timeout and retry policy to each platform in isolation, and
//! fans in once every platform has reached a terminal state. The collected
//! evidence is flattened into a deterministically numbered reference list,
//! and a verification engine grades an answer's trustworthiness against
//! those references with a family of pure scoring strategies.
//!
//! ## Design
//!
//! - One cooperative task per platform, launched and joined together; a
//!   slow or failing platform degrades only its own contribution
//! - Per-attempt timeouts with immediate retry and cancellation of
//!   abandoned attempts
//! - Per-platform outcome metrics captured for observability, never
//!   consulted for evidence
//! - All run state is constructed fresh per query — concurrent queries
//!   cannot observe each other's partial results
//! - Verification strategies are pure functions behind a closed dispatch
//!   table; unknown strategy names are rejected at the boundary
//!
//! ## Security
//!
//! - Credential strings are carried in config, never logged
//! - Search queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod types;
pub mod verify;

pub use config::{Credentials, SearchConfig};
pub use error::{Result, SearchError};
pub use fetch::{FetcherRegistry, SourceFetcher};
pub use types::{
    EvidenceItem, Platform, PlatformQueries, ReferenceRecord, SearchOutcome, SearchRun,
};
pub use verify::{verify, verify_with, Strategy, VerificationResult};

/// Query every configured platform concurrently and collect evidence plus
/// per-platform outcome metrics.
///
/// Builds the concrete platform fetchers from `config` (sharing one HTTP
/// client for the run) and orchestrates the fan-out. Use [`run_with`] to
/// bring your own [`SourceFetcher`] implementations.
///
/// # Errors
///
/// Returns an error only for invalid configuration. Individual platform
/// failures degrade that platform to an empty evidence list and are
/// recorded in the run's outcomes — they never fail the run.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> crosscheck::Result<()> {
/// let config = crosscheck::SearchConfig::default();
/// let queries = crosscheck::PlatformQueries::uniform("rust memory safety");
/// let run = crosscheck::run(&queries, &config).await?;
/// let references = run.references(config.per_platform_cap);
/// let verdict = crosscheck::verify("Rust prevents data races.", &references, "composite")?;
/// println!("verified: {} ({:.2})", verdict.verified, verdict.confidence);
/// # Ok(())
/// # }
/// ```
pub async fn run(queries: &PlatformQueries, config: &SearchConfig) -> Result<SearchRun> {
    config.validate()?;
    let registry = FetcherRegistry::from_config(config)?;
    orchestrator::search::run_all(&registry, queries, config).await
}

/// Like [`run`], but with a caller-assembled fetcher registry.
///
/// # Errors
///
/// Same as [`run`], plus a config error if the registry is missing a
/// fetcher for any configured platform.
pub async fn run_with(
    registry: &FetcherRegistry,
    queries: &PlatformQueries,
    config: &SearchConfig,
) -> Result<SearchRun> {
    orchestrator::search::run_all(registry, queries, config).await
}
