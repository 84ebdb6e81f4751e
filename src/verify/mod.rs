//! Verification engine: deterministic strategies grading an answer's
//! trustworthiness against a reference list.
//!
//! Every strategy is a pure function of the answer text and the references
//! — no network, no clock beyond dates embedded in the references — so the
//! engine is safe to call from any number of concurrent callers without
//! coordination. Strategy names form a closed set parsed at the boundary;
//! unknown names are rejected before any scoring happens.
//!
//! The individual strategies are intentionally simple substring/containment
//! heuristics. Each sits behind the same interface so a single strategy can
//! later be swapped for a semantic implementation without touching the
//! dispatcher or the composite weighting.

pub mod composite;
pub mod cross_reference;
pub mod fact_checking;
pub mod source_credibility;
pub mod temporal;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::types::ReferenceRecord;

/// A strategy verifies when its confidence reaches this score.
pub(crate) const VERIFIED_THRESHOLD: f64 = 0.7;

/// Strategies that demand corroboration also require this many distinct
/// supporting references.
pub(crate) const MIN_SUPPORTING: usize = 2;

/// Score reported when a strategy has nothing to grade (no facts, no
/// references, no dated references). Data-quality gaps degrade to neutral
/// rather than erroring.
pub(crate) const NEUTRAL_SCORE: f64 = 0.5;

/// The closed set of verification strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Literal containment of answer sentences in reference snippets.
    CrossReference,
    /// Reliable vs unreliable cue phrases inside the answer itself.
    FactChecking,
    /// Credible-domain classification of reference links.
    SourceCredibility,
    /// Publication-date spread of the references.
    TemporalAnalysis,
    /// Weighted linear combination of the four strategies above.
    Composite,
}

impl Strategy {
    /// The wire name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CrossReference => "cross-reference",
            Self::FactChecking => "fact-checking",
            Self::SourceCredibility => "source-credibility",
            Self::TemporalAnalysis => "temporal-analysis",
            Self::Composite => "composite",
        }
    }

    /// Returns all available strategy variants.
    pub fn all() -> &'static [Strategy] {
        &[
            Self::CrossReference,
            Self::FactChecking,
            Self::SourceCredibility,
            Self::TemporalAnalysis,
            Self::Composite,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cross-reference" => Ok(Self::CrossReference),
            "fact-checking" => Ok(Self::FactChecking),
            "source-credibility" => Ok(Self::SourceCredibility),
            "temporal-analysis" => Ok(Self::TemporalAnalysis),
            "composite" => Ok(Self::Composite),
            other => Err(SearchError::UnknownStrategy(other.to_string())),
        }
    }
}

/// The verdict a strategy produces for one answer against one reference list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the answer meets the strategy's verification bar.
    pub verified: bool,
    /// Confidence score in `[0, 1]`; higher means more corroborated.
    pub confidence: f64,
    /// Name of the strategy that produced this result.
    pub strategy: String,
    /// Reference numbers supporting the answer.
    pub supporting: Vec<usize>,
    /// Reference numbers conflicting with the answer.
    pub conflicting: Vec<usize>,
    /// Strategy-specific diagnostics. Not authoritative — never feed these
    /// back into scoring.
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Grade `answer` against `references` with the named strategy.
///
/// # Errors
///
/// Returns [`SearchError::UnknownStrategy`] if `strategy_name` is not one
/// of the five known strategies. No partial result is produced in that
/// case.
pub fn verify(
    answer: &str,
    references: &[ReferenceRecord],
    strategy_name: &str,
) -> Result<VerificationResult> {
    let strategy: Strategy = strategy_name.parse()?;
    Ok(verify_with(answer, references, strategy))
}

/// Grade `answer` against `references` with an already-resolved strategy.
pub fn verify_with(
    answer: &str,
    references: &[ReferenceRecord],
    strategy: Strategy,
) -> VerificationResult {
    match strategy {
        Strategy::CrossReference => cross_reference::verify(answer, references),
        Strategy::FactChecking => fact_checking::verify(answer, references),
        Strategy::SourceCredibility => source_credibility::verify(answer, references),
        Strategy::TemporalAnalysis => temporal::verify(answer, references),
        Strategy::Composite => composite::verify(answer, references),
    }
}
