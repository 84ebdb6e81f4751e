//! Fact-checking strategy: cue-phrase balance inside the answer itself.
//!
//! Counts occurrences of unreliable cue phrases ("hoax", "speculation", …)
//! against reliable ones ("according to", "confirmed by", …) in the
//! lowercased answer. References are not consulted, so this strategy
//! contributes no supporting or conflicting ids.
//!
//! Counting is literal substring counting; phrases that overlap (e.g.
//! "verified" inside "unverified") count on both sides. That imbalance is
//! part of the preserved scoring contract.

use serde_json::json;

use crate::types::ReferenceRecord;
use crate::verify::{VerificationResult, NEUTRAL_SCORE, VERIFIED_THRESHOLD};

/// Cue phrases signalling unreliable or disputed information.
const UNRELIABLE_CUES: &[&str] = &[
    "conspiracy",
    "hoax",
    "fake news",
    "misinformation",
    "disinformation",
    "unverified",
    "unconfirmed",
    "rumor",
    "speculation",
];

/// Cue phrases signalling sourced or corroborated information.
const RELIABLE_CUES: &[&str] = &[
    "according to",
    "reported by",
    "confirmed by",
    "verified",
    "official",
    "statement",
    "announcement",
    "press release",
];

pub(crate) fn verify(answer: &str, _references: &[ReferenceRecord]) -> VerificationResult {
    let answer_lower = answer.to_lowercase();

    let unreliable_count: usize = UNRELIABLE_CUES
        .iter()
        .map(|cue| answer_lower.matches(cue).count())
        .sum();
    let reliable_count: usize = RELIABLE_CUES
        .iter()
        .map(|cue| answer_lower.matches(cue).count())
        .sum();

    let total = unreliable_count + reliable_count;
    let confidence = if total == 0 {
        NEUTRAL_SCORE
    } else {
        reliable_count as f64 / total as f64
    };

    let mut details = serde_json::Map::new();
    details.insert("reliable_count".into(), json!(reliable_count));
    details.insert("unreliable_count".into(), json!(unreliable_count));

    VerificationResult {
        verified: confidence >= VERIFIED_THRESHOLD,
        confidence,
        strategy: "fact-checking".into(),
        supporting: vec![],
        conflicting: vec![],
        details,
    }
}
