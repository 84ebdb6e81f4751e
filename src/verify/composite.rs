//! Composite strategy: fixed-weight linear combination of the four base
//! strategies.
//!
//! Supporting and conflicting ids are the de-duplicated unions from
//! cross-reference, source-credibility, and temporal-analysis;
//! fact-checking consults no references and contributes none.

use serde_json::json;

use crate::types::ReferenceRecord;
use crate::verify::{
    cross_reference, fact_checking, source_credibility, temporal, VerificationResult,
    MIN_SUPPORTING, VERIFIED_THRESHOLD,
};

const WEIGHT_CROSS_REFERENCE: f64 = 0.3;
const WEIGHT_FACT_CHECKING: f64 = 0.2;
const WEIGHT_SOURCE_CREDIBILITY: f64 = 0.3;
const WEIGHT_TEMPORAL_ANALYSIS: f64 = 0.2;

pub(crate) fn verify(answer: &str, references: &[ReferenceRecord]) -> VerificationResult {
    let cross = cross_reference::verify(answer, references);
    let fact = fact_checking::verify(answer, references);
    let credibility = source_credibility::verify(answer, references);
    let temporal = temporal::verify(answer, references);

    let confidence = cross.confidence * WEIGHT_CROSS_REFERENCE
        + fact.confidence * WEIGHT_FACT_CHECKING
        + credibility.confidence * WEIGHT_SOURCE_CREDIBILITY
        + temporal.confidence * WEIGHT_TEMPORAL_ANALYSIS;

    let supporting = merged_ids(&[&cross.supporting, &credibility.supporting, &temporal.supporting]);
    let conflicting = merged_ids(&[
        &cross.conflicting,
        &credibility.conflicting,
        &temporal.conflicting,
    ]);

    let verified = confidence >= VERIFIED_THRESHOLD && supporting.len() >= MIN_SUPPORTING;

    let mut details = serde_json::Map::new();
    details.insert("cross_reference_score".into(), json!(cross.confidence));
    details.insert("fact_checking_score".into(), json!(fact.confidence));
    details.insert(
        "source_credibility_score".into(),
        json!(credibility.confidence),
    );
    details.insert("temporal_analysis_score".into(), json!(temporal.confidence));

    VerificationResult {
        verified,
        confidence,
        strategy: "composite".into(),
        supporting,
        conflicting,
        details,
    }
}

/// Sorted, de-duplicated union of reference id lists.
fn merged_ids(lists: &[&Vec<usize>]) -> Vec<usize> {
    let mut merged: Vec<usize> = lists.iter().flat_map(|list| list.iter().copied()).collect();
    merged.sort_unstable();
    merged.dedup();
    merged
}
