//! Temporal-analysis strategy: publication-date spread of the references.
//!
//! Parses a date off each reference that carries one, silently skipping
//! unparsable values, and treats every dated reference except the earliest
//! as "evolved" coverage. That definition does not distinguish references
//! that changed the claim from references that merely repeat it later —
//! preserved literal behavior pending clarified product intent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::json;

use crate::types::ReferenceRecord;
use crate::verify::{VerificationResult, NEUTRAL_SCORE, VERIFIED_THRESHOLD};

/// A dated subset of this size is required before the verdict can verify.
const MIN_DATED: usize = 2;

pub(crate) fn verify(_answer: &str, references: &[ReferenceRecord]) -> VerificationResult {
    // (reference number, parsed date), in reference order.
    let mut dated: Vec<(usize, NaiveDateTime)> = references
        .iter()
        .filter_map(|reference| {
            reference
                .item
                .published_at
                .as_deref()
                .and_then(parse_reference_date)
                .map(|date| (reference.number, date))
        })
        .collect();

    // Stable sort: equal dates keep reference order.
    dated.sort_by_key(|(_, date)| *date);

    let evolved: Vec<usize> = dated.iter().skip(1).map(|(number, _)| *number).collect();

    let confidence = if dated.is_empty() {
        NEUTRAL_SCORE
    } else {
        1.0 - evolved.len() as f64 / dated.len() as f64
    };

    let verified = confidence >= VERIFIED_THRESHOLD && dated.len() >= MIN_DATED;

    let mut details = serde_json::Map::new();
    details.insert("dated_count".into(), json!(dated.len()));
    details.insert("evolved".into(), json!(&evolved));

    VerificationResult {
        verified,
        confidence,
        strategy: "temporal-analysis".into(),
        supporting: dated.iter().map(|(number, _)| *number).collect(),
        conflicting: evolved,
        details,
    }
}

/// Parse a reference's published-date string.
///
/// Accepts RFC 3339 timestamps (including `Z` suffixes), naive ISO
/// timestamps, and bare `YYYY-MM-DD` dates. Anything else is skipped.
fn parse_reference_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    None
}
