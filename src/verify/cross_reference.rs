//! Cross-reference strategy: literal containment of answer sentences in
//! reference snippets.
//!
//! The answer is split into candidate "facts" by naive sentence splitting;
//! each fact is matched against every snippet by substring containment.
//! Paraphrased facts will be missed — this is a containment heuristic, not
//! semantic matching, and stays that way behind the strategy interface.

use serde_json::json;

use crate::types::ReferenceRecord;
use crate::verify::{VerificationResult, MIN_SUPPORTING, NEUTRAL_SCORE, VERIFIED_THRESHOLD};

/// Fragments at or below this many characters are not facts.
const MIN_FACT_CHARS: usize = 10;

/// Negation cues that mark a snippet as conflicting when it mentions a
/// fact (case-insensitively) without containing it verbatim.
const NEGATION_CUES: &[&str] = &[
    "not",
    "never",
    "didn't",
    "doesn't",
    "haven't",
    "hasn't",
    "won't",
    "wouldn't",
    "couldn't",
    "shouldn't",
    "isn't",
    "aren't",
    "wasn't",
    "weren't",
];

pub(crate) fn verify(answer: &str, references: &[ReferenceRecord]) -> VerificationResult {
    let facts = extract_key_facts(answer);

    let mut supporting: Vec<usize> = Vec::new();
    let mut conflicting: Vec<usize> = Vec::new();
    let mut fact_support: Vec<Vec<usize>> = vec![Vec::new(); facts.len()];

    for reference in references {
        let snippet = &reference.item.snippet;
        for (fact_idx, fact) in facts.iter().enumerate() {
            if snippet.contains(fact.as_str()) {
                fact_support[fact_idx].push(reference.number);
                if !supporting.contains(&reference.number) {
                    supporting.push(reference.number);
                }
            } else if has_conflicting(fact, snippet) && !conflicting.contains(&reference.number) {
                conflicting.push(reference.number);
            }
        }
    }

    let confidence = if facts.is_empty() {
        NEUTRAL_SCORE
    } else {
        let total: f64 = fact_support
            .iter()
            .map(|supporters| per_fact_score(supporters.len()))
            .sum();
        total / facts.len() as f64
    };

    let verified = confidence >= VERIFIED_THRESHOLD && supporting.len() >= MIN_SUPPORTING;

    let fact_scores: serde_json::Map<String, serde_json::Value> = facts
        .iter()
        .zip(&fact_support)
        .map(|(fact, supporters)| (fact.clone(), json!(supporters)))
        .collect();
    let mut details = serde_json::Map::new();
    details.insert("key_facts".into(), json!(&facts));
    details.insert("fact_scores".into(), fact_scores.into());

    VerificationResult {
        verified,
        confidence,
        strategy: "cross-reference".into(),
        supporting,
        conflicting,
        details,
    }
}

/// Score one fact by how many distinct references contain it.
fn per_fact_score(supporter_count: usize) -> f64 {
    match supporter_count {
        0 => 0.0,
        1 => 0.5,
        2 => 0.8,
        _ => 1.0,
    }
}

/// Split the answer into candidate facts: sentences longer than
/// [`MIN_FACT_CHARS`] characters.
fn extract_key_facts(answer: &str) -> Vec<String> {
    answer
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_FACT_CHARS)
        .map(str::to_string)
        .collect()
}

/// A snippet conflicts with a fact when it mentions the fact
/// case-insensitively and carries a negation cue anywhere in its text.
fn has_conflicting(fact: &str, snippet: &str) -> bool {
    let snippet_lower = snippet.to_lowercase();
    let has_fact = snippet_lower.contains(&fact.to_lowercase());
    let has_negation = NEGATION_CUES.iter().any(|cue| snippet_lower.contains(cue));
    has_fact && has_negation
}
