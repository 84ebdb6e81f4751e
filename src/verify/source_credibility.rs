//! Source-credibility strategy: domain classification of reference links.
//!
//! Each link is classified by substring membership in a fixed
//! credible-domain list versus a less-credible list. Substring matching is
//! a known heuristic weakness (a URL merely containing `gov` matches the
//! bare `gov` entry) — the matching rule is a preserved contract, so it is
//! flagged here rather than fixed.

use serde_json::json;

use crate::types::ReferenceRecord;
use crate::verify::{VerificationResult, MIN_SUPPORTING, NEUTRAL_SCORE, VERIFIED_THRESHOLD};

/// Domains treated as credible evidence sources.
const CREDIBLE_DOMAINS: &[&str] = &[
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "nytimes.com",
    "washingtonpost.com",
    "theguardian.com",
    "cnn.com",
    "npr.org",
    "scientificamerican.com",
    "nature.com",
    "science.org",
    "who.int",
    "cdc.gov",
    "nih.gov",
    "gov",
    "edu",
];

/// Domains treated as less credible (self-published or social).
const LESS_CREDIBLE_DOMAINS: &[&str] = &[
    "blogspot.com",
    "wordpress.com",
    "medium.com",
    "tumblr.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "tiktok.com",
];

pub(crate) fn verify(_answer: &str, references: &[ReferenceRecord]) -> VerificationResult {
    let mut credible: Vec<usize> = Vec::new();
    let mut less_credible: Vec<usize> = Vec::new();

    for reference in references {
        let link = &reference.item.link;
        if CREDIBLE_DOMAINS.iter().any(|domain| link.contains(domain)) {
            credible.push(reference.number);
        } else if LESS_CREDIBLE_DOMAINS
            .iter()
            .any(|domain| link.contains(domain))
        {
            less_credible.push(reference.number);
        }
    }

    let confidence = if references.is_empty() {
        NEUTRAL_SCORE
    } else {
        credible.len() as f64 / references.len() as f64
    };

    let verified = confidence >= VERIFIED_THRESHOLD && credible.len() >= MIN_SUPPORTING;

    let mut details = serde_json::Map::new();
    details.insert("credible_count".into(), json!(credible.len()));
    details.insert("less_credible_count".into(), json!(less_credible.len()));

    VerificationResult {
        verified,
        confidence,
        strategy: "source-credibility".into(),
        supporting: credible,
        conflicting: less_credible,
        details,
    }
}
