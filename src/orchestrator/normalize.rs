//! Reference normalisation: flatten per-platform evidence into one
//! numbered list.
//!
//! Numbering is a pure function of platform order and per-platform arrival
//! order — identical inputs always yield identical numbers. Reference
//! numbers start at 1 and are contiguous with no gaps.

use std::collections::HashMap;

use crate::types::{EvidenceItem, Platform, ReferenceRecord, SearchRun};

/// Flatten per-platform evidence into a numbered reference list.
///
/// Platforms are visited in `platform_order` (never map iteration order,
/// which is unordered). Within a platform at most `per_platform_cap`
/// items are taken, in arrival order; the rest are discarded.
pub fn normalize(
    evidence: &HashMap<Platform, Vec<EvidenceItem>>,
    platform_order: &[Platform],
    per_platform_cap: usize,
) -> Vec<ReferenceRecord> {
    let mut references = Vec::new();

    for platform in platform_order {
        let Some(items) = evidence.get(platform) else {
            continue;
        };
        for item in items.iter().take(per_platform_cap) {
            references.push(ReferenceRecord {
                number: references.len() + 1,
                item: item.clone(),
            });
        }
    }

    references
}

impl SearchRun {
    /// Normalize this run's evidence using the platform order the run was
    /// configured with.
    pub fn references(&self, per_platform_cap: usize) -> Vec<ReferenceRecord> {
        normalize(&self.evidence, &self.platform_order, per_platform_cap)
    }
}
