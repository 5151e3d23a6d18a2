//! Pairwise conflict detection over concrete occurrences.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::occurrence::ConcreteOccurrence;

/// One side of a conflict, enough for a caller to resolve either the
/// occurrence or its source block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictSide {
    pub source_id: String,
    pub occurrence_id: String,
}

/// An unordered overlapping pair, reported exactly once. `a` sorts before
/// `b` by (source id, occurrence id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictPair {
    pub a: ConflictSide,
    pub b: ConflictSide,
}

/// Every pairwise half-open overlap among `occurrences`.
///
/// Occurrences sharing a source block never conflict with each other. The
/// result is sorted and deduplicated, so it is independent of input order.
/// A plain O(n²) scan: visible windows hold at most a few hundred
/// occurrences.
pub fn find_conflicts(occurrences: &[ConcreteOccurrence]) -> Vec<ConflictPair> {
    let mut conflicts = Vec::new();

    for (i, x) in occurrences.iter().enumerate() {
        for y in &occurrences[i + 1..] {
            if x.source_id == y.source_id {
                continue;
            }
            if !x.interval.overlaps(&y.interval) {
                continue;
            }
            let (first, second) = if (x.source_id.as_str(), x.occurrence_id.as_str())
                <= (y.source_id.as_str(), y.occurrence_id.as_str())
            {
                (x, y)
            } else {
                (y, x)
            };
            conflicts.push(ConflictPair {
                a: ConflictSide {
                    source_id: first.source_id.clone(),
                    occurrence_id: first.occurrence_id.clone(),
                },
                b: ConflictSide {
                    source_id: second.source_id.clone(),
                    occurrence_id: second.occurrence_id.clone(),
                },
            });
        }
    }

    conflicts.sort();
    conflicts.dedup();

    debug!(
        occurrences = occurrences.len(),
        conflicts = conflicts.len(),
        "conflict scan"
    );

    conflicts
}
