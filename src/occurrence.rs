//! Concrete occurrences: the unit conflict detection and export operate on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;
use crate::weekday::Weekday;

/// Which block kind an occurrence was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Fixed,
    Flexible,
}

/// One dated instance of a block, derived transiently for a specific
/// window. Never persisted; the weekly pattern is the single source of
/// truth for fixed blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteOccurrence {
    /// Unique within the requested window.
    pub occurrence_id: String,
    pub source_id: String,
    pub kind: SourceKind,
    pub label: String,
    pub interval: TimeInterval,
    /// `false` for anything derived from a fixed block.
    pub movable: bool,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl ConcreteOccurrence {
    /// Occurrence id for a dated instance of a fixed block. Combining the
    /// source id, weekday tag and concrete date means the same weekly slot
    /// on different calendar dates never collides.
    pub fn fixed_occurrence_id(source_id: &str, day: Weekday, date: NaiveDate) -> String {
        format!("{}_{}_{}", source_id, day.tag(), date.format("%Y%m%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_occurrence_ids_distinct_across_dates() {
        let first = ConcreteOccurrence::fixed_occurrence_id(
            "block-1",
            Weekday::Mon,
            NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
        );
        let second = ConcreteOccurrence::fixed_occurrence_id(
            "block-1",
            Weekday::Mon,
            NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        );
        assert_eq!(first, "block-1_MO_20260907");
        assert_ne!(first, second);
    }
}
