//! Block models: the two kinds of time blocks the planner schedules.
//!
//! Constructors are the validation gate for records arriving from outside
//! collaborators (see the `intake` module); an invalid record never enters
//! the model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::interval::TimeInterval;
use crate::weekday::Weekday;

/// A recurring, immovable weekly commitment (e.g. a class section).
///
/// Only the weekly pattern is stored, never individual dated occurrences;
/// concrete occurrences are recomputed per window by the expander.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedBlock {
    pub id: String,
    pub label: String,
    /// Sorted by weekday index and deduplicated; never empty.
    pub days_of_week: Vec<Weekday>,
    pub daily_start: NaiveTime,
    pub daily_end: NaiveTime,
    pub location: Option<String>,
    /// Instructor, section number, etc. No semantic role.
    pub secondary_info: Option<String>,
    /// Hidden blocks are excluded from expansion, conflicts and export,
    /// but stay in the working set (soft-hide, not delete).
    pub visible: bool,
    /// Grouping key for bulk visibility toggles and cascade deletes
    /// (e.g. all blocks extracted from one upload).
    pub group_id: Option<String>,
}

impl FixedBlock {
    /// Validates the recurrence pattern and daily time range.
    ///
    /// `daily_start < daily_end` also rules out ranges that would cross
    /// midnight, which the expander does not support.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        days: Vec<Weekday>,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
    ) -> ScheduleResult<Self> {
        if days.is_empty() {
            return Err(ScheduleError::InvalidRecurrencePattern(
                "day-of-week set is empty".to_string(),
            ));
        }
        if daily_start >= daily_end {
            return Err(ScheduleError::InvalidInterval(format!(
                "daily range {} .. {} is empty or crosses midnight",
                daily_start, daily_end
            )));
        }

        let mut days_of_week = days;
        days_of_week.sort_by_key(|d| d.index_from_sunday());
        days_of_week.dedup();

        Ok(FixedBlock {
            id: id.into(),
            label: label.into(),
            days_of_week,
            daily_start,
            daily_end,
            location: None,
            secondary_info: None,
            visible: true,
            group_id: None,
        })
    }
}

/// A single-occurrence, user-movable personal event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexibleBlock {
    pub id: String,
    pub label: String,
    pub notes: Option<String>,
    pub location_text: Option<String>,
    pub category_tag: Option<String>,
    /// Exactly one concrete interval; flexible blocks never recur.
    pub occurrence: TimeInterval,
}

impl FlexibleBlock {
    /// A new flexible block with a fresh id. The interval has already been
    /// validated by `TimeInterval` construction.
    pub fn new(label: impl Into<String>, occurrence: TimeInterval) -> Self {
        FlexibleBlock {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            notes: None,
            location_text: None,
            category_tag: None,
            occurrence,
        }
    }
}

/// Closed set of block kinds. The core operations match on this
/// exhaustively, so a third kind is a compile-time-checked addition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Block {
    Fixed(FixedBlock),
    Flexible(FlexibleBlock),
}

impl Block {
    pub fn id(&self) -> &str {
        match self {
            Block::Fixed(fixed) => &fixed.id,
            Block::Flexible(flexible) => &flexible.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Block::Fixed(fixed) => &fixed.label,
            Block::Flexible(flexible) => &flexible.label,
        }
    }

    pub fn is_movable(&self) -> bool {
        match self {
            Block::Fixed(_) => false,
            Block::Flexible(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn test_fixed_block_rejects_empty_day_set() {
        let result = FixedBlock::new("b1", "Calculus", vec![], time(9, 0), time(10, 15));
        assert!(matches!(
            result,
            Err(ScheduleError::InvalidRecurrencePattern(_))
        ));
    }

    #[test]
    fn test_fixed_block_rejects_empty_daily_range() {
        let result = FixedBlock::new(
            "b1",
            "Calculus",
            vec![Weekday::Mon],
            time(9, 0),
            time(9, 0),
        );
        assert!(matches!(result, Err(ScheduleError::InvalidInterval(_))));
    }

    #[test]
    fn test_fixed_block_rejects_midnight_crossing_range() {
        // 23:00 .. 01:00 would cross midnight; the model forbids it
        let result = FixedBlock::new(
            "b1",
            "Late lab",
            vec![Weekday::Fri],
            time(23, 0),
            time(1, 0),
        );
        assert!(matches!(result, Err(ScheduleError::InvalidInterval(_))));
    }

    #[test]
    fn test_fixed_block_sorts_and_dedups_days() {
        let block = FixedBlock::new(
            "b1",
            "Calculus",
            vec![Weekday::Wed, Weekday::Mon, Weekday::Wed],
            time(9, 0),
            time(10, 15),
        )
        .unwrap();
        assert_eq!(block.days_of_week, vec![Weekday::Mon, Weekday::Wed]);
        assert!(block.visible);
    }

    #[test]
    fn test_block_kind_accessors() {
        let interval = TimeInterval::new(
            Utc.with_ymd_and_hms(2026, 9, 7, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap(),
        )
        .unwrap();
        let flexible = Block::Flexible(FlexibleBlock::new("Gym", interval));
        assert!(flexible.is_movable());
        assert_eq!(flexible.label(), "Gym");

        let fixed = Block::Fixed(
            FixedBlock::new("b1", "Calculus", vec![Weekday::Mon], time(9, 0), time(10, 0))
                .unwrap(),
        );
        assert!(!fixed.is_movable());
        assert_eq!(fixed.id(), "b1");
    }
}
