//! Window expansion of blocks into concrete occurrences.
//!
//! Expansion is a pure recompute over the stored patterns: same window and
//! block set in, same occurrence list out, nothing cached.

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::debug;

use crate::block::{Block, FixedBlock, FlexibleBlock};
use crate::error::{ScheduleError, ScheduleResult};
use crate::interval::TimeInterval;
use crate::occurrence::{ConcreteOccurrence, SourceKind};
use crate::weekday::Weekday;

/// An inclusive pair of calendar dates describing the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ScheduleResult<Self> {
        if start > end {
            return Err(ScheduleError::InvalidInterval(format!(
                "window start {} is after end {}",
                start, end
            )));
        }
        Ok(DateWindow { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The half-open UTC interval covering every day in the window, used
    /// to filter flexible blocks.
    pub fn interval(&self) -> TimeInterval {
        let start = self.start.and_time(NaiveTime::MIN).and_utc();
        let end_exclusive = self.end.succ_opt().unwrap_or(NaiveDate::MAX);
        TimeInterval::new_unchecked(start, end_exclusive.and_time(NaiveTime::MIN).and_utc())
    }

    fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Expand the visible block set into concrete occurrences for `window`.
///
/// Fixed blocks contribute one occurrence per window day whose weekday is
/// in their pattern; hidden fixed blocks contribute nothing. Flexible
/// blocks contribute their single occurrence iff it intersects the window.
/// Output is ordered by (start, occurrence id), so identical inputs yield
/// identical output.
pub fn expand_window(blocks: &[Block], window: &DateWindow) -> Vec<ConcreteOccurrence> {
    let mut occurrences = Vec::new();

    for block in blocks {
        match block {
            Block::Fixed(fixed) if fixed.visible => {
                occurrences.extend(expand_fixed(fixed, window));
            }
            Block::Fixed(_) => {}
            Block::Flexible(flexible) => {
                occurrences.extend(project_flexible(flexible, window));
            }
        }
    }

    occurrences.sort_by(|a, b| {
        a.interval
            .start()
            .cmp(&b.interval.start())
            .then_with(|| a.occurrence_id.cmp(&b.occurrence_id))
    });

    debug!(
        blocks = blocks.len(),
        occurrences = occurrences.len(),
        from = %window.start(),
        to = %window.end(),
        "expanded window"
    );

    occurrences
}

fn expand_fixed(block: &FixedBlock, window: &DateWindow) -> Vec<ConcreteOccurrence> {
    let mut out = Vec::new();

    for date in window.days() {
        let day = Weekday::from(date.weekday());
        if !block.days_of_week.contains(&day) {
            continue;
        }
        let start = date.and_time(block.daily_start).and_utc();
        let end = date.and_time(block.daily_end).and_utc();
        out.push(ConcreteOccurrence {
            occurrence_id: ConcreteOccurrence::fixed_occurrence_id(&block.id, day, date),
            source_id: block.id.clone(),
            kind: SourceKind::Fixed,
            label: block.label.clone(),
            // daily_start < daily_end is enforced by the FixedBlock constructor
            interval: TimeInterval::new_unchecked(start, end),
            movable: false,
            location: block.location.clone(),
            notes: block.secondary_info.clone(),
        });
    }

    out
}

fn project_flexible(block: &FlexibleBlock, window: &DateWindow) -> Option<ConcreteOccurrence> {
    if !block.occurrence.overlaps(&window.interval()) {
        return None;
    }
    Some(ConcreteOccurrence {
        occurrence_id: block.id.clone(),
        source_id: block.id.clone(),
        kind: SourceKind::Flexible,
        label: block.label.clone(),
        interval: block.occurrence,
        movable: true,
        location: block.location_text.clone(),
        notes: block.notes.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn mon_wed_class() -> FixedBlock {
        FixedBlock::new(
            "calc-101",
            "Calculus",
            vec![Weekday::Mon, Weekday::Wed],
            time(9, 0),
            time(10, 15),
        )
        .unwrap()
    }

    #[test]
    fn test_window_rejects_reversed_dates() {
        assert!(DateWindow::new(date(2026, 9, 14), date(2026, 9, 7)).is_err());
        assert!(DateWindow::new(date(2026, 9, 7), date(2026, 9, 7)).is_ok());
    }

    #[test]
    fn test_two_week_window_yields_four_occurrences() {
        // 2026-09-07 is a Monday; 14 calendar days cover 2 Mondays + 2 Wednesdays
        let window = DateWindow::new(date(2026, 9, 7), date(2026, 9, 20)).unwrap();
        let blocks = vec![Block::Fixed(mon_wed_class())];

        let occurrences = expand_window(&blocks, &window);

        assert_eq!(occurrences.len(), 4);
        let starts: Vec<_> = occurrences
            .iter()
            .map(|o| o.interval.start())
            .collect();
        assert_eq!(
            starts,
            vec![
                Utc.with_ymd_and_hms(2026, 9, 7, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 9, 9, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 9, 14, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 9, 16, 9, 0, 0).unwrap(),
            ]
        );
        for occurrence in &occurrences {
            assert_eq!(
                occurrence.interval.end() - occurrence.interval.start(),
                chrono::Duration::minutes(75)
            );
            assert!(!occurrence.movable);
            assert_eq!(occurrence.kind, SourceKind::Fixed);
        }
    }

    #[test]
    fn test_occurrence_ids_unique_within_window() {
        let window = DateWindow::new(date(2026, 9, 7), date(2026, 9, 20)).unwrap();
        let blocks = vec![Block::Fixed(mon_wed_class())];

        let occurrences = expand_window(&blocks, &window);
        let mut ids: Vec<_> = occurrences.iter().map(|o| &o.occurrence_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), occurrences.len());
    }

    #[test]
    fn test_hidden_fixed_block_expands_to_nothing() {
        let mut class = mon_wed_class();
        class.visible = false;
        let window = DateWindow::new(date(2026, 9, 7), date(2026, 9, 20)).unwrap();

        let occurrences = expand_window(&[Block::Fixed(class)], &window);
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let window = DateWindow::new(date(2026, 9, 1), date(2026, 9, 30)).unwrap();
        let blocks = vec![Block::Fixed(mon_wed_class())];

        let first = expand_window(&blocks, &window);
        let second = expand_window(&blocks, &window);
        let ids = |v: &[ConcreteOccurrence]| {
            v.iter().map(|o| o.occurrence_id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_flexible_block_filtered_by_window() {
        let inside = FlexibleBlock::new(
            "Gym",
            TimeInterval::new(
                Utc.with_ymd_and_hms(2026, 9, 8, 18, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 9, 8, 19, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        let outside = FlexibleBlock::new(
            "Trip",
            TimeInterval::new(
                Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        // Straddles the window start boundary, so it still shows
        let straddling = FlexibleBlock::new(
            "Red-eye study session",
            TimeInterval::new(
                Utc.with_ymd_and_hms(2026, 9, 6, 23, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 9, 7, 1, 0, 0).unwrap(),
            )
            .unwrap(),
        );

        let window = DateWindow::new(date(2026, 9, 7), date(2026, 9, 13)).unwrap();
        let blocks = vec![
            Block::Flexible(inside),
            Block::Flexible(outside),
            Block::Flexible(straddling),
        ];

        let occurrences = expand_window(&blocks, &window);
        let labels: Vec<_> = occurrences.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Red-eye study session", "Gym"]);
        assert!(occurrences.iter().all(|o| o.movable));
    }

    #[test]
    fn test_flexible_touching_window_end_is_excluded() {
        // Window [Sep 7, Sep 13] ends exclusive at Sep 14 00:00; an event
        // starting exactly there does not intersect
        let touching = FlexibleBlock::new(
            "Breakfast",
            TimeInterval::new(
                Utc.with_ymd_and_hms(2026, 9, 14, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 9, 14, 1, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        let window = DateWindow::new(date(2026, 9, 7), date(2026, 9, 13)).unwrap();

        let occurrences = expand_window(&[Block::Flexible(touching)], &window);
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_empty_block_set_expands_to_empty() {
        let window = DateWindow::new(date(2026, 9, 7), date(2026, 9, 13)).unwrap();
        assert!(expand_window(&[], &window).is_empty());
    }
}
