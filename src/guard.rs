//! Move/resize validation.
//!
//! The guard is pure: it validates a proposal and returns the interval the
//! caller may commit. It never touches other blocks, so double-booking is
//! surfaced as a warning by the conflict detector, never blocked here.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use thiserror::Error;

use crate::block::Block;
use crate::interval::TimeInterval;

/// Why a proposed move/resize was not accepted. A rejection is a normal
/// outcome callers branch on, not a fault; the stored interval is
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("Fixed blocks cannot be moved or resized")]
    ImmutableBlock,

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("No block with id '{0}'")]
    UnknownBlock(String),
}

const SNAP_SECS: i64 = 15 * 60;

/// Round to the nearest quarter-hour boundary, half up, carrying into the
/// next day when rounding crosses midnight. Sub-second precision is
/// dropped; proposals arrive at second granularity.
pub fn snap_to_quarter_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = instant.date_naive().and_time(NaiveTime::MIN).and_utc();
    let secs = i64::from(instant.time().num_seconds_from_midnight());
    let snapped = (secs + SNAP_SECS / 2) / SNAP_SECS * SNAP_SECS;
    midnight + Duration::seconds(snapped)
}

/// Validate a proposed move/resize of `block` to
/// `[proposed_start, proposed_end)`.
///
/// Fixed blocks are rejected unconditionally, before the proposal is even
/// looked at. Flexible proposals are snapped to the quarter-hour grid
/// (move and resize go through the same path) and must keep a positive
/// duration after snapping.
pub fn validate_move(
    block: &Block,
    proposed_start: DateTime<Utc>,
    proposed_end: DateTime<Utc>,
) -> Result<TimeInterval, MoveRejection> {
    match block {
        Block::Fixed(_) => Err(MoveRejection::ImmutableBlock),
        Block::Flexible(_) => {
            let start = snap_to_quarter_hour(proposed_start);
            let end = snap_to_quarter_hour(proposed_end);
            if start >= end {
                return Err(MoveRejection::InvalidInterval(format!(
                    "snapped interval {} .. {} is empty",
                    start.to_rfc3339(),
                    end.to_rfc3339()
                )));
            }
            Ok(TimeInterval::new_unchecked(start, end))
        }
    }
}
