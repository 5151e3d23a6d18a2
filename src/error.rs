//! Error types for the blockplan core.

use thiserror::Error;

/// Errors raised at the model boundary.
///
/// Construction-time validation (`InvalidInterval`,
/// `InvalidRecurrencePattern`, `UnknownWeekday`) blocks a record from ever
/// entering the block model; expansion, conflict detection and
/// serialization are total given valid inputs.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid recurrence pattern: {0}")]
    InvalidRecurrencePattern(String),

    #[error("Unrecognized weekday tag: {0}")]
    UnknownWeekday(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for blockplan operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
