//! Schedule consistency core for the blockplan calendar.
//!
//! This crate is the data-correctness engine behind a personal schedule
//! planner built from two block kinds: recurring, immovable fixed blocks
//! (e.g. class sections extracted from an uploaded document) and
//! single-occurrence, movable flexible blocks. Everything here is a pure
//! function over values handed in by the caller; storage, extraction and
//! delivery are external collaborators.
//!
//! - [`block`]: the two block kinds and the closed `Block` variant
//! - [`expand`]: weekly patterns to concrete occurrences for a window
//! - [`conflict`]: pairwise half-open overlap detection
//! - [`guard`]: move/resize validation with quarter-hour snapping
//! - [`ics`]: interchange (.ics) export and the import direction
//! - [`schedule`]: the in-memory working set for one partition
//! - [`intake`]: validation gate for extraction-collaborator records
//! - [`error`]: error types

pub mod block;
pub mod conflict;
pub mod error;
pub mod expand;
pub mod guard;
pub mod ics;
pub mod intake;
pub mod interval;
pub mod occurrence;
pub mod schedule;
pub mod weekday;

pub use block::{Block, FixedBlock, FlexibleBlock};
pub use conflict::{find_conflicts, ConflictPair, ConflictSide};
pub use error::{ScheduleError, ScheduleResult};
pub use expand::{expand_window, DateWindow};
pub use guard::{snap_to_quarter_hour, validate_move, MoveRejection};
pub use ics::{export_occurrences, parse_calendar, serialize_calendar, ImportedEvent};
pub use intake::{admit_candidates, parse_candidates, CandidateBlock, Intake, RejectedCandidate};
pub use interval::TimeInterval;
pub use occurrence::{ConcreteOccurrence, SourceKind};
pub use schedule::Schedule;
pub use weekday::Weekday;
