//! Interchange (.ics) serialization and the import direction.

mod generate;
mod parse;

pub use generate::{export_occurrences, serialize_calendar};
pub use parse::{parse_calendar, ImportedEvent};
