//! Weekday vocabulary for recurrence patterns.
//!
//! The vocabulary is the closed 7-symbol set of iCalendar BYDAY tags
//! (`SU MO TU WE TH FR SA`). The numeric mapping is fixed here and used
//! everywhere else: Sunday = 0 through Saturday = 6.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// One day of the week. Declaration order is Sunday-first so the enum
/// discriminant is the documented numeric index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    /// All seven days, Sunday-first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// The iCalendar BYDAY tag for this day.
    pub fn tag(self) -> &'static str {
        match self {
            Weekday::Sun => "SU",
            Weekday::Mon => "MO",
            Weekday::Tue => "TU",
            Weekday::Wed => "WE",
            Weekday::Thu => "TH",
            Weekday::Fri => "FR",
            Weekday::Sat => "SA",
        }
    }

    /// Sunday = 0 .. Saturday = 6.
    pub fn index_from_sunday(self) -> u8 {
        self as u8
    }

    /// Parse a BYDAY tag or a full English day name, case-insensitively.
    pub fn from_tag(tag: &str) -> ScheduleResult<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "SU" | "SUN" | "SUNDAY" => Ok(Weekday::Sun),
            "MO" | "MON" | "MONDAY" => Ok(Weekday::Mon),
            "TU" | "TUE" | "TUESDAY" => Ok(Weekday::Tue),
            "WE" | "WED" | "WEDNESDAY" => Ok(Weekday::Wed),
            "TH" | "THU" | "THURSDAY" => Ok(Weekday::Thu),
            "FR" | "FRI" | "FRIDAY" => Ok(Weekday::Fri),
            "SA" | "SAT" | "SATURDAY" => Ok(Weekday::Sat),
            _ => Err(ScheduleError::UnknownWeekday(tag.to_string())),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Weekday::Sun,
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
