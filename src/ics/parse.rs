//! ICS file parsing for the import direction.
//!
//! A lenient reader: it recovers the fields the export direction writes
//! and skips events it cannot make sense of rather than failing the whole
//! document.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// One event recovered from an interchange document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedEvent {
    pub uid: String,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Default)]
struct PartialEvent {
    uid: Option<String>,
    label: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    location: Option<String>,
    description: Option<String>,
}

impl PartialEvent {
    // Require at minimum UID, start, and end
    fn finish(self) -> Option<ImportedEvent> {
        Some(ImportedEvent {
            uid: self.uid?,
            label: self.label.unwrap_or_else(|| "(No title)".to_string()),
            start: self.start?,
            end: self.end?,
            location: self.location,
            description: self.description,
        })
    }
}

/// Parse every VEVENT in `content`. Malformed events are skipped.
pub fn parse_calendar(content: &str) -> Vec<ImportedEvent> {
    let mut events = Vec::new();
    let mut current: Option<PartialEvent> = None;
    let mut in_valarm = false;

    for line in unfold_lines(content) {
        match line.as_str() {
            "BEGIN:VEVENT" => {
                current = Some(PartialEvent::default());
                continue;
            }
            "END:VEVENT" => {
                if let Some(partial) = current.take() {
                    if let Some(event) = partial.finish() {
                        events.push(event);
                    }
                }
                continue;
            }
            // Alarm properties (DESCRIPTION etc.) must not bleed into the event
            "BEGIN:VALARM" => {
                in_valarm = true;
                continue;
            }
            "END:VALARM" => {
                in_valarm = false;
                continue;
            }
            _ => {}
        }

        if in_valarm {
            continue;
        }
        let partial = match current.as_mut() {
            Some(p) => p,
            None => continue,
        };
        let (key, params, value) = match split_property_line(&line) {
            Some(parts) => parts,
            None => continue,
        };

        match key.as_str() {
            "UID" => partial.uid = Some(value),
            "SUMMARY" => partial.label = Some(value),
            "LOCATION" => partial.location = Some(value),
            "DESCRIPTION" => partial.description = Some(value),
            "DTSTART" => partial.start = parse_datetime(&value, &params),
            "DTEND" => partial.end = parse_datetime(&value, &params),
            _ => {}
        }
    }

    events
}

/// Undo RFC 5545 line folding (continuation lines start with a single
/// space or tab; only the indicator character is removed).
fn unfold_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in content.lines() {
        if (line.starts_with(' ') || line.starts_with('\t')) && !lines.is_empty() {
            let last = lines.len() - 1;
            lines[last].push_str(&line[1..]);
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

/// Split a property line into key, parameter string, and unescaped value.
fn split_property_line(line: &str) -> Option<(String, String, String)> {
    let colon_pos = line.find(':')?;
    let key_part = &line[..colon_pos];
    let value = &line[colon_pos + 1..];

    let mut parts = key_part.splitn(2, ';');
    let key = parts.next()?.to_string();
    let params = parts.next().unwrap_or("").to_string();

    Some((key, params, unescape_ics_value(value)))
}

/// Reverse RFC 5545 text escaping: `\\` `\,` `\;` `\n` `\N`.
fn unescape_ics_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') => result.push('\\'),
            Some('n') | Some('N') => result.push('\n'),
            // Not a recognized escape: keep both characters
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Parse a DTSTART/DTEND value: `YYYYMMDD` (date only, midnight UTC),
/// `YYYYMMDDTHHMMSS[Z]`, optionally localized by a `TZID=` parameter.
fn parse_datetime(value: &str, params: &str) -> Option<DateTime<Utc>> {
    let is_date = params.contains("VALUE=DATE")
        || (value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()));
    if is_date {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    let naive =
        NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y%m%dT%H%M%S").ok()?;

    if let Some(tzid) = params
        .split(';')
        .find_map(|p| p.strip_prefix("TZID="))
    {
        let tz = Tz::from_str(tzid).ok()?;
        return Some(
            tz.from_local_datetime(&naive)
                .earliest()?
                .with_timezone(&Utc),
        );
    }

    // Trailing Z (UTC) and floating times both resolve to UTC here
    Some(naive.and_utc())
}
