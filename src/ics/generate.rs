//! ICS file generation.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};
use tracing::debug;

use crate::block::Block;
use crate::interval::TimeInterval;
use crate::occurrence::{ConcreteOccurrence, SourceKind};
use crate::weekday::Weekday;

/// Build the export set from the current block set.
///
/// Each visible fixed block contributes one representative occurrence per
/// distinct weekday in its pattern, dated at the nearest occurrence of
/// that weekday on or after `today`: the exported artifact is a template
/// of a typical week, not a multi-week duplication. Each flexible block
/// contributes its single occurrence. Hidden fixed blocks never appear.
pub fn export_occurrences(blocks: &[Block], today: NaiveDate) -> Vec<ConcreteOccurrence> {
    let mut occurrences = Vec::new();

    for block in blocks {
        match block {
            Block::Fixed(fixed) if fixed.visible => {
                for &day in &fixed.days_of_week {
                    let date = nearest_on_or_after(today, day);
                    let start = date.and_time(fixed.daily_start).and_utc();
                    let end = date.and_time(fixed.daily_end).and_utc();
                    occurrences.push(ConcreteOccurrence {
                        occurrence_id: ConcreteOccurrence::fixed_occurrence_id(
                            &fixed.id, day, date,
                        ),
                        source_id: fixed.id.clone(),
                        kind: SourceKind::Fixed,
                        label: fixed.label.clone(),
                        interval: TimeInterval::new_unchecked(start, end),
                        movable: false,
                        location: fixed.location.clone(),
                        notes: fixed.secondary_info.clone(),
                    });
                }
            }
            Block::Fixed(_) => {}
            Block::Flexible(flexible) => {
                occurrences.push(ConcreteOccurrence {
                    occurrence_id: flexible.id.clone(),
                    source_id: flexible.id.clone(),
                    kind: SourceKind::Flexible,
                    label: flexible.label.clone(),
                    interval: flexible.occurrence,
                    movable: true,
                    location: flexible.location_text.clone(),
                    notes: flexible.notes.clone(),
                });
            }
        }
    }

    occurrences.sort_by(|a, b| {
        a.interval
            .start()
            .cmp(&b.interval.start())
            .then_with(|| a.occurrence_id.cmp(&b.occurrence_id))
    });
    occurrences
}

/// Nearest date falling on `day`, counting `today` itself.
fn nearest_on_or_after(today: NaiveDate, day: Weekday) -> NaiveDate {
    let today_idx = i64::from(Weekday::from(today.weekday()).index_from_sunday());
    let target_idx = i64::from(day.index_from_sunday());
    today + Duration::days((target_idx - today_idx).rem_euclid(7))
}

/// Render occurrences as a single VCALENDAR document.
///
/// With `zone = None` instants are stamped as UTC (`...Z`); with a zone
/// they are stamped as local time carrying a `TZID=` parameter. The
/// zero-occurrence case still yields a well-formed empty calendar.
pub fn serialize_calendar(
    occurrences: &[ConcreteOccurrence],
    calendar_name: &str,
    zone: Option<Tz>,
) -> String {
    let mut cal = Calendar::new();

    // X-WR-CALNAME - human-readable calendar name (de facto standard)
    cal.append_property(Property::new("X-WR-CALNAME", calendar_name));

    // DTSTAMP - required by RFC 5545 on every VEVENT
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for occurrence in occurrences {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@blockplan", occurrence.occurrence_id));
        ics_event.summary(&sanitize(&occurrence.label));
        ics_event.add_property("DTSTAMP", &dtstamp);

        add_datetime_property(&mut ics_event, "DTSTART", occurrence.interval.start(), zone);
        add_datetime_property(&mut ics_event, "DTEND", occurrence.interval.end(), zone);

        if let Some(ref location) = occurrence.location {
            ics_event.location(&sanitize(location));
        }
        if let Some(ref notes) = occurrence.notes {
            ics_event.description(&sanitize(notes));
        }

        cal.push(ics_event.done());
    }

    debug!(
        events = occurrences.len(),
        calendar = calendar_name,
        "generated ics"
    );

    cal.done().to_string()
}

/// Add a datetime property in the UTC `...Z` form, or the local form with
/// a TZID parameter when an export zone is given.
fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    instant: DateTime<Utc>,
    zone: Option<Tz>,
) {
    match zone {
        None => {
            ics_event.add_property(name, instant.format("%Y%m%dT%H%M%SZ").to_string());
        }
        Some(tz) => {
            let local = instant.with_timezone(&tz);
            let mut prop = Property::new(name, local.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", tz.name());
            ics_event.append_property(prop);
        }
    }
}

/// Best-effort correction for text outside the expected encoding: control
/// characters other than newline never reach the document. RFC 5545 text
/// escaping itself (backslash, comma, semicolon, newline) is applied by
/// the icalendar serializer.
fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control() || *c == '\n').collect()
}
