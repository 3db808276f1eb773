//! Chronological ordering of scheduled events
//!
//! An event's position in the running order comes from its date and time
//! strings. A missing or blank time means midnight. A date or time that
//! cannot be parsed yields [`ScheduleKey::Unparseable`], which orders after
//! every real timestamp so that a stable sort keeps malformed events at the
//! end in their input order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use recital_core::domain::Event;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 3] = ["%H:%M", "%H:%M:%S", "%H:%M:%S%.f"];

/// Sort key of an event in the running order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScheduleKey {
    /// Parsed start of the event
    At(NaiveDateTime),
    /// Date or time could not be parsed
    Unparseable,
}

impl ScheduleKey {
    /// Key of `event`
    pub fn of(event: &Event) -> Self {
        Self::parse(&event.date, event.time.as_deref())
    }

    /// Key for a raw date and optional time
    pub fn parse(date: &str, time: Option<&str>) -> Self {
        let Ok(day) = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) else {
            return Self::Unparseable;
        };
        match parse_time(time) {
            Some(t) => Self::At(day.and_time(t)),
            None => Self::Unparseable,
        }
    }

    /// Returns true if the event could be placed on the timeline
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::At(_))
    }
}

fn parse_time(time: Option<&str>) -> Option<NaiveTime> {
    let time = time.map(str::trim).unwrap_or_default();
    if time.is_empty() {
        return Some(NaiveTime::MIN);
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
}
