//! Provider-neutral event types.
//!
//! The engine only ever creates one kind of event: an all-day entry with a
//! fixed title. Backends convert [`AllDayEvent`] into their own API types and
//! hand back an [`EventRef`].

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::date::CanonicalDate;

/// An all-day calendar event spanning exactly one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllDayEvent {
    pub summary: String,
    pub start: NaiveDate,
    /// Exclusive: always the day after `start`.
    pub end: NaiveDate,
    pub timezone: Tz,
}

impl AllDayEvent {
    pub fn new(summary: impl Into<String>, date: CanonicalDate, timezone: Tz) -> Self {
        AllDayEvent {
            summary: summary.into(),
            start: date.naive(),
            end: date.next_day(),
            timezone,
        }
    }

    pub fn date(&self) -> CanonicalDate {
        CanonicalDate::from(self.start)
    }
}

/// Opaque handle to an event the backend created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    pub id: String,
    /// Link to open the event in a browser, when the backend has one.
    pub html_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn all_day_event_ends_the_next_day() {
        let date = CanonicalDate::from_ymd(2024, 2, 29).unwrap();
        let event = AllDayEvent::new("Match", date, chrono_tz::Asia::Jerusalem);

        assert_eq!(event.start, date.naive());
        assert_eq!(event.end, event.start + Duration::days(1));
        assert_ne!(event.start, event.end);
        assert_eq!(event.end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(event.date(), date);
    }
}
