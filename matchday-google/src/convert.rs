//! Conversion between matchday events and Google Calendar API types.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use google_calendar::types::{Event as GoogleEvent, EventDateTime};
use matchday_core::{AllDayEvent, EventRef};

pub trait ToGoogle {
    fn to_google(&self) -> GoogleEvent;
}

impl ToGoogle for AllDayEvent {
    fn to_google(&self) -> GoogleEvent {
        GoogleEvent {
            summary: self.summary.clone(),
            start: Some(all_day(self.start, self.timezone)),
            end: Some(all_day(self.end, self.timezone)),
            ..Default::default()
        }
    }
}

fn all_day(date: NaiveDate, timezone: Tz) -> EventDateTime {
    EventDateTime {
        date: Some(date),
        date_time: None,
        time_zone: timezone.name().to_string(),
    }
}

pub fn event_ref(event: GoogleEvent) -> EventRef {
    EventRef {
        id: event.id,
        html_link: Some(event.html_link).filter(|link| !link.is_empty()),
    }
}

/// The search query is a full-text match, so the exact title and the start
/// have to be checked again on our side. All-day events are compared by
/// date in the timezone of `from`.
pub fn is_duplicate(event: &GoogleEvent, title: &str, from: &DateTime<Tz>) -> bool {
    if event.summary != title || event.status == "cancelled" {
        return false;
    }

    match &event.start {
        Some(EventDateTime {
            date_time: Some(dt), ..
        }) => *dt >= from.with_timezone(&Utc),
        Some(EventDateTime { date: Some(d), .. }) => *d >= from.date_naive(),
        _ => false,
    }
}
