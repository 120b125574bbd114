//! The calendar backend seen by the engine.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::MatchdayResult;
use crate::event::{AllDayEvent, EventRef};

/// A calendar that can answer "is this event already there?" and create
/// all-day events.
///
/// Implementations report query failures as
/// [`MatchdayError::CalendarQueryFailed`](crate::MatchdayError::CalendarQueryFailed)
/// and write failures as
/// [`MatchdayError::CalendarWriteFailed`](crate::MatchdayError::CalendarWriteFailed).
#[allow(async_fn_in_trait)]
pub trait Calendar {
    /// True if at least one event titled exactly `title` starts at or after
    /// `from`. Events on later days count too.
    async fn exists(&self, title: &str, from: &DateTime<Tz>) -> MatchdayResult<bool>;

    async fn create(&self, event: &AllDayEvent) -> MatchdayResult<EventRef>;
}
