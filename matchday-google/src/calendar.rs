//! [`Calendar`] implementation backed by the Google Calendar API.

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use google_calendar::Client;
use google_calendar::types::{OrderBy, SendUpdates};
use matchday_core::{AllDayEvent, Calendar, EventRef, MatchdayError, MatchdayResult};
use tracing::debug;

use crate::convert::{self, ToGoogle};
use crate::session::Session;

/// Google's alias for the user's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

pub struct GoogleCalendar {
    client: Client,
    calendar_id: String,
}

impl GoogleCalendar {
    /// Open `calendar_id` using the stored session for `account_email`.
    pub async fn connect(account_email: &str, calendar_id: impl Into<String>) -> Result<Self> {
        let client = Session::load_valid(account_email).await?.client()?;

        Ok(GoogleCalendar {
            client,
            calendar_id: calendar_id.into(),
        })
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }
}

impl Calendar for GoogleCalendar {
    async fn exists(&self, title: &str, from: &DateTime<Tz>) -> MatchdayResult<bool> {
        let time_min = from.to_rfc3339();

        let response = self
            .client
            .events()
            .list_all(
                &self.calendar_id,
                "",
                0,
                OrderBy::StartTime,
                &[],
                title, // search query
                &[],
                false,
                false,
                true, // single events, so recurring ones are expanded
                "", // no upper bound
                &time_min,
                from.timezone().name(),
                "",
            )
            .await
            .map_err(|e| MatchdayError::CalendarQueryFailed(format!("Failed to fetch events: {e}")))?;

        debug!(
            calendar = %self.calendar_id,
            candidates = response.body.len(),
            %time_min,
            "searched for existing event"
        );

        Ok(response
            .body
            .iter()
            .any(|event| convert::is_duplicate(event, title, from)))
    }

    async fn create(&self, event: &AllDayEvent) -> MatchdayResult<EventRef> {
        let google_event = event.to_google();

        let response = self
            .client
            .events()
            .insert(
                &self.calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .map_err(|e| {
                MatchdayError::CalendarWriteFailed(format!(
                    "Failed to create event {} on {}: {e}",
                    event.summary, event.start
                ))
            })?;

        Ok(convert::event_ref(response.body))
    }
}
