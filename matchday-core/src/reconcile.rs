//! Per-date create-or-skip decision.
//!
//! Each date is checked against the calendar before anything is written, so
//! running the whole sync again only creates what is still missing.

use std::fmt;

use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::calendar::Calendar;
use crate::date::CanonicalDate;
use crate::error::MatchdayResult;
use crate::event::{AllDayEvent, EventRef};

/// What happened to one date during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Created(EventRef),
    AlreadyPresent,
    Failed(String),
}

impl SyncOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed(_))
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Created(event) => match &event.html_link {
                Some(link) => write!(f, "created ({link})"),
                None => write!(f, "created"),
            },
            SyncOutcome::AlreadyPresent => write!(f, "already present"),
            SyncOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Reconciles dates against a calendar using a fixed title and timezone.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    title: String,
    timezone: Tz,
}

impl ReconciliationEngine {
    pub fn new(title: impl Into<String>, timezone: Tz) -> Self {
        ReconciliationEngine {
            title: title.into(),
            timezone,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The event that would be created for `date`.
    pub fn event_for(&self, date: CanonicalDate) -> AllDayEvent {
        AllDayEvent::new(self.title.clone(), date, self.timezone)
    }

    /// Whether an event with this engine's title starts on or after `date`.
    ///
    /// Any later match counts, so a fixture published after a later one is
    /// already in the calendar is reported as present.
    pub async fn check<C: Calendar>(&self, date: CanonicalDate, calendar: &C) -> MatchdayResult<bool> {
        let from = date.midnight_in(self.timezone);
        calendar.exists(&self.title, &from).await
    }

    /// Create the event for `date` unless it is already there.
    ///
    /// Never returns an error: failures are folded into [`SyncOutcome::Failed`]
    /// so one bad date cannot stop the others.
    pub async fn reconcile<C: Calendar>(&self, date: CanonicalDate, calendar: &C) -> SyncOutcome {
        match self.check(date, calendar).await {
            Ok(true) => {
                debug!(%date, title = %self.title, "event already present");
                return SyncOutcome::AlreadyPresent;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(%date, error = %e, "could not check for existing event");
                return SyncOutcome::Failed(e.to_string());
            }
        }

        let event = self.event_for(date);

        match calendar.create(&event).await {
            Ok(event_ref) => {
                info!(%date, id = %event_ref.id, "event created");
                SyncOutcome::Created(event_ref)
            }
            Err(e) => {
                warn!(%date, error = %e, "could not create event");
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}
