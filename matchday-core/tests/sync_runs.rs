//! Whole-run behavior of the sync driver against an in-memory calendar.

use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use matchday_core::{
    AllDayEvent, Calendar, CanonicalDate, DateNormalizer, EventRef, MatchdayError,
    MatchdayResult, ReconciliationEngine, SyncDriver, SyncOutcome,
};

const TITLE: &str = "Sammy Ofer Football match";

/// Stores events in memory; can be told to reject writes for one day.
#[derive(Default)]
struct MemoryCalendar {
    events: Mutex<Vec<AllDayEvent>>,
    reject_writes_on: Option<NaiveDate>,
}

impl MemoryCalendar {
    fn events(&self) -> Vec<AllDayEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Calendar for MemoryCalendar {
    async fn exists(&self, title: &str, from: &DateTime<Tz>) -> MatchdayResult<bool> {
        let day = from.date_naive();
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.summary == title && e.start >= day))
    }

    async fn create(&self, event: &AllDayEvent) -> MatchdayResult<EventRef> {
        if self.reject_writes_on == Some(event.start) {
            return Err(MatchdayError::CalendarWriteFailed("rate limited".into()));
        }
        let mut events = self.events.lock().unwrap();
        events.push(event.clone());
        Ok(EventRef {
            id: format!("{}", event.start),
            html_link: None,
        })
    }
}

fn driver() -> SyncDriver {
    SyncDriver::new(
        DateNormalizer::new(),
        ReconciliationEngine::new(TITLE, chrono_tz::Asia::Jerusalem),
    )
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn schedule() -> Vec<&'static str> {
    vec![
        "Maccabi Haifa - Hapoel Tel Aviv 15/2 19:30",
        "Maccabi Haifa - Beitar 20/4 20:00",
        "Cup semi-final 20/4 20:00",
        "Date to be announced",
        "Maccabi Haifa - Bnei Sakhnin 4/5 21:00",
    ]
}

#[tokio::test]
async fn first_run_creates_one_event_per_distinct_date() {
    let calendar = MemoryCalendar::default();

    let report = driver().run(schedule(), reference(), &calendar).await;

    assert_eq!(report.created(), 3);
    assert_eq!(report.already_present(), 0);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].fragment, "Date to be announced");

    let mut starts: Vec<String> = calendar.events().iter().map(|e| e.start.to_string()).collect();
    starts.sort();
    assert_eq!(starts, vec!["2024-04-20", "2024-05-04", "2025-02-15"]);
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let calendar = MemoryCalendar::default();
    let driver = driver();

    driver.run(schedule(), reference(), &calendar).await;
    let second = driver.run(schedule(), reference(), &calendar).await;

    assert_eq!(second.created(), 0);
    assert_eq!(second.already_present(), 3);
    assert!(second
        .outcomes
        .iter()
        .all(|o| o.outcome == SyncOutcome::AlreadyPresent));
    assert_eq!(calendar.events().len(), 3);
}

#[tokio::test]
async fn one_failed_write_does_not_stop_the_others() {
    let calendar = MemoryCalendar {
        reject_writes_on: NaiveDate::from_ymd_opt(2024, 4, 20),
        ..Default::default()
    };

    let report = driver().run(schedule(), reference(), &calendar).await;

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.created(), 2);

    let failed = report
        .outcomes
        .iter()
        .find(|o| o.outcome.is_failure())
        .unwrap();
    assert_eq!(failed.date, CanonicalDate::from_ymd(2024, 4, 20).unwrap());
    assert!(matches!(&failed.outcome, SyncOutcome::Failed(r) if r.contains("rate limited")));
}

#[tokio::test]
async fn failed_date_is_retried_on_next_run() {
    let flaky = MemoryCalendar {
        reject_writes_on: NaiveDate::from_ymd_opt(2025, 2, 15),
        ..Default::default()
    };
    driver().run(schedule(), reference(), &flaky).await;

    let healthy = MemoryCalendar {
        events: Mutex::new(flaky.events()),
        reject_writes_on: None,
    };
    let report = driver().run(schedule(), reference(), &healthy).await;

    assert_eq!(report.created(), 1);
    assert_eq!(report.already_present(), 2);
}

#[tokio::test]
async fn only_malformed_fragments_reconcile_nothing() {
    let calendar = MemoryCalendar::default();

    let report = driver()
        .run(["", "Postponed", "kickoff 19:30"], reference(), &calendar)
        .await;

    assert!(report.outcomes.is_empty());
    assert_eq!(report.rejected.len(), 3);
    assert!(calendar.events().is_empty());
}

#[tokio::test]
async fn every_created_event_spans_exactly_one_day() {
    let calendar = MemoryCalendar::default();

    driver().run(schedule(), reference(), &calendar).await;

    for event in calendar.events() {
        assert_eq!(event.end, event.start + Duration::days(1));
        assert_ne!(event.start, event.end);
        assert_eq!(event.summary, TITLE);
    }
}

#[tokio::test]
async fn later_fixture_hides_newly_published_earlier_one() {
    let calendar = MemoryCalendar::default();
    driver()
        .run(["Maccabi Haifa - Bnei Sakhnin 4/5 21:00"], reference(), &calendar)
        .await;

    let report = driver()
        .run(["Maccabi Haifa - Beitar 20/4 20:00"], reference(), &calendar)
        .await;

    assert_eq!(report.already_present(), 1);
    assert_eq!(report.created(), 0);
    assert_eq!(calendar.events().len(), 1);
}
