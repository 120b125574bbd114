//! One synchronization run: fragments in, per-date outcomes out.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::calendar::Calendar;
use crate::date::CanonicalDate;
use crate::date_set::DateSet;
use crate::normalize::DateNormalizer;
use crate::reconcile::{ReconciliationEngine, SyncOutcome};

/// A fragment that did not contain a usable date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFragment {
    pub fragment: String,
    pub reason: String,
}

/// Result of the ingestion phase.
#[derive(Debug, Clone, Default)]
pub struct Ingest {
    pub dates: DateSet,
    pub rejected: Vec<RejectedFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOutcome {
    pub date: CanonicalDate,
    pub outcome: SyncOutcome,
}

/// Everything a run did, for reporting. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<DateOutcome>,
    pub rejected: Vec<RejectedFragment>,
}

impl SyncReport {
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Created(_)))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::AlreadyPresent))
    }

    pub fn failed(&self) -> usize {
        self.count(SyncOutcome::is_failure)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }
}

pub struct SyncDriver {
    normalizer: DateNormalizer,
    engine: ReconciliationEngine,
}

impl SyncDriver {
    pub fn new(normalizer: DateNormalizer, engine: ReconciliationEngine) -> Self {
        SyncDriver { normalizer, engine }
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    /// Normalize and deduplicate fragments. Malformed ones are skipped and
    /// recorded.
    pub fn collect<I, S>(&self, fragments: I, reference: NaiveDate) -> Ingest
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ingest = Ingest::default();

        for fragment in fragments {
            let fragment = fragment.as_ref();

            match self.normalizer.normalize(fragment, reference) {
                Ok(date) => {
                    if !ingest.dates.add(date) {
                        debug!(%date, fragment, "duplicate date");
                    }
                }
                Err(e) => {
                    warn!(fragment, "skipping fragment: {}", e);
                    ingest.rejected.push(RejectedFragment {
                        fragment: fragment.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        ingest
    }

    /// Ingest all fragments, then reconcile every distinct date once.
    pub async fn run<I, S, C>(&self, fragments: I, reference: NaiveDate, calendar: &C) -> SyncReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Calendar,
    {
        let Ingest { dates, rejected } = self.collect(fragments, reference);

        info!(
            dates = dates.len(),
            rejected = rejected.len(),
            "reconciling schedule"
        );

        let mut outcomes = Vec::with_capacity(dates.len());
        for date in dates.all() {
            let outcome = self.engine.reconcile(date, calendar).await;
            outcomes.push(DateOutcome { date, outcome });
        }

        SyncReport { outcomes, rejected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> SyncDriver {
        SyncDriver::new(
            DateNormalizer::new(),
            ReconciliationEngine::new("Match", chrono_tz::Asia::Jerusalem),
        )
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn collect_dedups_and_skips_malformed() {
        let fragments = ["20/4 20:00", "Derby 20/4 19:00", "TBD", "15/2 19:30"];

        let ingest = driver().collect(fragments, reference());

        let dates: Vec<String> = ingest.dates.all().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-04-20", "2025-02-15"]);
        assert_eq!(ingest.rejected.len(), 1);
        assert_eq!(ingest.rejected[0].fragment, "TBD");
    }

    #[test]
    fn collect_accepts_owned_strings() {
        let fragments = vec![String::from("1/5"), String::from("no date here")];

        let ingest = driver().collect(&fragments, reference());

        assert_eq!(ingest.dates.len(), 1);
        assert_eq!(ingest.rejected.len(), 1);
    }

    #[test]
    fn report_counts() {
        let date = CanonicalDate::from_ymd(2024, 4, 20).unwrap();
        let report = SyncReport {
            outcomes: vec![
                DateOutcome {
                    date,
                    outcome: SyncOutcome::AlreadyPresent,
                },
                DateOutcome {
                    date,
                    outcome: SyncOutcome::Failed("boom".into()),
                },
            ],
            rejected: Vec::new(),
        };

        assert_eq!(report.created(), 0);
        assert_eq!(report.already_present(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
    }
}
