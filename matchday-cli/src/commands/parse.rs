use anyhow::Result;
use chrono::NaiveDate;
use matchday_core::{CanonicalDate, ReconciliationEngine, SyncDriver};

use super::reference_date;
use crate::config::MatchdayConfig;
use crate::render::Render;

/// Normalize fragments given on the command line. No network access.
pub fn run(cfg: MatchdayConfig, fragments: Vec<String>, today: Option<NaiveDate>, json: bool) -> Result<()> {
    let timezone = cfg.timezone()?;
    let reference = reference_date(today, timezone);

    let driver = SyncDriver::new(cfg.normalizer()?, ReconciliationEngine::new(cfg.title, timezone));
    let ingest = driver.collect(&fragments, reference);

    if json {
        let dates: Vec<CanonicalDate> = ingest.dates.all().collect();
        println!("{}", serde_json::to_string_pretty(&dates)?);
        return Ok(());
    }

    for date in ingest.dates.all() {
        println!("{}", date);
    }
    for rejected in &ingest.rejected {
        eprintln!("{}", rejected.render());
    }

    Ok(())
}
