use anyhow::Result;
use matchday_core::{ReconciliationEngine, SyncDriver};
use matchday_google::GoogleCalendar;
use owo_colors::OwoColorize;

use super::{RunArgs, load_fragments, reference_date};
use crate::config::MatchdayConfig;
use crate::render::{Render, render_status};

/// Like `sync`, but only checks which dates are missing. Never writes.
pub async fn run(mut cfg: MatchdayConfig, args: RunArgs) -> Result<()> {
    args.apply(&mut cfg);

    let timezone = cfg.timezone()?;
    let reference = reference_date(args.today, timezone);
    let account = cfg.require_account()?.to_string();

    let fragments = load_fragments(&cfg, args.html.as_ref()).await?;
    let calendar = GoogleCalendar::connect(&account, cfg.calendar_id.clone()).await?;

    let driver = SyncDriver::new(
        cfg.normalizer()?,
        ReconciliationEngine::new(cfg.title.clone(), timezone),
    );
    let ingest = driver.collect(&fragments, reference);

    println!("📅 {} → {}", cfg.title, calendar.calendar_id());

    let mut missing = 0;
    for date in ingest.dates.all() {
        let present = driver
            .engine()
            .check(date, &calendar)
            .await
            .map_err(|e| e.to_string());

        if present == Ok(false) {
            missing += 1;
        }
        println!("{}", render_status(date, &present));
    }

    for rejected in &ingest.rejected {
        println!("   {}", rejected.render());
    }

    if missing == 0 {
        println!("\nEverything up to date.");
    } else {
        println!(
            "\n{} missing. Run `matchday sync` to add {}.",
            missing.to_string().green(),
            if missing == 1 { "it" } else { "them" }
        );
    }

    Ok(())
}
