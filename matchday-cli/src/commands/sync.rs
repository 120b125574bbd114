use anyhow::Result;
use matchday_core::{ReconciliationEngine, SyncDriver};
use matchday_google::GoogleCalendar;
use tracing::info;

use super::{RunArgs, load_fragments, reference_date};
use crate::config::MatchdayConfig;
use crate::render::Render;

pub async fn run(mut cfg: MatchdayConfig, args: RunArgs) -> Result<()> {
    args.apply(&mut cfg);

    let timezone = cfg.timezone()?;
    let normalizer = cfg.normalizer()?;
    let reference = reference_date(args.today, timezone);
    let account = cfg.require_account()?.to_string();

    let fragments = load_fragments(&cfg, args.html.as_ref()).await?;
    info!(fragments = fragments.len(), %reference, "schedule loaded");

    let calendar = GoogleCalendar::connect(&account, cfg.calendar_id.clone()).await?;

    println!("📅 {} → {}", cfg.title, calendar.calendar_id());

    let driver = SyncDriver::new(normalizer, ReconciliationEngine::new(cfg.title.clone(), timezone));
    let report = driver.run(&fragments, reference, &calendar).await;

    println!("{}", report.render());

    if report.has_failures() {
        anyhow::bail!("{} of {} dates could not be synced", report.failed(), report.outcomes.len());
    }

    Ok(())
}
