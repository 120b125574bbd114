pub mod auth;
pub mod parse;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use crate::config::MatchdayConfig;
use crate::scrape::Scraper;

/// Flags shared by `sync` and `status`. Each one overrides the config file.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Pretend today is this date (YYYY-MM-DD); decides which year short dates land in
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Read the schedule from a saved HTML file instead of fetching it
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Schedule page URL
    #[arg(long)]
    pub url: Option<String>,

    /// Event title
    #[arg(long)]
    pub title: Option<String>,

    /// Venue timezone (e.g. "Asia/Jerusalem")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Calendar ID (defaults to "primary")
    #[arg(short, long)]
    pub calendar: Option<String>,

    /// Google account email
    #[arg(short, long)]
    pub account: Option<String>,
}

impl RunArgs {
    pub fn apply(&self, cfg: &mut MatchdayConfig) {
        if let Some(url) = &self.url {
            cfg.source.url = url.clone();
        }
        if let Some(title) = &self.title {
            cfg.title = title.clone();
        }
        if let Some(timezone) = &self.timezone {
            cfg.timezone = timezone.clone();
        }
        if let Some(calendar) = &self.calendar {
            cfg.calendar_id = calendar.clone();
        }
        if let Some(account) = &self.account {
            cfg.account = Some(account.clone());
        }
    }
}

/// The date short-form fragments are resolved against.
pub fn reference_date(today: Option<NaiveDate>, timezone: Tz) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().with_timezone(&timezone).date_naive())
}

/// Raw fragments from the configured page, or from a local file.
pub async fn load_fragments(cfg: &MatchdayConfig, html: Option<&PathBuf>) -> Result<Vec<String>> {
    let scraper = Scraper::new(&cfg.source)?;

    if let Some(path) = html {
        let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(scraper.extract(&contents));
    }

    let spinner = fetch_spinner(scraper.url());
    let result = scraper.fetch().await;
    spinner.finish_and_clear();

    result
}

fn fetch_spinner(url: &Url) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/", "-"])
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(fetch_message(url));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn fetch_message(url: &Url) -> String {
    match url.host_str() {
        Some(host) => format!("Fetching schedule from {host}"),
        None => format!("Fetching schedule from {url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let mut cfg: MatchdayConfig = toml_config();
        let args = RunArgs {
            title: Some("Derby".into()),
            calendar: Some("sports".into()),
            account: Some("fan@example.com".into()),
            ..Default::default()
        };

        args.apply(&mut cfg);

        assert_eq!(cfg.title, "Derby");
        assert_eq!(cfg.calendar_id, "sports");
        assert_eq!(cfg.account.as_deref(), Some("fan@example.com"));
        assert_eq!(cfg.timezone, "Asia/Jerusalem");
    }

    #[test]
    fn explicit_today_wins() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(reference_date(Some(today), chrono_tz::Asia::Jerusalem), today);
    }

    #[tokio::test]
    async fn fragments_from_local_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.html");
        std::fs::write(
            &path,
            r#"<div class="elementor-section-wrap">
                 <section class="elementor-section elementor-top-section elementor-element">
                   <div class="elementor-text-editor elementor-clearfix">Derby 1/5 20:00</div>
                 </section>
               </div>"#,
        )
        .unwrap();

        let fragments = load_fragments(&toml_config(), Some(&path)).await.unwrap();

        assert_eq!(fragments, vec!["Derby 1/5 20:00"]);
    }

    #[test]
    fn fetch_message_names_the_host() {
        let url = Url::parse("https://www.haifa-stadium.com/schedule_of_matches_in_the_stadium/")
            .unwrap();

        assert_eq!(
            fetch_message(&url),
            "Fetching schedule from www.haifa-stadium.com"
        );
    }

    fn toml_config() -> MatchdayConfig {
        serde_json::from_str("{}").unwrap()
    }
}
