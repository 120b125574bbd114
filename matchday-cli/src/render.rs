//! Colored terminal rendering for sync results.

use matchday_core::{CanonicalDate, DateOutcome, RejectedFragment, SyncOutcome, SyncReport};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for DateOutcome {
    fn render(&self) -> String {
        let date = self.date.to_string();
        match &self.outcome {
            SyncOutcome::Created(event) => {
                let link = event.html_link.as_deref().unwrap_or_default();
                format!("{} {} {}", "+".green(), date.green(), link.dimmed())
            }
            SyncOutcome::AlreadyPresent => {
                format!("{} {} {}", "=".dimmed(), date, "(already in calendar)".dimmed())
            }
            SyncOutcome::Failed(reason) => {
                format!("{} {} {}", "!".red(), date.red(), reason.red())
            }
        }
    }
}

impl Render for RejectedFragment {
    fn render(&self) -> String {
        format!("{} {}", "?".yellow(), format!("{:?}", self.fragment).yellow())
    }
}

impl Render for SyncReport {
    fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .outcomes
            .iter()
            .map(|o| format!("   {}", o.render()))
            .collect();

        if !self.rejected.is_empty() {
            let count = self.rejected.len();
            let label = format!("Skipped {} {} without a date:", count, pluralize("fragment", count));
            lines.push(format!("   {}", label.dimmed()));
            lines.extend(self.rejected.iter().map(|r| format!("     {}", r.render())));
        }

        if self.outcomes.is_empty() {
            lines.push(format!("   {}", "No match dates found".dimmed()));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} created, {} already present, {} failed",
            self.created(),
            self.already_present(),
            self.failed()
        ));

        lines.join("\n")
    }
}

/// Line for the read-only `status` command.
pub fn render_status(date: CanonicalDate, present: &Result<bool, String>) -> String {
    let date = date.to_string();
    match present {
        Ok(true) => format!("   {} {}", "=".dimmed(), date),
        Ok(false) => format!("   {} {} {}", "+".green(), date.green(), "(missing)".dimmed()),
        Err(reason) => format!("   {} {} {}", "!".red(), date.red(), reason.red()),
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchday_core::EventRef;

    fn date() -> CanonicalDate {
        CanonicalDate::from_ymd(2024, 4, 20).unwrap()
    }

    #[test]
    fn report_summary_line() {
        let report = SyncReport {
            outcomes: vec![
                DateOutcome {
                    date: date(),
                    outcome: SyncOutcome::Created(EventRef {
                        id: "1".into(),
                        html_link: None,
                    }),
                },
                DateOutcome {
                    date: date(),
                    outcome: SyncOutcome::AlreadyPresent,
                },
            ],
            rejected: vec![RejectedFragment {
                fragment: "TBD".into(),
                reason: "no date".into(),
            }],
        };

        let rendered = report.render();

        assert!(rendered.contains("2024-04-20"));
        assert!(rendered.contains("Skipped 1 fragment without a date"));
        assert!(rendered.ends_with("1 created, 1 already present, 0 failed"));
    }

    #[test]
    fn status_line_shows_errors() {
        let line = render_status(date(), &Err("Calendar query failed: 401".into()));
        assert!(line.contains("401"));
    }

    #[test]
    fn pluralize_words() {
        assert_eq!(pluralize("fragment", 1), "fragment");
        assert_eq!(pluralize("fragment", 3), "fragments");
    }
}
