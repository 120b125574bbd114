//! Extracting canonical dates from scraped text.
//!
//! Schedule pages list fixtures as short day/month strings, usually with a
//! kickoff time and some surrounding text: `"Maccabi - Hapoel 15/2 19:30"`.
//! The year is almost never printed, so it is inferred from a reference date
//! under the assumption that the page only lists upcoming fixtures within
//! roughly a year:
//!
//! - month earlier than the reference month: next year
//! - otherwise: the reference year
//!
//! An explicit year in the fragment always wins. Two-digit years are expanded
//! to the century closest to the reference year.

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::date::CanonicalDate;
use crate::error::{MatchdayError, MatchdayResult};

/// `D/M`, `D.M`, `D/M/YY`, `D/M/YYYY`. A time after the date (`15/2 19:30`)
/// is left alone because the year must follow a separator, not a space.
/// A dotted kickoff time (`18.05`) also matches; [`DateNormalizer::normalize`]
/// prefers slash-separated candidates to get past it.
pub const DEFAULT_DATE_PATTERN: &str =
    r"\b(?P<day>\d{1,2})[/.](?P<month>\d{1,2})\b(?:[/.](?P<year>\d{4}|\d{2})\b)?";

#[derive(Debug, Clone)]
pub struct DateNormalizer {
    pattern: Regex,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        DateNormalizer {
            pattern: Regex::new(DEFAULT_DATE_PATTERN).expect("default date pattern is valid"),
        }
    }
}

impl DateNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom pattern for sources with a different layout.
    ///
    /// The regex must define named groups `day` and `month`; a `year` group
    /// is optional.
    pub fn with_pattern(pattern: &str) -> MatchdayResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| MatchdayError::Config(format!("Invalid date pattern: {e}")))?;

        let names: Vec<&str> = pattern.capture_names().flatten().collect();
        for required in ["day", "month"] {
            if !names.contains(&required) {
                return Err(MatchdayError::Config(format!(
                    "Date pattern is missing the named group '{required}'"
                )));
            }
        }

        Ok(DateNormalizer { pattern })
    }

    /// Resolve the first valid date in `fragment` relative to `reference`.
    ///
    /// A candidate written with `/` beats any candidate without one, so
    /// `"18.05 20/4"` is the 20th of April, not the 18th of May.
    pub fn normalize(&self, fragment: &str, reference: NaiveDate) -> MatchdayResult<CanonicalDate> {
        let mut fallback = None;

        for caps in self.pattern.captures_iter(fragment) {
            let Some(date) = resolve(&caps, reference) else {
                continue;
            };
            if caps[0].contains('/') {
                return Ok(date);
            }
            fallback.get_or_insert(date);
        }

        fallback.ok_or_else(|| MatchdayError::MalformedFragment(fragment.trim().to_string()))
    }
}

fn resolve(caps: &Captures<'_>, reference: NaiveDate) -> Option<CanonicalDate> {
    let day: u32 = caps.name("day")?.as_str().parse().ok()?;
    let month: u32 = caps.name("month")?.as_str().parse().ok()?;

    let year = match caps.name("year") {
        Some(year) => explicit_year(year.as_str(), reference.year())?,
        None => infer_year(month, reference),
    };

    CanonicalDate::from_ymd(year, month, day)
}

fn infer_year(month: u32, reference: NaiveDate) -> i32 {
    if month < reference.month() {
        reference.year() + 1
    } else {
        reference.year()
    }
}

fn explicit_year(digits: &str, reference_year: i32) -> Option<i32> {
    let value: i32 = digits.parse().ok()?;

    if digits.len() <= 2 {
        Some(expand_two_digit_year(value, reference_year))
    } else {
        Some(value)
    }
}

/// Pick the century that puts `yy` closest to `reference_year`; ties go to
/// the later one.
fn expand_two_digit_year(yy: i32, reference_year: i32) -> i32 {
    let century = reference_year.div_euclid(100) * 100;

    [century - 100, century, century + 100]
        .into_iter()
        .map(|c| c + yy)
        .min_by_key(|year| ((year - reference_year).abs(), -year))
        .unwrap_or(century + yy)
}
