//! matchday configuration.
//!
//! Sources, later ones winning:
//!   built-in defaults
//!   ~/.config/matchday/config.toml
//!   MATCHDAY_* environment variables (nested keys use `__`, e.g. MATCHDAY_SOURCE__URL)
//!   command line flags

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use matchday_core::{DateNormalizer, MatchdayError};
use matchday_google::calendar::DEFAULT_CALENDAR_ID;
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "Sammy Ofer Football match";
const DEFAULT_TIMEZONE: &str = "Asia/Jerusalem";
const DEFAULT_SOURCE_URL: &str = "https://www.haifa-stadium.com/schedule_of_matches_in_the_stadium/";
const DEFAULT_SOURCE_DOMAIN: &str = "www.haifa-stadium.com";
const DEFAULT_SELECTOR: &str =
    ".elementor-section-wrap .elementor-section.elementor-top-section.elementor-element";
const DEFAULT_TEXT_SELECTOR: &str = ".elementor-text-editor.elementor-clearfix";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchdayConfig {
    /// Title of every event, also used to recognize events created earlier.
    #[serde(default = "default_title")]
    pub title: String,

    /// IANA timezone of the venue.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// Google account email, as printed by `matchday auth`.
    #[serde(default)]
    pub account: Option<String>,

    /// Custom regex with named groups `day`, `month` and optionally `year`.
    #[serde(default)]
    pub date_pattern: Option<String>,

    #[serde(default)]
    pub source: SourceConfig,
}

/// Where the schedule comes from and which elements hold the dates.
///
/// Keys left out of `[source]` keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,

    /// One fragment per element matching this selector.
    pub selector: String,

    /// If set, a fragment is the text of these descendants instead of the
    /// whole element.
    pub text_selector: Option<String>,

    /// Hosts the scraper may fetch from. Empty allows any host.
    pub allowed_domains: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: DEFAULT_SOURCE_URL.to_string(),
            selector: DEFAULT_SELECTOR.to_string(),
            text_selector: Some(DEFAULT_TEXT_SELECTOR.to_string()),
            allowed_domains: vec![DEFAULT_SOURCE_DOMAIN.to_string()],
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

impl MatchdayConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("matchday")
            .join("config.toml"))
    }

    /// Load from `path`, or from the default location (created on first use).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()),
            None => {
                let p = Self::config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                }
                p
            }
        };

        Self::load_with_env(&path, environment())
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        let config: MatchdayConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read config from {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    /// Write a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let source = SourceConfig::default();
        let contents = format!(
            "\
# matchday configuration

# Event title (also how existing events are recognized):
# title = \"{DEFAULT_TITLE}\"

# Timezone of the venue:
# timezone = \"{DEFAULT_TIMEZONE}\"

# Google account (run `matchday auth` to get it) and calendar:
# account = \"you@gmail.com\"
# calendar_id = \"{DEFAULT_CALENDAR_ID}\"

# Custom date regex with named groups day, month and optional year:
# date_pattern = '(?P<day>\\d{{1,2}})/(?P<month>\\d{{1,2}})'

# [source]
# url = \"{}\"
# selector = \"{}\"
# text_selector = \"{DEFAULT_TEXT_SELECTOR}\"
# allowed_domains = [\"{DEFAULT_SOURCE_DOMAIN}\"]
",
            source.url, source.selector,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, MatchdayError> {
        self.timezone
            .parse()
            .map_err(|_| MatchdayError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    pub fn normalizer(&self) -> Result<DateNormalizer, MatchdayError> {
        match &self.date_pattern {
            Some(pattern) => DateNormalizer::with_pattern(pattern),
            None => Ok(DateNormalizer::new()),
        }
    }

    pub fn require_account(&self) -> Result<&str> {
        self.account.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No Google account configured.\n\n\
                Run `matchday auth`, then set it in {}:\n  \
                account = \"you@gmail.com\"",
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            )
        })
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MATCHDAY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("source.allowed_domains")
}
