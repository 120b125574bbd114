//! Fetching the schedule page and cutting it into raw date fragments.
//!
//! Everything page-specific (URL, selectors, allowed hosts) comes from the
//! `[source]` config section, so supporting another stadium is a config
//! change only.

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::config::SourceConfig;

pub struct Scraper {
    url: Url,
    selector: Selector,
    text_selector: Option<Selector>,
}

impl Scraper {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let url = Url::parse(&source.url)
            .with_context(|| format!("Invalid source URL '{}'", source.url))?;

        ensure_allowed(&url, &source.allowed_domains)?;

        Ok(Scraper {
            url,
            selector: parse_selector(&source.selector)?,
            text_selector: source
                .text_selector
                .as_deref()
                .map(parse_selector)
                .transpose()?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<String>> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("matchday/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let html = client
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Schedule page returned an error: {}", self.url))?
            .text()
            .await
            .context("Failed to read schedule page")?;

        Ok(self.extract(&html))
    }

    /// One fragment per matching element, whitespace collapsed, empty ones
    /// dropped.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let fragments: Vec<String> = document
            .select(&self.selector)
            .map(|element| self.element_text(element))
            .filter(|text| !text.is_empty())
            .collect();

        debug!(count = fragments.len(), "extracted fragments");
        fragments
    }

    fn element_text(&self, element: ElementRef<'_>) -> String {
        let text = match &self.text_selector {
            Some(inner) => element
                .select(inner)
                .flat_map(|child| child.text())
                .collect::<Vec<_>>()
                .join(" "),
            None => element.text().collect::<Vec<_>>().join(" "),
        };

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid CSS selector '{}': {}", selector, e))
}

fn ensure_allowed(url: &Url, allowed_domains: &[String]) -> Result<()> {
    if allowed_domains.is_empty() {
        return Ok(());
    }

    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Source URL '{}' has no host", url))?;

    if allowed_domains.iter().any(|d| d.eq_ignore_ascii_case(host)) {
        Ok(())
    } else {
        anyhow::bail!(
            "Host '{}' is not in source.allowed_domains ({})",
            host,
            allowed_domains.join(", ")
        )
    }
}
