//! Scrape pipeline
//!
//! One configured `Scrape` run drives the whole flow: normalize the
//! starting URL, discover and expand sitemaps, fetch every page
//! sequentially with an optional politeness delay, extract metadata, and
//! optionally extract FAQ items from a designated page. Accumulators are
//! function-local and handed to the caller in the outcome; nothing is
//! shared or persisted across runs.

use crate::error::ScrapeError;
use crate::extract::{extract_faq_items, extract_meta};
use crate::gateway::{Gateway, GatewayBuilder};
use crate::sitemap::{discover_sitemaps, extract_urls_from_sitemap};
use crate::types::{PageRecord, ScrapeOutcome};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

/// Builder for configuring a scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeBuilder {
    /// Custom User-Agent
    user_agent: Option<String>,
    /// Allow list of URL prefixes
    allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    block_prefixes: Vec<String>,
    /// Fixed delay between successive page fetches
    delay: Duration,
    /// Designated FAQ page URL
    faq_url: Option<String>,
}

impl ScrapeBuilder {
    /// Create a new scrape builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add URL prefix to allow list
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.allow_prefixes.push(prefix.into());
        self
    }

    /// Add URL prefix to block list
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.block_prefixes.push(prefix.into());
        self
    }

    /// Set the fixed delay awaited between successive page fetches
    ///
    /// The delay applies only to the per-page scrape loop, not to sitemap
    /// discovery or the FAQ fetch.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the designated FAQ page URL
    pub fn faq_url(mut self, url: impl Into<String>) -> Self {
        self.faq_url = Some(url.into());
        self
    }

    /// Build the configured scrape
    pub fn build(self) -> Result<Scrape, ScrapeError> {
        let mut gateway = GatewayBuilder::new();
        if let Some(ua) = self.user_agent {
            gateway = gateway.user_agent(ua);
        }
        for prefix in self.allow_prefixes {
            gateway = gateway.allow_prefix(prefix);
        }
        for prefix in self.block_prefixes {
            gateway = gateway.block_prefix(prefix);
        }

        Ok(Scrape {
            gateway: gateway.build()?,
            delay: self.delay,
            faq_url: self.faq_url,
        })
    }
}

/// Configured scrape run
#[derive(Debug, Clone)]
pub struct Scrape {
    gateway: Gateway,
    delay: Duration,
    faq_url: Option<String>,
}

impl Scrape {
    /// Create a scrape builder
    pub fn builder() -> ScrapeBuilder {
        ScrapeBuilder::new()
    }

    /// Run the full pipeline against a site
    ///
    /// Input URLs are validated before any network activity. Discovery
    /// failures abort the run; individual page failures never do, instead
    /// producing records with empty metadata so every discovered URL
    /// appears in the output exactly once.
    pub async fn run(&self, site_url: &str) -> Result<ScrapeOutcome, ScrapeError> {
        let site = normalize_site_url(site_url)?;
        let faq_url = match &self.faq_url {
            Some(raw) => Some(normalize_site_url(raw)?),
            None => None,
        };

        let origin = site_origin(&site)?;
        info!(origin = %origin, "Discovering sitemaps");
        let sitemaps = discover_sitemaps(&self.gateway, &origin).await;
        if sitemaps.is_empty() {
            return Err(ScrapeError::NoSitemapFound);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut urls: Vec<String> = Vec::new();
        for sitemap in &sitemaps {
            for url in extract_urls_from_sitemap(&self.gateway, sitemap).await {
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }
        if urls.is_empty() {
            return Err(ScrapeError::NoUrlsFound);
        }

        info!(pages = urls.len(), "Scraping pages");
        let mut records: Vec<PageRecord> = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            let record = match self.gateway.fetch_text(url).await {
                Some(html) => extract_meta(&html, url),
                None => {
                    warn!(url = %url, "Page fetch failed, recording empty metadata");
                    PageRecord::empty(url.clone())
                }
            };
            records.push(record);
        }

        let mut faq_items = Vec::new();
        if let Some(faq_url) = faq_url {
            info!(url = %faq_url, "Extracting FAQ items");
            match self.gateway.fetch_text(faq_url.as_str()).await {
                Some(html) => {
                    faq_items = extract_faq_items(&html);
                    if faq_items.is_empty() {
                        info!("No FAQ items found on the FAQ page");
                    }
                }
                None => {
                    warn!(url = %faq_url, "FAQ page fetch failed, continuing without FAQ");
                }
            }
        }

        Ok(ScrapeOutcome { records, faq_items })
    }
}

/// Normalize a user-supplied site or FAQ URL
///
/// Schemeless input defaults to `https://`; anything that still fails to
/// parse as an http(s) URL is an input error.
pub fn normalize_site_url(input: &str) -> Result<Url, ScrapeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
        return Err(ScrapeError::InvalidUrlScheme);
    }

    Url::parse(&candidate).map_err(|_| ScrapeError::InvalidUrl(trimmed.to_string()))
}

/// Derive `scheme://host[:port]` for a parsed site URL
fn site_origin(url: &Url) -> Result<String, ScrapeError> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(ScrapeError::InvalidUrl(url.to_string()));
    }
    Ok(origin.ascii_serialization())
}

/// Parse the inter-request delay configuration value
///
/// Seconds as a non-negative float; non-numeric or negative input is
/// treated as zero.
pub fn parse_delay(input: &str) -> Duration {
    match input.trim().parse::<f64>() {
        Ok(secs) if secs > 0.0 && secs.is_finite() => Duration::from_secs_f64(secs),
        _ => Duration::ZERO,
    }
}
