//! sitellms - sitemap-driven llms.txt generation
//!
//! This crate turns a website's structural and content metadata into an
//! `llms.txt`-style summary document for language-model agents. Given a
//! site origin it discovers sitemaps (robots.txt directives with a
//! conventional fallback), expands sitemap indexes into a flat URL set,
//! fetches each page, extracts title/description metadata, groups pages
//! by URL-path heuristics, optionally extracts FAQ question/answer pairs
//! from a designated page, and renders a grouped document plus a CSV
//! export.
//!
//! ## Pipeline
//!
//! The [`Scrape`] tool drives the full flow:
//!
//! ```no_run
//! # async fn demo() -> Result<(), sitellms::ScrapeError> {
//! use sitellms::{render_document, records_to_csv, Scrape};
//!
//! let scrape = Scrape::builder()
//!     .delay(std::time::Duration::from_millis(500))
//!     .faq_url("https://example.com/faq")
//!     .build()?;
//! let outcome = scrape.run("example.com").await?;
//!
//! let document = render_document(&outcome.records, &outcome.faq_items);
//! let csv = records_to_csv(&outcome.records);
//! # let _ = (document, csv);
//! # Ok(())
//! # }
//! ```
//!
//! Individual stages ([`discover_sitemaps`], [`extract_urls_from_sitemap`],
//! [`extract_meta`], [`extract_faq_items`], [`render_document`]) are public
//! for callers that want to drive the pipeline themselves.

mod error;
pub mod export;
pub mod extract;
pub mod gateway;
pub mod pipeline;
pub mod render;
pub mod sitemap;
mod types;

pub use error::ScrapeError;
pub use export::records_to_csv;
pub use extract::{extract_faq_items, extract_meta};
pub use gateway::{Gateway, GatewayBuilder};
pub use pipeline::{normalize_site_url, parse_delay, Scrape, ScrapeBuilder};
pub use render::{group_of, render_document};
pub use sitemap::{discover_sitemaps, extract_urls_from_sitemap, sitemaps_from_robots, SitemapDoc};
pub use types::{FaqItem, PageRecord, ScrapeOutcome};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns SiteLLMs/1.0";
