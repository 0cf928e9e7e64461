//! Error types for sitellms

use thiserror::Error;

/// Terminal errors for a scrape run
///
/// Per-resource failures (one page, one sitemap node, the FAQ page) are not
/// represented here: the pipeline recovers from them locally and keeps going.
/// This enum covers only the conditions that abort a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Starting URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// Starting or FAQ URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// robots.txt and the conventional location produced no sitemap
    #[error("No sitemap could be discovered for the site")]
    NoSitemapFound,

    /// Every discovered sitemap expanded to zero page URLs
    #[error("No URLs found in any sitemap")]
    NoUrlsFound,
}
