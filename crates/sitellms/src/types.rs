//! Core types for sitellms

use serde::{Deserialize, Serialize};

/// Metadata scraped from one sitemap URL
///
/// One record exists per discovered URL, whether or not the fetch succeeded;
/// a failed fetch leaves `title` and `description` empty. Records are never
/// mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Absolute page URL (unique key within a run)
    pub url: String,

    /// Page title, possibly empty
    pub title: String,

    /// Meta description, possibly empty
    pub description: String,
}

impl PageRecord {
    /// Create a record with the given URL and empty metadata
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// True if url, title and description are all non-empty after trimming
    ///
    /// Only complete records contribute to the rendered document; incomplete
    /// ones still appear in the CSV export.
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty()
            && !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
    }
}

/// One question/answer pair extracted from a FAQ page
///
/// Both fields are non-empty by construction; a run's items all come from a
/// single extraction tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// The question text
    pub question: String,

    /// The answer text
    pub answer: String,
}

impl FaqItem {
    /// Create an item from trimmed question/answer text
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Result of a complete scrape run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    /// One record per discovered sitemap URL, in scrape order
    pub records: Vec<PageRecord>,

    /// FAQ items from the designated FAQ page, empty if none configured
    /// or none found
    pub faq_items: Vec<FaqItem>,
}
