//! Page content extraction
//!
//! Two extractors operate on fetched HTML: `meta` builds one PageRecord per
//! page from title/description fallback chains, `faq` pulls question/answer
//! pairs out of a designated FAQ page.

pub mod faq;
pub mod meta;

pub use faq::extract_faq_items;
pub use meta::extract_meta;

use scraper::ElementRef;

/// Collect an element's text content with collapsed whitespace
pub(crate) fn normalized_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
