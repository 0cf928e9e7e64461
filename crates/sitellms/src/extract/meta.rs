//! Title/description metadata extraction

use super::normalized_text;
use crate::types::PageRecord;
use scraper::{Html, Selector};

/// Extract a PageRecord from one page's HTML
///
/// Title precedence: `<title>` text, else `og:title` content, else empty.
/// Description precedence: `meta[name=description]` content, else
/// `og:description` content, else empty. Malformed HTML parses permissively;
/// absent elements simply yield empty strings.
pub fn extract_meta(html: &str, url: &str) -> PageRecord {
    let document = Html::parse_document(html);

    let title = element_text(&document, "title")
        .or_else(|| meta_content(&document, r#"meta[property="og:title"]"#))
        .unwrap_or_default();

    let description = meta_content(&document, r#"meta[name="description"]"#)
        .or_else(|| meta_content(&document, r#"meta[property="og:description"]"#))
        .unwrap_or_default();

    PageRecord {
        url: url.to_string(),
        title,
        description,
    }
}

/// First matching element's trimmed text, if non-empty
fn element_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .map(|e| normalized_text(&e))
        .filter(|t| !t.is_empty())
}

/// First matching element's trimmed `content` attribute, if non-empty
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
