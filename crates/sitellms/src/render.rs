//! Grouping and document rendering
//!
//! Turns the flat list of scraped records into the grouped llms.txt-style
//! document: records bucketed by a URL-path heuristic, "Page" pinned first,
//! remaining groups in first-seen order, with an optional FAQ section
//! appended at the end.

use crate::types::{FaqItem, PageRecord};
use url::Url;

/// Comment rendered when no record has complete metadata
const NO_ROWS_COMMENT: &str =
    "<!-- No pages with both a title and a description were found. -->";

/// Derive the group name for a page URL
///
/// The path is split into non-empty segments after stripping one trailing
/// slash. Zero or one segment means the top-level "Page" group; otherwise
/// the segment before the final slug becomes the group, converted from a
/// hyphen/underscore slug to Title Case. Unparsable URLs and empty
/// conversions fall back to "Page".
pub fn group_of(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return "Page".to_string();
    };

    let path = parsed.path();
    let path = if path == "/" {
        path
    } else {
        path.strip_suffix('/').unwrap_or(path)
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return "Page".to_string();
    }

    let group = slug_to_title_case(segments[segments.len() - 2]);
    if group.is_empty() {
        "Page".to_string()
    } else {
        group
    }
}

/// Convert a hyphen/underscore-delimited slug to Title Case
fn slug_to_title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the grouped llms.txt-style document
///
/// Only complete records (non-empty url, title and description) contribute;
/// each becomes a `- [title](url): description` bullet, in first-seen order
/// within its group. FAQ items with an empty question or answer after
/// trimming are silently skipped.
pub fn render_document(records: &[PageRecord], faq_items: &[FaqItem]) -> String {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for record in records.iter().filter(|r| r.is_complete()) {
        let group = group_of(&record.url);
        let bullet = format!(
            "- [{}]({}): {}",
            record.title.trim(),
            record.url.trim(),
            record.description.trim()
        );
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, bullets)) => bullets.push(bullet),
            None => groups.push((group, vec![bullet])),
        }
    }

    // "Page" is pinned first; everything else keeps first-seen order.
    if let Some(pos) = groups.iter().position(|(name, _)| name == "Page") {
        if pos > 0 {
            let page = groups.remove(pos);
            groups.insert(0, page);
        }
    }

    let mut out = if groups.is_empty() {
        format!("## Page\n\n{}", NO_ROWS_COMMENT)
    } else {
        groups
            .iter()
            .map(|(name, bullets)| format!("## {}\n\n{}", name, bullets.join("\n")))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let faq: Vec<&FaqItem> = faq_items
        .iter()
        .filter(|i| !i.question.trim().is_empty() && !i.answer.trim().is_empty())
        .collect();
    if !faq.is_empty() {
        out.push_str("\n\nFAQ\n===\n");
        for item in faq {
            out.push_str(&format!(
                "\nUser question:\n{}\nAgent answer:\n{}\n\n---\n",
                item.question.trim(),
                item.answer.trim()
            ));
        }
    }

    out.push('\n');
    out
}
